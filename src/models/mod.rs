//! 业务数据模型

pub mod criteria;
pub mod essays;
pub mod gradings;
pub mod users;
