//! Essay System - AI 辅助论文评分后端
//!
//! 学生提交论文（PDF），系统调用生成式模型按评分标准给出结构化评分，
//! 教师在此基础上确认最终成绩。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `grading`: AI 评分流水线（提取、评分标准、提示词、模型客户端、解析）
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod grading;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
