//! 预导入模块，方便使用

pub use super::essays::{ActiveModel as EssayActiveModel, Entity as Essays, Model as EssayModel};
pub use super::grading_criteria::{
    ActiveModel as CriterionActiveModel, Entity as GradingCriteria, Model as CriterionModel,
};
pub use super::gradings::{
    ActiveModel as GradingActiveModel, Entity as Gradings, Model as GradingModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
