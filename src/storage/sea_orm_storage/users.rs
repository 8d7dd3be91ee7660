//! 用户存储操作

use super::{SeaOrmStorage, timestamp_to_datetime};
use crate::entity::users::{ActiveModel, Entity as Users, Model};
use crate::errors::{EssaySystemError, Result};
use crate::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use crate::utils::validate::validate_email;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl Model {
    pub(crate) fn into_user(self) -> Result<User> {
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(EssaySystemError::serialization)?;

        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            created_at: timestamp_to_datetime(self.created_at),
        })
    }
}

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        validate_email(&req.email).map_err(EssaySystemError::validation)?;

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            role: Set(req.role.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("创建用户失败: {e}")))?;

        result.into_user()
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询用户失败: {e}")))?;

        result.map(Model::into_user).transpose()
    }
}
