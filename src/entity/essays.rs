//! 论文实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "essays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub file_url: String,
    pub status: String,
    // AI 评分结果，JSON 文本（结构化结果或错误字符串）
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_score: Option<String>,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::gradings::Entity")]
    Gradings,
}

impl Related<super::gradings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gradings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
