//! 评分记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gradings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub essay_id: i64,
    pub teacher_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub ai_score: Option<String>,
    pub final_score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub graded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::essays::Entity",
        from = "Column::EssayId",
        to = "super::essays::Column::Id"
    )]
    Essay,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::essays::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Essay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
