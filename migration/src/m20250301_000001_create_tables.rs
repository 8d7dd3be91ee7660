use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表（学生 / 教师 / 管理员）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评分标准表
        manager
            .create_table(
                Table::create()
                    .table(GradingCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradingCriteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradingCriteria::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GradingCriteria::Description).text().null())
                    .col(ColumnDef::new(GradingCriteria::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(GradingCriteria::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradingCriteria::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建论文表
        manager
            .create_table(
                Table::create()
                    .table(Essays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Essays::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Essays::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Essays::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Essays::Title).string().not_null())
                    .col(ColumnDef::new(Essays::FileUrl).string().not_null())
                    .col(ColumnDef::new(Essays::Status).string().not_null())
                    .col(ColumnDef::new(Essays::AiScore).text().null())
                    .col(ColumnDef::new(Essays::SubmittedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Essays::Table, Essays::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Essays::Table, Essays::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分记录表
        manager
            .create_table(
                Table::create()
                    .table(Gradings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gradings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gradings::EssayId).big_integer().not_null())
                    .col(ColumnDef::new(Gradings::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Gradings::AiScore).text().null())
                    .col(ColumnDef::new(Gradings::FinalScore).double().null())
                    .col(ColumnDef::new(Gradings::Feedback).text().null())
                    .col(ColumnDef::new(Gradings::GradedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Gradings::Table, Gradings::EssayId)
                            .to(Essays::Table, Essays::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Gradings::Table, Gradings::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // 批量重评按文件路径查找论文
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_essays_file_url")
                    .table(Essays::Table)
                    .col(Essays::FileUrl)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_essays_teacher_id")
                    .table(Essays::Table)
                    .col(Essays::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gradings_essay_id")
                    .table(Gradings::Table)
                    .col(Gradings::EssayId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Gradings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Essays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradingCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GradingCriteria {
    #[sea_orm(iden = "grading_criteria")]
    Table,
    Id,
    Name,
    Description,
    MaxScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Essays {
    #[sea_orm(iden = "essays")]
    Table,
    Id,
    StudentId,
    TeacherId,
    Title,
    FileUrl,
    Status,
    AiScore,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum Gradings {
    #[sea_orm(iden = "gradings")]
    Table,
    Id,
    EssayId,
    TeacherId,
    AiScore,
    FinalScore,
    Feedback,
    GradedAt,
}
