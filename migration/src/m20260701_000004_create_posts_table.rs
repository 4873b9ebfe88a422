use sea_orm_migration::prelude::*;

use crate::m20260701_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Posts::CoachUserId).uuid().not_null())
                    .col(ColumnDef::new(Posts::PostType).string_len(20).not_null())
                    .col(ColumnDef::new(Posts::Title).string_len(150).not_null())
                    .col(ColumnDef::new(Posts::Description).text().not_null())
                    .col(ColumnDef::new(Posts::Date).timestamp_with_time_zone())
                    .col(ColumnDef::new(Posts::Location).string_len(150))
                    .col(ColumnDef::new(Posts::Region).string_len(100).not_null())
                    .col(ColumnDef::new(Posts::Needs).text())
                    .col(
                        ColumnDef::new(Posts::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_coach_user_id")
                            .from(Posts::Table, Posts::CoachUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE posts
                ADD CONSTRAINT chk_posts_type
                CHECK (post_type IN ('TRYOUT', 'GUEST_PLAYER'));
                ALTER TABLE posts
                ADD CONSTRAINT chk_posts_status
                CHECK (status IN ('active', 'inactive'));
                CREATE INDEX IF NOT EXISTS idx_posts_coach_user_id
                ON posts (coach_user_id);
                CREATE INDEX IF NOT EXISTS idx_posts_status_created_at
                ON posts (status, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Posts {
    Table,
    Id,
    CoachUserId,
    PostType,
    Title,
    Description,
    Date,
    Location,
    Region,
    Needs,
    Status,
    CreatedAt,
    UpdatedAt,
}
