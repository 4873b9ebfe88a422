use sea_orm_migration::prelude::*;

use crate::m20260701_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // =====================================================
        // player_profiles: 1:1 with a PLAYER user
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(PlayerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(PlayerProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PlayerProfiles::FirstName).string_len(100))
                    .col(ColumnDef::new(PlayerProfiles::LastName).string_len(100))
                    .col(ColumnDef::new(PlayerProfiles::Team).string_len(150))
                    .col(ColumnDef::new(PlayerProfiles::Position).string_len(50))
                    .col(ColumnDef::new(PlayerProfiles::Level).string_len(50))
                    .col(ColumnDef::new(PlayerProfiles::AgeGroup).string_len(20))
                    .col(ColumnDef::new(PlayerProfiles::Region).string_len(100))
                    .col(ColumnDef::new(PlayerProfiles::Bio).text())
                    .col(ColumnDef::new(PlayerProfiles::ContactEmail).string_len(255))
                    .col(ColumnDef::new(PlayerProfiles::ContactPhone).string_len(50))
                    .col(ColumnDef::new(PlayerProfiles::PhotoUrl).text())
                    .col(
                        ColumnDef::new(PlayerProfiles::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PlayerProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PlayerProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_profiles_user_id")
                            .from(PlayerProfiles::Table, PlayerProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // coach_profiles: 1:1 with a COACH user
        // =====================================================
        manager
            .create_table(
                Table::create()
                    .table(CoachProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoachProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(CoachProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CoachProfiles::FirstName).string_len(100))
                    .col(ColumnDef::new(CoachProfiles::LastName).string_len(100))
                    .col(ColumnDef::new(CoachProfiles::Club).string_len(150))
                    .col(ColumnDef::new(CoachProfiles::TeamName).string_len(150))
                    .col(ColumnDef::new(CoachProfiles::Level).string_len(50))
                    .col(ColumnDef::new(CoachProfiles::Region).string_len(100))
                    .col(ColumnDef::new(CoachProfiles::Record).string_len(100))
                    .col(ColumnDef::new(CoachProfiles::Bio).text())
                    .col(ColumnDef::new(CoachProfiles::ContactEmail).string_len(255))
                    .col(ColumnDef::new(CoachProfiles::ContactPhone).string_len(50))
                    .col(ColumnDef::new(CoachProfiles::PhotoUrl).text())
                    .col(
                        ColumnDef::new(CoachProfiles::IsPublic)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CoachProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CoachProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coach_profiles_user_id")
                            .from(CoachProfiles::Table, CoachProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Directory listings filter on visibility constantly.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_player_profiles_is_public
                ON player_profiles (is_public);
                CREATE INDEX IF NOT EXISTS idx_coach_profiles_is_public
                ON coach_profiles (is_public);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoachProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PlayerProfiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Team,
    Position,
    Level,
    AgeGroup,
    Region,
    Bio,
    ContactEmail,
    ContactPhone,
    PhotoUrl,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub enum CoachProfiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Club,
    TeamName,
    Level,
    Region,
    Record,
    Bio,
    ContactEmail,
    ContactPhone,
    PhotoUrl,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
