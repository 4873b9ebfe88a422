use sea_orm_migration::prelude::*;

use crate::m20260701_000001_create_users_table::Users;
use crate::m20260701_000002_create_profile_tables::{CoachProfiles, PlayerProfiles};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAssets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaAssets::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(MediaAssets::OwnerUserId).uuid().not_null())
                    .col(ColumnDef::new(MediaAssets::PlayerProfileId).uuid())
                    .col(ColumnDef::new(MediaAssets::CoachProfileId).uuid())
                    .col(ColumnDef::new(MediaAssets::Kind).string_len(10).not_null())
                    .col(ColumnDef::new(MediaAssets::Url).text().not_null())
                    .col(ColumnDef::new(MediaAssets::Caption).string_len(255))
                    .col(
                        ColumnDef::new(MediaAssets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_assets_owner_user_id")
                            .from(MediaAssets::Table, MediaAssets::OwnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_assets_player_profile_id")
                            .from(MediaAssets::Table, MediaAssets::PlayerProfileId)
                            .to(PlayerProfiles::Table, PlayerProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_assets_coach_profile_id")
                            .from(MediaAssets::Table, MediaAssets::CoachProfileId)
                            .to(CoachProfiles::Table, CoachProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Exactly one owning profile per asset.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE media_assets
                ADD CONSTRAINT chk_media_assets_kind
                CHECK (kind IN ('IMAGE', 'VIDEO'));
                ALTER TABLE media_assets
                ADD CONSTRAINT chk_media_assets_single_profile
                CHECK (
                    (player_profile_id IS NOT NULL AND coach_profile_id IS NULL)
                    OR (player_profile_id IS NULL AND coach_profile_id IS NOT NULL)
                );
                CREATE INDEX IF NOT EXISTS idx_media_assets_player_profile_id
                ON media_assets (player_profile_id, created_at);
                CREATE INDEX IF NOT EXISTS idx_media_assets_coach_profile_id
                ON media_assets (coach_profile_id, created_at);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MediaAssets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum MediaAssets {
    Table,
    Id,
    OwnerUserId,
    PlayerProfileId,
    CoachProfileId,
    Kind,
    Url,
    Caption,
    CreatedAt,
}
