pub use sea_orm_migration::prelude::*;

mod m20260701_000001_create_users_table;
mod m20260701_000002_create_profile_tables;
mod m20260701_000003_create_auth_tokens_table;
mod m20260701_000004_create_posts_table;
mod m20260701_000005_create_messaging_tables;
mod m20260701_000006_create_media_assets_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_000001_create_users_table::Migration),
            Box::new(m20260701_000002_create_profile_tables::Migration),
            Box::new(m20260701_000003_create_auth_tokens_table::Migration),
            Box::new(m20260701_000004_create_posts_table::Migration),
            Box::new(m20260701_000005_create_messaging_tables::Migration),
            Box::new(m20260701_000006_create_media_assets_table::Migration),
        ]
    }
}
