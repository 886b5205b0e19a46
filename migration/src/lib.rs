pub use sea_orm_migration::prelude::*;

mod m20260829_000001_etag;
mod m20260829_000002_skillboard_user;
mod m20260829_000003_eve_alliance;
mod m20260829_000004_eve_corporation;
mod m20260829_000005_eve_character;
mod m20260829_000006_eve_solar_system;
mod m20260829_000007_character_clones;
mod m20260829_000008_character_contact;
mod m20260829_000009_character_skills;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_etag::Migration),
            Box::new(m20260829_000002_skillboard_user::Migration),
            Box::new(m20260829_000003_eve_alliance::Migration),
            Box::new(m20260829_000004_eve_corporation::Migration),
            Box::new(m20260829_000005_eve_character::Migration),
            Box::new(m20260829_000006_eve_solar_system::Migration),
            Box::new(m20260829_000007_character_clones::Migration),
            Box::new(m20260829_000008_character_contact::Migration),
            Box::new(m20260829_000009_character_skills::Migration),
        ]
    }
}
