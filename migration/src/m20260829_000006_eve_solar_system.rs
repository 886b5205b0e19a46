use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveSolarSystem::Table)
                    .if_not_exists()
                    .col(pk_auto(EveSolarSystem::Id))
                    .col(big_integer_uniq(EveSolarSystem::SystemId))
                    .col(string(EveSolarSystem::Name))
                    .col(big_integer(EveSolarSystem::ConstellationId))
                    .col(double(EveSolarSystem::SecurityStatus))
                    .col(timestamp(EveSolarSystem::CreatedAt))
                    .col(timestamp(EveSolarSystem::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EveSolarSystem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveSolarSystem {
    Table,
    Id,
    SystemId,
    Name,
    ConstellationId,
    SecurityStatus,
    CreatedAt,
    UpdatedAt,
}
