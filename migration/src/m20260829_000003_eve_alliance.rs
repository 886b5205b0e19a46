use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveAlliance::Table)
                    .if_not_exists()
                    .col(pk_auto(EveAlliance::Id))
                    .col(big_integer_uniq(EveAlliance::AllianceId))
                    .col(string(EveAlliance::Name))
                    .col(string(EveAlliance::Ticker))
                    .col(big_integer(EveAlliance::CreatorId))
                    .col(big_integer(EveAlliance::CreatorCorporationId))
                    .col(big_integer_null(EveAlliance::ExecutorCorporationId))
                    .col(big_integer_null(EveAlliance::FactionId))
                    .col(timestamp(EveAlliance::DateFounded))
                    .col(timestamp(EveAlliance::CreatedAt))
                    .col(timestamp(EveAlliance::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EveAlliance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveAlliance {
    Table,
    Id,
    AllianceId,
    Name,
    Ticker,
    CreatorId,
    CreatorCorporationId,
    ExecutorCorporationId,
    FactionId,
    DateFounded,
    CreatedAt,
    UpdatedAt,
}
