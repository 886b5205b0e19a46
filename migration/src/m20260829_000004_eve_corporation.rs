use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVE_CORPORATION_ALLIANCE_ID: &str = "idx_eve_corporation_alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCorporation::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCorporation::Id))
                    .col(big_integer_uniq(EveCorporation::CorporationId))
                    .col(string(EveCorporation::Name))
                    .col(string(EveCorporation::Ticker))
                    .col(big_integer(EveCorporation::CeoId))
                    .col(big_integer(EveCorporation::CreatorId))
                    .col(integer(EveCorporation::MemberCount))
                    .col(big_integer_null(EveCorporation::AllianceId))
                    .col(big_integer_null(EveCorporation::FactionId))
                    .col(big_integer_null(EveCorporation::HomeStationId))
                    .col(float(EveCorporation::TaxRate))
                    .col(string_null(EveCorporation::Url))
                    .col(boolean(EveCorporation::WarEligible))
                    .col(timestamp_null(EveCorporation::DateFounded))
                    .col(timestamp(EveCorporation::CreatedAt))
                    .col(timestamp(EveCorporation::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVE_CORPORATION_ALLIANCE_ID)
                    .table(EveCorporation::Table)
                    .col(EveCorporation::AllianceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVE_CORPORATION_ALLIANCE_ID)
                    .table(EveCorporation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EveCorporation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCorporation {
    Table,
    Id,
    CorporationId,
    Name,
    Ticker,
    CeoId,
    CreatorId,
    MemberCount,
    AllianceId,
    FactionId,
    HomeStationId,
    TaxRate,
    Url,
    WarEligible,
    DateFounded,
    CreatedAt,
    UpdatedAt,
}
