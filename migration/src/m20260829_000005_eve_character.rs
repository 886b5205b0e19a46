use sea_orm_migration::{prelude::*, schema::*};

static IDX_EVE_CHARACTER_CORPORATION_ID: &str = "idx_eve_character_corporation_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCharacter::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCharacter::Id))
                    .col(big_integer_uniq(EveCharacter::CharacterId))
                    .col(string(EveCharacter::Name))
                    .col(big_integer(EveCharacter::CorporationId))
                    .col(big_integer_null(EveCharacter::AllianceId))
                    .col(big_integer_null(EveCharacter::FactionId))
                    .col(double_null(EveCharacter::SecurityStatus))
                    .col(string(EveCharacter::Gender))
                    .col(timestamp(EveCharacter::Birthday))
                    .col(string_null(EveCharacter::Title))
                    .col(integer(EveCharacter::BloodlineId))
                    .col(integer(EveCharacter::RaceId))
                    .col(timestamp(EveCharacter::CreatedAt))
                    .col(timestamp(EveCharacter::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVE_CHARACTER_CORPORATION_ID)
                    .table(EveCharacter::Table)
                    .col(EveCharacter::CorporationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVE_CHARACTER_CORPORATION_ID)
                    .table(EveCharacter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EveCharacter::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCharacter {
    Table,
    Id,
    CharacterId,
    Name,
    CorporationId,
    AllianceId,
    FactionId,
    SecurityStatus,
    Gender,
    Birthday,
    Title,
    BloodlineId,
    RaceId,
    CreatedAt,
    UpdatedAt,
}
