use sea_orm_migration::{prelude::*, schema::*};

static IDX_CHARACTER_JUMP_CLONE_CHARACTER_ID: &str = "idx_character_jump_clone_character_id";
static IDX_CHARACTER_IMPLANT_CHARACTER_ID: &str = "idx_character_implant_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterClone::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterClone::Id))
                    .col(big_integer_uniq(CharacterClone::CharacterId))
                    .col(big_integer(CharacterClone::HomeLocationId))
                    .col(string_len(CharacterClone::HomeLocationType, 16))
                    .col(timestamp_null(CharacterClone::LastCloneJumpDate))
                    .col(timestamp_null(CharacterClone::LastStationChangeDate))
                    .col(timestamp(CharacterClone::CreatedAt))
                    .col(timestamp(CharacterClone::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CharacterJumpClone::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterJumpClone::Id))
                    .col(big_integer(CharacterJumpClone::CharacterId))
                    .col(big_integer(CharacterJumpClone::JumpCloneId))
                    .col(big_integer(CharacterJumpClone::LocationId))
                    .col(string_len(CharacterJumpClone::LocationType, 16))
                    .col(json(CharacterJumpClone::Implants))
                    .col(timestamp(CharacterJumpClone::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_JUMP_CLONE_CHARACTER_ID)
                    .table(CharacterJumpClone::Table)
                    .col(CharacterJumpClone::CharacterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CharacterImplant::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterImplant::Id))
                    .col(big_integer(CharacterImplant::CharacterId))
                    .col(big_integer(CharacterImplant::ImplantId))
                    .col(timestamp(CharacterImplant::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_IMPLANT_CHARACTER_ID)
                    .table(CharacterImplant::Table)
                    .col(CharacterImplant::CharacterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_IMPLANT_CHARACTER_ID)
                    .table(CharacterImplant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterImplant::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_JUMP_CLONE_CHARACTER_ID)
                    .table(CharacterJumpClone::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterJumpClone::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterClone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CharacterClone {
    Table,
    Id,
    CharacterId,
    HomeLocationId,
    HomeLocationType,
    LastCloneJumpDate,
    LastStationChangeDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CharacterJumpClone {
    Table,
    Id,
    CharacterId,
    JumpCloneId,
    LocationId,
    LocationType,
    Implants,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum CharacterImplant {
    Table,
    Id,
    CharacterId,
    ImplantId,
    CreatedAt,
}
