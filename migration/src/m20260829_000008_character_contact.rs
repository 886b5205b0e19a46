use sea_orm_migration::{prelude::*, schema::*};

static IDX_CHARACTER_CONTACT_CHARACTER_ID: &str = "idx_character_contact_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterContact::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterContact::Id))
                    .col(big_integer(CharacterContact::CharacterId))
                    .col(big_integer(CharacterContact::ContactId))
                    .col(string_len(CharacterContact::ContactType, 16))
                    .col(double(CharacterContact::Standing))
                    .col(timestamp(CharacterContact::CreatedAt))
                    .col(timestamp(CharacterContact::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_CONTACT_CHARACTER_ID)
                    .table(CharacterContact::Table)
                    .col(CharacterContact::CharacterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_CONTACT_CHARACTER_ID)
                    .table(CharacterContact::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterContact::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CharacterContact {
    Table,
    Id,
    CharacterId,
    ContactId,
    ContactType,
    Standing,
    CreatedAt,
    UpdatedAt,
}
