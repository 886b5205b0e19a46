use sea_orm_migration::{prelude::*, schema::*};

static IDX_CHARACTER_SKILL_CHARACTER_ID: &str = "idx_character_skill_character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CharacterSkillMeta::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterSkillMeta::Id))
                    .col(big_integer_uniq(CharacterSkillMeta::CharacterId))
                    .col(big_integer(CharacterSkillMeta::TotalSp))
                    .col(integer_null(CharacterSkillMeta::UnallocatedSp))
                    .col(timestamp(CharacterSkillMeta::CreatedAt))
                    .col(timestamp(CharacterSkillMeta::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CharacterSkill::Table)
                    .if_not_exists()
                    .col(pk_auto(CharacterSkill::Id))
                    .col(big_integer(CharacterSkill::CharacterId))
                    .col(integer(CharacterSkill::SkillId))
                    .col(integer(CharacterSkill::ActiveSkillLevel))
                    .col(integer(CharacterSkill::TrainedSkillLevel))
                    .col(big_integer(CharacterSkill::SkillpointsInSkill))
                    .col(timestamp(CharacterSkill::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_SKILL_CHARACTER_ID)
                    .table(CharacterSkill::Table)
                    .col(CharacterSkill::CharacterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_SKILL_CHARACTER_ID)
                    .table(CharacterSkill::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterSkill::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CharacterSkillMeta::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CharacterSkillMeta {
    Table,
    Id,
    CharacterId,
    TotalSp,
    UnallocatedSp,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CharacterSkill {
    Table,
    Id,
    CharacterId,
    SkillId,
    ActiveSkillLevel,
    TrainedSkillLevel,
    SkillpointsInSkill,
    CreatedAt,
}
