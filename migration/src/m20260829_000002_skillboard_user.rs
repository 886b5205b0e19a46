use sea_orm_migration::{prelude::*, schema::*};

static IDX_SKILLBOARD_USER_LAST_PROCESSED: &str = "idx_skillboard_user_last_processed";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SkillboardUser::Table)
                    .if_not_exists()
                    .col(uuid(SkillboardUser::Id).primary_key())
                    .col(big_integer_uniq(SkillboardUser::CharacterId))
                    .col(string(SkillboardUser::AccessToken))
                    .col(string(SkillboardUser::Scopes))
                    .col(boolean(SkillboardUser::IsNew))
                    .col(timestamp_null(SkillboardUser::LastProcessed))
                    .col(timestamp(SkillboardUser::CreatedAt))
                    .col(timestamp(SkillboardUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SKILLBOARD_USER_LAST_PROCESSED)
                    .table(SkillboardUser::Table)
                    .col(SkillboardUser::LastProcessed)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SKILLBOARD_USER_LAST_PROCESSED)
                    .table(SkillboardUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SkillboardUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SkillboardUser {
    Table,
    Id,
    CharacterId,
    AccessToken,
    Scopes,
    IsNew,
    LastProcessed,
    CreatedAt,
    UpdatedAt,
}
