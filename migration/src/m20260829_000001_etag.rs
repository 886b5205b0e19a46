use sea_orm_migration::{prelude::*, schema::*};

static IDX_ETAG_RESOURCE_KEY: &str = "idx_etag_resource_key";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Etag::Table)
                    .if_not_exists()
                    .col(pk_auto(Etag::Id))
                    .col(string_uniq(Etag::ResourceKey))
                    .col(string(Etag::Etag))
                    .col(timestamp(Etag::CachedUntil))
                    .col(timestamp(Etag::CreatedAt))
                    .col(timestamp(Etag::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ETAG_RESOURCE_KEY)
                    .table(Etag::Table)
                    .col(Etag::ResourceKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ETAG_RESOURCE_KEY)
                    .table(Etag::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Etag::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Etag {
    Table,
    Id,
    ResourceKey,
    Etag,
    CachedUntil,
    CreatedAt,
    UpdatedAt,
}
