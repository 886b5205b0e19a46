use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::alliance::AllianceRepository,
    error::Error,
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::SyncResource,
};

/// Alliances effectively never change, so the freshness window gets a floor
/// well past the Expires header.
const MIN_EXPIRY_DAYS: i64 = 14;

pub struct AllianceSync;

#[async_trait]
impl SyncResource for AllianceSync {
    type Fetched = model::Alliance;
    type Value = entity::eve_alliance::Model;

    const KIND: &'static str = "alliance";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::Alliance(id)
    }

    fn min_expiry(&self) -> Option<chrono::Duration> {
        Some(chrono::Duration::days(MIN_EXPIRY_DAYS))
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error> {
        esi.alliance(id, mods).await
    }

    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        Ok(AllianceRepository::new(db).get_by_alliance_id(id).await?)
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        let repository = AllianceRepository::new(db);

        let value = match existing {
            Some(existing) => repository.update(existing, fetched).await?,
            None => repository.create(id, fetched).await?,
        };

        Ok(value)
    }
}
