use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::solar_system::SolarSystemRepository,
    error::Error,
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::SyncResource,
};

/// Static universe data; the map changes only with expansions.
const MIN_EXPIRY_DAYS: i64 = 30;

pub struct SolarSystemSync;

#[async_trait]
impl SyncResource for SolarSystemSync {
    type Fetched = model::SolarSystem;
    type Value = entity::eve_solar_system::Model;

    const KIND: &'static str = "solar_system";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::SolarSystem(id)
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
        esi.solar_system(id, mods).await
    }

    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        Ok(SolarSystemRepository::new(db).get_by_system_id(id).await?)
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        let repository = SolarSystemRepository::new(db);

        let value = match existing {
            Some(existing) => repository.update(existing, fetched).await?,
            None => repository.create(id, fetched).await?,
        };

        Ok(value)
    }
}
