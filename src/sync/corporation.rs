use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::corporation::CorporationRepository,
    error::Error,
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::SyncResource,
};

pub struct CorporationSync;

#[async_trait]
impl SyncResource for CorporationSync {
    type Fetched = model::Corporation;
    type Value = entity::eve_corporation::Model;

    const KIND: &'static str = "corporation";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::Corporation(id)
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error> {
        esi.corporation(id, mods).await
    }

    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        Ok(CorporationRepository::new(db)
            .get_by_corporation_id(id)
            .await?)
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        let repository = CorporationRepository::new(db);

        let value = match existing {
            Some(existing) => repository.update(existing, fetched).await?,
            None => repository.create(id, fetched).await?,
        };

        Ok(value)
    }
}
