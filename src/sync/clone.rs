use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::clone::{CloneRepository, CloneState},
    error::Error,
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::SyncResource,
};

pub struct CloneSync;

#[async_trait]
impl SyncResource for CloneSync {
    type Fetched = model::CharacterClones;
    type Value = CloneState;

    const KIND: &'static str = "clones";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::CharacterClones(id)
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error> {
        esi.character_clones(id, mods).await
    }

    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        Ok(CloneRepository::new(db).get_by_character_id(id).await?)
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        _existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        Ok(CloneRepository::new(db).replace(id, fetched).await?)
    }
}
