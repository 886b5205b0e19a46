use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::character::CharacterRepository,
    error::Error,
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::SyncResource,
};

pub struct CharacterSync;

#[async_trait]
impl SyncResource for CharacterSync {
    type Fetched = model::Character;
    type Value = entity::eve_character::Model;

    const KIND: &'static str = "character";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::Character(id)
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error> {
        esi.character(id, mods).await
    }

    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        Ok(CharacterRepository::new(db).get_by_character_id(id).await?)
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        let repository = CharacterRepository::new(db);

        let value = match existing {
            Some(existing) => repository.update(existing, fetched).await?,
            None => repository.create(id, fetched).await?,
        };

        Ok(value)
    }
}
