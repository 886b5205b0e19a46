use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::implant::ImplantRepository,
    error::{cache::CacheError, Error},
    esi::{endpoint::Endpoint, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::{decode_layout_mismatch, CacheLayout, CachePayload, SyncResource},
};

pub struct ImplantSync;

#[async_trait]
impl SyncResource for ImplantSync {
    type Fetched = Vec<i64>;
    type Value = Vec<entity::character_implant::Model>;

    const KIND: &'static str = "implants";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::CharacterImplants(id)
    }

    fn cache_layout(&self) -> CacheLayout {
        CacheLayout::Set
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error> {
        esi.character_implants(id, mods).await
    }

    /// No rows reads as "never synced"; an implant-free clone costs one
    /// conditional request per pass.
    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        let implants = ImplantRepository::new(db).get_by_character_id(id).await?;

        Ok((!implants.is_empty()).then_some(implants))
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        _existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        Ok(ImplantRepository::new(db).replace(id, fetched).await?)
    }

    fn encode_cached(&self, value: &Self::Value) -> Result<CachePayload, CacheError> {
        let members = value
            .iter()
            .map(serde_json::to_vec)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CacheError::Encode)?;

        Ok(CachePayload::Set(members))
    }

    fn decode_cached(&self, payload: CachePayload) -> Result<Self::Value, CacheError> {
        let CachePayload::Set(members) = payload else {
            return decode_layout_mismatch();
        };

        let mut implants = members
            .iter()
            .map(|member| serde_json::from_slice::<entity::character_implant::Model>(member))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CacheError::Decode)?;

        // Set members come back unordered.
        implants.sort_by_key(|implant| implant.implant_id);

        Ok(implants)
    }
}
