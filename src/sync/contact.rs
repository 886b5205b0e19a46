use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::contact::ContactRepository,
    error::{cache::CacheError, Error},
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::{decode_layout_mismatch, CacheLayout, CachePayload, SyncResource},
};

pub struct ContactSync;

#[async_trait]
impl SyncResource for ContactSync {
    type Fetched = Vec<model::Contact>;
    type Value = Vec<entity::character_contact::Model>;

    const KIND: &'static str = "contacts";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::CharacterContacts(id)
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
        esi.character_contacts(id, mods).await
    }

    /// No rows reads as "never synced"; a zero-contact character costs one
    /// conditional request per pass.
    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        let contacts = ContactRepository::new(db).get_by_character_id(id).await?;

        Ok((!contacts.is_empty()).then_some(contacts))
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        _existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        Ok(ContactRepository::new(db).replace(id, fetched).await?)
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

        let mut contacts = members
            .iter()
            .map(|member| serde_json::from_slice::<entity::character_contact::Model>(member))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CacheError::Decode)?;

        // Set members come back unordered.
        contacts.sort_by_key(|contact| contact.contact_id);

        Ok(contacts)
    }
}
