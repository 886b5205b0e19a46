use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::skill::{SkillRepository, SkillState},
    error::Error,
    esi::{endpoint::Endpoint, model, modifier::ModifierSet, EsiClient, FetchOutcome},
    sync::SyncResource,
};

pub struct SkillSync;

#[async_trait]
impl SyncResource for SkillSync {
    type Fetched = model::CharacterSkills;
    type Value = SkillState;

    const KIND: &'static str = "skills";

    fn endpoint(&self, id: i64) -> Endpoint {
        Endpoint::CharacterSkills(id)
    }

    async fn fetch(
        &self,
        esi: &EsiClient,
        id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Self::Fetched>, Error> {
        esi.character_skills(id, mods).await
    }

    async fn load(&self, db: &DatabaseConnection, id: i64) -> Result<Option<Self::Value>, Error> {
        Ok(SkillRepository::new(db).get_by_character_id(id).await?)
    }

    async fn store(
        &self,
        db: &DatabaseConnection,
        id: i64,
        fetched: Self::Fetched,
        _existing: Option<Self::Value>,
    ) -> Result<Self::Value, Error> {
        Ok(SkillRepository::new(db).replace(id, fetched).await?)
    }
}
