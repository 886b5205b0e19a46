use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::esi::model::Alliance;

pub struct AllianceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AllianceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_alliance_id(
        &self,
        alliance_id: i64,
    ) -> Result<Option<entity::eve_alliance::Model>, DbErr> {
        entity::prelude::EveAlliance::find()
            .filter(entity::eve_alliance::Column::AllianceId.eq(alliance_id))
            .one(self.db)
            .await
    }

    /// Create an alliance from its ESI representation
    pub async fn create(
        &self,
        alliance_id: i64,
        alliance: Alliance,
    ) -> Result<entity::eve_alliance::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let alliance = entity::eve_alliance::ActiveModel {
            alliance_id: ActiveValue::Set(alliance_id),
            name: ActiveValue::Set(alliance.name),
            ticker: ActiveValue::Set(alliance.ticker),
            creator_id: ActiveValue::Set(alliance.creator_id),
            creator_corporation_id: ActiveValue::Set(alliance.creator_corporation_id),
            executor_corporation_id: ActiveValue::Set(alliance.executor_corporation_id),
            faction_id: ActiveValue::Set(alliance.faction_id),
            date_founded: ActiveValue::Set(alliance.date_founded.naive_utc()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        alliance.insert(self.db).await
    }

    /// Overwrite the mutable attributes of an existing alliance row.
    /// `created_at` is preserved; `updated_at` is refreshed.
    pub async fn update(
        &self,
        existing: entity::eve_alliance::Model,
        alliance: Alliance,
    ) -> Result<entity::eve_alliance::Model, DbErr> {
        let mut active: entity::eve_alliance::ActiveModel = existing.into();
        active.name = ActiveValue::Set(alliance.name);
        active.ticker = ActiveValue::Set(alliance.ticker);
        active.creator_id = ActiveValue::Set(alliance.creator_id);
        active.creator_corporation_id = ActiveValue::Set(alliance.creator_corporation_id);
        active.executor_corporation_id = ActiveValue::Set(alliance.executor_corporation_id);
        active.faction_id = ActiveValue::Set(alliance.faction_id);
        active.date_founded = ActiveValue::Set(alliance.date_founded.naive_utc());
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.db).await
    }
}
