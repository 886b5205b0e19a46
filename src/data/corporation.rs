use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::esi::model::Corporation;

pub struct CorporationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CorporationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_corporation_id(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(self.db)
            .await
    }

    /// Create a corporation from its ESI representation
    pub async fn create(
        &self,
        corporation_id: i64,
        corporation: Corporation,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let corporation = entity::eve_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            name: ActiveValue::Set(corporation.name),
            ticker: ActiveValue::Set(corporation.ticker),
            ceo_id: ActiveValue::Set(corporation.ceo_id),
            creator_id: ActiveValue::Set(corporation.creator_id),
            member_count: ActiveValue::Set(corporation.member_count),
            alliance_id: ActiveValue::Set(corporation.alliance_id),
            faction_id: ActiveValue::Set(corporation.faction_id),
            home_station_id: ActiveValue::Set(corporation.home_station_id),
            tax_rate: ActiveValue::Set(corporation.tax_rate),
            url: ActiveValue::Set(corporation.url),
            war_eligible: ActiveValue::Set(corporation.war_eligible),
            date_founded: ActiveValue::Set(corporation.date_founded.map(|d| d.naive_utc())),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        corporation.insert(self.db).await
    }

    pub async fn update(
        &self,
        existing: entity::eve_corporation::Model,
        corporation: Corporation,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let mut active: entity::eve_corporation::ActiveModel = existing.into();
        active.name = ActiveValue::Set(corporation.name);
        active.ticker = ActiveValue::Set(corporation.ticker);
        active.ceo_id = ActiveValue::Set(corporation.ceo_id);
        active.creator_id = ActiveValue::Set(corporation.creator_id);
        active.member_count = ActiveValue::Set(corporation.member_count);
        active.alliance_id = ActiveValue::Set(corporation.alliance_id);
        active.faction_id = ActiveValue::Set(corporation.faction_id);
        active.home_station_id = ActiveValue::Set(corporation.home_station_id);
        active.tax_rate = ActiveValue::Set(corporation.tax_rate);
        active.url = ActiveValue::Set(corporation.url);
        active.war_eligible = ActiveValue::Set(corporation.war_eligible);
        active.date_founded = ActiveValue::Set(corporation.date_founded.map(|d| d.naive_utc()));
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.db).await
    }
}
