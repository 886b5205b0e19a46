use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::esi::model::SolarSystem;

pub struct SolarSystemRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SolarSystemRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_system_id(
        &self,
        system_id: i64,
    ) -> Result<Option<entity::eve_solar_system::Model>, DbErr> {
        entity::prelude::EveSolarSystem::find()
            .filter(entity::eve_solar_system::Column::SystemId.eq(system_id))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        system_id: i64,
        system: SolarSystem,
    ) -> Result<entity::eve_solar_system::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let system = entity::eve_solar_system::ActiveModel {
            system_id: ActiveValue::Set(system_id),
            name: ActiveValue::Set(system.name),
            constellation_id: ActiveValue::Set(system.constellation_id),
            security_status: ActiveValue::Set(system.security_status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        system.insert(self.db).await
    }

    pub async fn update(
        &self,
        existing: entity::eve_solar_system::Model,
        system: SolarSystem,
    ) -> Result<entity::eve_solar_system::Model, DbErr> {
        let mut active: entity::eve_solar_system::ActiveModel = existing.into();
        active.name = ActiveValue::Set(system.name);
        active.constellation_id = ActiveValue::Set(system.constellation_id);
        active.security_status = ActiveValue::Set(system.security_status);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.db).await
    }
}
