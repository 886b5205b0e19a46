use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::esi::model::Character;

pub struct CharacterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CharacterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Create a character from its ESI representation
    pub async fn create(
        &self,
        character_id: i64,
        character: Character,
    ) -> Result<entity::eve_character::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let character = entity::eve_character::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            name: ActiveValue::Set(character.name),
            corporation_id: ActiveValue::Set(character.corporation_id),
            alliance_id: ActiveValue::Set(character.alliance_id),
            faction_id: ActiveValue::Set(character.faction_id),
            security_status: ActiveValue::Set(character.security_status),
            gender: ActiveValue::Set(character.gender),
            birthday: ActiveValue::Set(character.birthday.naive_utc()),
            title: ActiveValue::Set(character.title),
            bloodline_id: ActiveValue::Set(character.bloodline_id),
            race_id: ActiveValue::Set(character.race_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        character.insert(self.db).await
    }

    pub async fn update(
        &self,
        existing: entity::eve_character::Model,
        character: Character,
    ) -> Result<entity::eve_character::Model, DbErr> {
        let mut active: entity::eve_character::ActiveModel = existing.into();
        active.name = ActiveValue::Set(character.name);
        active.corporation_id = ActiveValue::Set(character.corporation_id);
        active.alliance_id = ActiveValue::Set(character.alliance_id);
        active.faction_id = ActiveValue::Set(character.faction_id);
        active.security_status = ActiveValue::Set(character.security_status);
        active.gender = ActiveValue::Set(character.gender);
        active.birthday = ActiveValue::Set(character.birthday.naive_utc());
        active.title = ActiveValue::Set(character.title);
        active.bloodline_id = ActiveValue::Set(character.bloodline_id);
        active.race_id = ActiveValue::Set(character.race_id);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        active.update(self.db).await
    }
}
