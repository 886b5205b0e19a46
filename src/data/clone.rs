use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::esi::model::CharacterClones;

/// Full clone state for one character: the home/death metadata row plus
/// every jump clone row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneState {
    pub meta: entity::character_clone::Model,
    pub jump_clones: Vec<entity::character_jump_clone::Model>,
}

pub struct CloneRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CloneRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<CloneState>, DbErr> {
        let meta = entity::prelude::CharacterClone::find()
            .filter(entity::character_clone::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await?;

        let Some(meta) = meta else {
            return Ok(None);
        };

        let jump_clones = entity::prelude::CharacterJumpClone::find()
            .filter(entity::character_jump_clone::Column::CharacterId.eq(character_id))
            .all(self.db)
            .await?;

        Ok(Some(CloneState { meta, jump_clones }))
    }

    /// Replaces the character's clone rows wholesale: deletes anything
    /// persisted, then inserts the fetched state inside one transaction.
    pub async fn replace(
        &self,
        character_id: i64,
        clones: CharacterClones,
    ) -> Result<CloneState, DbErr> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        entity::prelude::CharacterClone::delete_many()
            .filter(entity::character_clone::Column::CharacterId.eq(character_id))
            .exec(&txn)
            .await?;
        entity::prelude::CharacterJumpClone::delete_many()
            .filter(entity::character_jump_clone::Column::CharacterId.eq(character_id))
            .exec(&txn)
            .await?;

        let meta = entity::character_clone::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            home_location_id: ActiveValue::Set(clones.home_location.location_id),
            home_location_type: ActiveValue::Set(clones.home_location.location_type.into()),
            last_clone_jump_date: ActiveValue::Set(
                clones.last_clone_jump_date.map(|d| d.naive_utc()),
            ),
            last_station_change_date: ActiveValue::Set(
                clones.last_station_change_date.map(|d| d.naive_utc()),
            ),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        let meta = meta.insert(&txn).await?;

        let mut jump_clones = Vec::with_capacity(clones.jump_clones.len());
        for jump_clone in clones.jump_clones {
            let implants = serde_json::to_value(&jump_clone.implants)
                .map_err(|err| DbErr::Custom(err.to_string()))?;

            let row = entity::character_jump_clone::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                jump_clone_id: ActiveValue::Set(jump_clone.jump_clone_id),
                location_id: ActiveValue::Set(jump_clone.location_id),
                location_type: ActiveValue::Set(jump_clone.location_type.into()),
                implants: ActiveValue::Set(implants),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            };

            jump_clones.push(row.insert(&txn).await?);
        }

        txn.commit().await?;

        Ok(CloneState { meta, jump_clones })
    }
}
