use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::esi::model::CharacterSkills;

/// Full skill state for one character: the total/unallocated SP row plus
/// every trained skill row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillState {
    pub meta: entity::character_skill_meta::Model,
    pub skills: Vec<entity::character_skill::Model>,
}

pub struct SkillRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SkillRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<SkillState>, DbErr> {
        let meta = entity::prelude::CharacterSkillMeta::find()
            .filter(entity::character_skill_meta::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await?;

        let Some(meta) = meta else {
            return Ok(None);
        };

        let skills = entity::prelude::CharacterSkill::find()
            .filter(entity::character_skill::Column::CharacterId.eq(character_id))
            .order_by_asc(entity::character_skill::Column::SkillId)
            .all(self.db)
            .await?;

        Ok(Some(SkillState { meta, skills }))
    }

    /// Replaces the character's skill rows wholesale inside one transaction.
    pub async fn replace(
        &self,
        character_id: i64,
        skills: CharacterSkills,
    ) -> Result<SkillState, DbErr> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        entity::prelude::CharacterSkillMeta::delete_many()
            .filter(entity::character_skill_meta::Column::CharacterId.eq(character_id))
            .exec(&txn)
            .await?;
        entity::prelude::CharacterSkill::delete_many()
            .filter(entity::character_skill::Column::CharacterId.eq(character_id))
            .exec(&txn)
            .await?;

        let meta = entity::character_skill_meta::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            total_sp: ActiveValue::Set(skills.total_sp),
            unallocated_sp: ActiveValue::Set(skills.unallocated_sp),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        let meta = meta.insert(&txn).await?;

        if !skills.skills.is_empty() {
            let rows = skills
                .skills
                .into_iter()
                .map(|skill| entity::character_skill::ActiveModel {
                    character_id: ActiveValue::Set(character_id),
                    skill_id: ActiveValue::Set(skill.skill_id),
                    active_skill_level: ActiveValue::Set(skill.active_skill_level),
                    trained_skill_level: ActiveValue::Set(skill.trained_skill_level),
                    skillpoints_in_skill: ActiveValue::Set(skill.skillpoints_in_skill),
                    created_at: ActiveValue::Set(now),
                    ..Default::default()
                });

            entity::prelude::CharacterSkill::insert_many(rows)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        let skills = entity::prelude::CharacterSkill::find()
            .filter(entity::character_skill::Column::CharacterId.eq(character_id))
            .order_by_asc(entity::character_skill::Column::SkillId)
            .all(self.db)
            .await?;

        Ok(SkillState { meta, skills })
    }
}
