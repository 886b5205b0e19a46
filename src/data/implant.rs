use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

pub struct ImplantRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ImplantRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Vec<entity::character_implant::Model>, DbErr> {
        entity::prelude::CharacterImplant::find()
            .filter(entity::character_implant::Column::CharacterId.eq(character_id))
            .order_by_asc(entity::character_implant::Column::ImplantId)
            .all(self.db)
            .await
    }

    /// Replaces the character's active implant set wholesale inside one
    /// transaction.
    pub async fn replace(
        &self,
        character_id: i64,
        implant_ids: Vec<i64>,
    ) -> Result<Vec<entity::character_implant::Model>, DbErr> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        entity::prelude::CharacterImplant::delete_many()
            .filter(entity::character_implant::Column::CharacterId.eq(character_id))
            .exec(&txn)
            .await?;

        if !implant_ids.is_empty() {
            let rows = implant_ids
                .into_iter()
                .map(|implant_id| entity::character_implant::ActiveModel {
                    character_id: ActiveValue::Set(character_id),
                    implant_id: ActiveValue::Set(implant_id),
                    created_at: ActiveValue::Set(now),
                    ..Default::default()
                });

            entity::prelude::CharacterImplant::insert_many(rows)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        self.get_by_character_id(character_id).await
    }
}
