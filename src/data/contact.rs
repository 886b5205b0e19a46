use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::esi::model::Contact;

pub struct ContactRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ContactRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Vec<entity::character_contact::Model>, DbErr> {
        entity::prelude::CharacterContact::find()
            .filter(entity::character_contact::Column::CharacterId.eq(character_id))
            .order_by_asc(entity::character_contact::Column::ContactId)
            .all(self.db)
            .await
    }

    /// Replaces the character's contact list wholesale inside one transaction.
    pub async fn replace(
        &self,
        character_id: i64,
        contacts: Vec<Contact>,
    ) -> Result<Vec<entity::character_contact::Model>, DbErr> {
        let now = Utc::now().naive_utc();

        let txn = self.db.begin().await?;

        entity::prelude::CharacterContact::delete_many()
            .filter(entity::character_contact::Column::CharacterId.eq(character_id))
            .exec(&txn)
            .await?;

        if !contacts.is_empty() {
            let rows = contacts
                .into_iter()
                .map(|contact| entity::character_contact::ActiveModel {
                    character_id: ActiveValue::Set(character_id),
                    contact_id: ActiveValue::Set(contact.contact_id),
                    contact_type: ActiveValue::Set(contact.contact_type.into()),
                    standing: ActiveValue::Set(contact.standing),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                });

            entity::prelude::CharacterContact::insert_many(rows)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        self.get_by_character_id(character_id).await
    }
}
