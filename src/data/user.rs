use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<entity::skillboard_user::Model>, DbErr> {
        entity::prelude::SkillboardUser::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Users whose data should be refreshed: never processed, or last
    /// processed at or before the cutoff.
    pub async fn due_for_refresh(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<entity::skillboard_user::Model>, DbErr> {
        entity::prelude::SkillboardUser::find()
            .filter(
                Condition::any()
                    .add(entity::skillboard_user::Column::LastProcessed.is_null())
                    .add(entity::skillboard_user::Column::LastProcessed.lte(cutoff)),
            )
            .all(self.db)
            .await
    }

    /// Stamps a completed processing pass and clears the new-user flag.
    pub async fn mark_processed(
        &self,
        user: entity::skillboard_user::Model,
    ) -> Result<entity::skillboard_user::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut active: entity::skillboard_user::ActiveModel = user.into();
        active.is_new = ActiveValue::Set(false);
        active.last_processed = ActiveValue::Set(Some(now));
        active.updated_at = ActiveValue::Set(now);

        active.update(self.db).await
    }

    pub async fn create(
        &self,
        character_id: i64,
        access_token: String,
        scopes: Vec<String>,
    ) -> Result<entity::skillboard_user::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let scopes =
            serde_json::to_string(&scopes).map_err(|err| DbErr::Custom(err.to_string()))?;

        let user = entity::skillboard_user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            character_id: ActiveValue::Set(character_id),
            access_token: ActiveValue::Set(access_token),
            scopes: ActiveValue::Set(scopes),
            is_new: ActiveValue::Set(true),
            last_processed: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        user.insert(self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::util::test::db::setup_test_db;

    #[tokio::test]
    async fn new_users_are_due_for_refresh() {
        let db = setup_test_db().await.unwrap();
        let repository = UserRepository::new(&db);

        let user = repository
            .create(2114794365, "token".to_string(), vec![])
            .await
            .unwrap();
        assert!(user.is_new);

        let due = repository
            .due_for_refresh(Utc::now().naive_utc() - Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, user.id);
    }

    #[tokio::test]
    async fn recently_processed_users_are_not_due() {
        let db = setup_test_db().await.unwrap();
        let repository = UserRepository::new(&db);

        let user = repository
            .create(2114794365, "token".to_string(), vec![])
            .await
            .unwrap();
        let user = repository.mark_processed(user).await.unwrap();

        assert!(!user.is_new);
        assert!(user.last_processed.is_some());

        let due = repository
            .due_for_refresh(Utc::now().naive_utc() - Duration::hours(3))
            .await
            .unwrap();

        assert!(due.is_empty());
    }

    #[tokio::test]
    async fn stale_users_become_due_again() {
        let db = setup_test_db().await.unwrap();
        let repository = UserRepository::new(&db);

        let user = repository
            .create(2114794365, "token".to_string(), vec![])
            .await
            .unwrap();

        let stale = Utc::now().naive_utc() - Duration::hours(6);
        let mut active: entity::skillboard_user::ActiveModel = user.into();
        active.is_new = ActiveValue::Set(false);
        active.last_processed = ActiveValue::Set(Some(stale));
        active.update(&db).await.unwrap();

        let due = repository
            .due_for_refresh(Utc::now().naive_utc() - Duration::hours(3))
            .await
            .unwrap();

        assert_eq!(due.len(), 1);
    }
}
