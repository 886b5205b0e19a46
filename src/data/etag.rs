use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

pub struct EtagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EtagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_resource_key(
        &self,
        resource_key: &str,
    ) -> Result<Option<entity::etag::Model>, DbErr> {
        entity::prelude::Etag::find()
            .filter(entity::etag::Column::ResourceKey.eq(resource_key))
            .one(self.db)
            .await
    }

    /// Idempotent upsert: the row for a resource key is created on first
    /// sight and its `etag`/`cached_until` overwritten on every later one.
    pub async fn upsert(
        &self,
        resource_key: &str,
        etag: &str,
        cached_until: NaiveDateTime,
    ) -> Result<entity::etag::Model, DbErr> {
        let now = Utc::now().naive_utc();

        match self.get_by_resource_key(resource_key).await? {
            Some(existing) => {
                let mut active: entity::etag::ActiveModel = existing.into();
                active.etag = ActiveValue::Set(etag.to_string());
                active.cached_until = ActiveValue::Set(cached_until);
                active.updated_at = ActiveValue::Set(now);

                active.update(self.db).await
            }
            None => {
                let active = entity::etag::ActiveModel {
                    resource_key: ActiveValue::Set(resource_key.to_string()),
                    etag: ActiveValue::Set(etag.to_string()),
                    cached_until: ActiveValue::Set(cached_until),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };

                active.insert(self.db).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

    use super::EtagRepository;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        let schema = Schema::new(DbBackend::Sqlite);

        db.execute(&schema.create_table_from_entity(entity::prelude::Etag))
            .await?;

        Ok(db)
    }

    /// Expect None when no token has been stored for a resource key
    #[tokio::test]
    async fn get_missing_returns_none() -> Result<(), DbErr> {
        let db = setup().await?;

        let repo = EtagRepository::new(&db);
        let result = repo.get_by_resource_key("deadbeef").await?;

        assert!(result.is_none());

        Ok(())
    }

    /// Expect a second upsert for the same key to overwrite, not duplicate
    #[tokio::test]
    async fn upsert_overwrites_on_conflict() -> Result<(), DbErr> {
        let db = setup().await?;
        let repo = EtagRepository::new(&db);

        let first_until = Utc::now().naive_utc();
        let first = repo.upsert("deadbeef", "\"v1\"", first_until).await?;

        let second_until = first_until + chrono::Duration::hours(1);
        let second = repo.upsert("deadbeef", "\"v2\"", second_until).await?;

        assert_eq!(first.id, second.id, "upsert must reuse the existing row");
        assert_eq!(second.etag, "\"v2\"");
        assert_eq!(second.cached_until, second_until);
        assert_eq!(second.created_at, first.created_at);

        Ok(())
    }
}
