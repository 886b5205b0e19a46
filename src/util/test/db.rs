use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema};

/// Connects an in-memory sqlite database with every table created.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema = Schema::new(DbBackend::Sqlite);

    let stmts = vec![
        schema.create_table_from_entity(entity::prelude::Etag),
        schema.create_table_from_entity(entity::prelude::SkillboardUser),
        schema.create_table_from_entity(entity::prelude::EveAlliance),
        schema.create_table_from_entity(entity::prelude::EveCorporation),
        schema.create_table_from_entity(entity::prelude::EveCharacter),
        schema.create_table_from_entity(entity::prelude::EveSolarSystem),
        schema.create_table_from_entity(entity::prelude::CharacterClone),
        schema.create_table_from_entity(entity::prelude::CharacterJumpClone),
        schema.create_table_from_entity(entity::prelude::CharacterImplant),
        schema.create_table_from_entity(entity::prelude::CharacterContact),
        schema.create_table_from_entity(entity::prelude::CharacterSkillMeta),
        schema.create_table_from_entity(entity::prelude::CharacterSkill),
    ];

    for stmt in stmts {
        db.execute(&stmt).await?;
    }

    Ok(db)
}
