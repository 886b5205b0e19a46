use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character_skill")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub character_id: i64,
    pub skill_id: i32,
    pub active_skill_level: i32,
    pub trained_skill_level: i32,
    pub skillpoints_in_skill: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
