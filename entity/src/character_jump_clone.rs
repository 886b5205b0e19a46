use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::CloneLocationType;

/// One installed jump clone. Rows for a character are replaced wholesale on
/// change; no partial diffing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character_jump_clone")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub character_id: i64,
    pub jump_clone_id: i64,
    pub location_id: i64,
    pub location_type: CloneLocationType,
    /// JSON array of implant type IDs installed in this clone.
    pub implants: Json,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
