use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::ContactType;

/// One entry from a character's contact list. Rows for a character are
/// replaced wholesale on change; no partial diffing.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "character_contact")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub character_id: i64,
    pub contact_id: i64,
    pub contact_type: ContactType,
    #[sea_orm(column_type = "Double")]
    pub standing: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
