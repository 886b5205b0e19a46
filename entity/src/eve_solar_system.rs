use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Static universe data; effectively immutable upstream but mirrored through
/// the same conditional-request path as everything else.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "eve_solar_system")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub system_id: i64,
    pub name: String,
    pub constellation_id: i64,
    #[sea_orm(column_type = "Double")]
    pub security_status: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
