use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Conditional-request freshness metadata for a single upstream resource.
///
/// `resource_key` is a deterministic hash of the endpoint path so repeated
/// lookups for the same logical resource land on the same row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "etag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub resource_key: String,
    pub etag: String,
    pub cached_until: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
