use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An authenticated principal: one EVE character that granted the application
/// a set of ESI scopes. Token issuance and refresh happen outside this crate;
/// the row simply carries whatever access token the auth layer stored.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skillboard_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub character_id: i64,
    pub access_token: String,
    /// JSON array of granted ESI scope strings, immutable until re-authorization.
    pub scopes: String,
    pub is_new: bool,
    pub last_processed: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
