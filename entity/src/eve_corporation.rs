use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "eve_corporation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub corporation_id: i64,
    pub name: String,
    pub ticker: String,
    pub ceo_id: i64,
    pub creator_id: i64,
    pub member_count: i32,
    pub alliance_id: Option<i64>,
    pub faction_id: Option<i64>,
    pub home_station_id: Option<i64>,
    #[sea_orm(column_type = "Float")]
    pub tax_rate: f32,
    pub url: Option<String>,
    pub war_eligible: bool,
    pub date_founded: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
