use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Where a clone is installed: an NPC station or a player-owned structure.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum CloneLocationType {
    #[sea_orm(string_value = "station")]
    Station,
    #[sea_orm(string_value = "structure")]
    Structure,
}

/// Kind of entity a character contact points at.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    #[sea_orm(string_value = "character")]
    Character,
    #[sea_orm(string_value = "corporation")]
    Corporation,
    #[sea_orm(string_value = "alliance")]
    Alliance,
    #[sea_orm(string_value = "faction")]
    Faction,
}
