//! Response shapes for the ESI endpoints this mirror consumes.
//!
//! `Serialize` is derived alongside `Deserialize` so tests can build mock
//! response bodies from the same types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Alliance {
    /// Not present in the response body; stamped from the requested id.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub ticker: String,
    pub creator_id: i64,
    pub creator_corporation_id: i64,
    pub executor_corporation_id: Option<i64>,
    pub faction_id: Option<i64>,
    pub date_founded: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Corporation {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub ticker: String,
    pub ceo_id: i64,
    pub creator_id: i64,
    pub member_count: i32,
    pub alliance_id: Option<i64>,
    pub faction_id: Option<i64>,
    pub home_station_id: Option<i64>,
    pub tax_rate: f32,
    pub url: Option<String>,
    #[serde(default)]
    pub war_eligible: bool,
    pub date_founded: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub corporation_id: i64,
    pub alliance_id: Option<i64>,
    pub faction_id: Option<i64>,
    pub security_status: Option<f64>,
    pub gender: String,
    pub birthday: DateTime<Utc>,
    pub title: Option<String>,
    pub bloodline_id: i32,
    pub race_id: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneLocationType {
    Station,
    Structure,
}

impl From<CloneLocationType> for entity::sea_orm_active_enums::CloneLocationType {
    fn from(value: CloneLocationType) -> Self {
        match value {
            CloneLocationType::Station => Self::Station,
            CloneLocationType::Structure => Self::Structure,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloneLocation {
    pub location_id: i64,
    pub location_type: CloneLocationType,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JumpClone {
    pub jump_clone_id: i64,
    pub location_id: i64,
    pub location_type: CloneLocationType,
    #[serde(default)]
    pub implants: Vec<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterClones {
    pub home_location: CloneLocation,
    #[serde(default)]
    pub jump_clones: Vec<JumpClone>,
    pub last_clone_jump_date: Option<DateTime<Utc>>,
    pub last_station_change_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Character,
    Corporation,
    Alliance,
    Faction,
}

impl From<ContactType> for entity::sea_orm_active_enums::ContactType {
    fn from(value: ContactType) -> Self {
        match value {
            ContactType::Character => Self::Character,
            ContactType::Corporation => Self::Corporation,
            ContactType::Alliance => Self::Alliance,
            ContactType::Faction => Self::Faction,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: i64,
    pub contact_type: ContactType,
    pub standing: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: i32,
    pub active_skill_level: i32,
    pub trained_skill_level: i32,
    pub skillpoints_in_skill: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterSkills {
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub total_sp: i64,
    pub unallocated_sp: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolarSystem {
    #[serde(default)]
    pub system_id: i64,
    pub name: String,
    pub constellation_id: i64,
    pub security_status: f64,
}
