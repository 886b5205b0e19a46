//! Mock ESI response bodies shared across tests.
//!
//! The response models derive `Serialize`, so mockito bodies come straight
//! from `serde_json::to_string` on these values.

use chrono::{TimeZone, Utc};

use crate::esi::model::{
    Alliance, Character, CharacterClones, CharacterSkills, CloneLocation, CloneLocationType,
    Contact, ContactType, Corporation, JumpClone, Skill, SolarSystem,
};

pub fn mock_esi_alliance() -> Alliance {
    Alliance {
        id: 0,
        name: "Test Alliance Please Ignore".to_string(),
        ticker: "TEST".to_string(),
        creator_id: 2114794365,
        creator_corporation_id: 98000001,
        executor_corporation_id: Some(98000001),
        faction_id: None,
        date_founded: Utc.with_ymd_and_hms(2010, 6, 1, 0, 0, 0).unwrap(),
    }
}

pub fn mock_esi_corporation() -> Corporation {
    Corporation {
        id: 0,
        name: "Dreddit".to_string(),
        ticker: "B0RT".to_string(),
        ceo_id: 2114794365,
        creator_id: 2114794365,
        member_count: 4200,
        alliance_id: Some(99000001),
        faction_id: None,
        home_station_id: Some(60003760),
        tax_rate: 0.1,
        url: Some("https://example.com".to_string()),
        war_eligible: true,
        date_founded: Some(Utc.with_ymd_and_hms(2010, 6, 10, 0, 0, 0).unwrap()),
    }
}

pub fn mock_esi_character() -> Character {
    Character {
        id: 0,
        name: "CCP Zoetrope".to_string(),
        corporation_id: 98000001,
        alliance_id: Some(99000001),
        faction_id: None,
        security_status: Some(2.5),
        gender: "male".to_string(),
        birthday: Utc.with_ymd_and_hms(2018, 4, 13, 16, 0, 0).unwrap(),
        title: None,
        bloodline_id: 3,
        race_id: 2,
    }
}

pub fn mock_esi_solar_system() -> SolarSystem {
    SolarSystem {
        system_id: 0,
        name: "Jita".to_string(),
        constellation_id: 20000020,
        security_status: 0.9459,
    }
}

pub fn mock_esi_clones() -> CharacterClones {
    CharacterClones {
        home_location: CloneLocation {
            location_id: 60003760,
            location_type: CloneLocationType::Station,
        },
        jump_clones: vec![
            JumpClone {
                jump_clone_id: 12345,
                location_id: 60011866,
                location_type: CloneLocationType::Station,
                implants: vec![22118],
            },
            JumpClone {
                jump_clone_id: 12346,
                location_id: 1021975535893,
                location_type: CloneLocationType::Structure,
                implants: vec![],
            },
        ],
        last_clone_jump_date: Some(Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()),
        last_station_change_date: None,
    }
}

pub fn mock_esi_implants() -> Vec<i64> {
    vec![9899, 13258, 22118]
}

pub fn mock_esi_contacts() -> Vec<Contact> {
    vec![
        Contact {
            contact_id: 2112625428,
            contact_type: ContactType::Character,
            standing: 10.0,
        },
        Contact {
            contact_id: 98000002,
            contact_type: ContactType::Corporation,
            standing: -5.0,
        },
        Contact {
            contact_id: 99000002,
            contact_type: ContactType::Alliance,
            standing: 0.0,
        },
    ]
}

pub fn mock_esi_skills() -> CharacterSkills {
    CharacterSkills {
        skills: vec![
            Skill {
                skill_id: 3300,
                active_skill_level: 5,
                trained_skill_level: 5,
                skillpoints_in_skill: 256_000,
            },
            Skill {
                skill_id: 3327,
                active_skill_level: 4,
                trained_skill_level: 5,
                skillpoints_in_skill: 512_000,
            },
        ],
        total_sp: 5_500_000,
        unallocated_sp: Some(150_000),
    }
}
