pub mod prelude;

pub mod character_clone;
pub mod character_contact;
pub mod character_implant;
pub mod character_jump_clone;
pub mod character_skill;
pub mod character_skill_meta;
pub mod etag;
pub mod eve_alliance;
pub mod eve_character;
pub mod eve_corporation;
pub mod eve_solar_system;
pub mod sea_orm_active_enums;
pub mod skillboard_user;
