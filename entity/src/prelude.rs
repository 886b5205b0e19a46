pub use super::character_clone::Entity as CharacterClone;
pub use super::character_contact::Entity as CharacterContact;
pub use super::character_implant::Entity as CharacterImplant;
pub use super::character_jump_clone::Entity as CharacterJumpClone;
pub use super::character_skill::Entity as CharacterSkill;
pub use super::character_skill_meta::Entity as CharacterSkillMeta;
pub use super::etag::Entity as Etag;
pub use super::eve_alliance::Entity as EveAlliance;
pub use super::eve_character::Entity as EveCharacter;
pub use super::eve_corporation::Entity as EveCorporation;
pub use super::eve_solar_system::Entity as EveSolarSystem;
pub use super::skillboard_user::Entity as SkillboardUser;
