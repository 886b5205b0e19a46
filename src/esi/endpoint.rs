use sha2::{Digest, Sha256};

/// The closed set of ESI endpoints this mirror reads from, each templated by
/// the entity id it addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Alliance(i64),
    Corporation(i64),
    Character(i64),
    CharacterClones(i64),
    CharacterImplants(i64),
    CharacterContacts(i64),
    CharacterSkills(i64),
    SolarSystem(i64),
}

impl Endpoint {
    /// Versioned request path relative to the ESI host.
    pub fn path(&self) -> String {
        match self {
            Self::Alliance(id) => format!("/v4/alliances/{id}/"),
            Self::Corporation(id) => format!("/v5/corporations/{id}/"),
            Self::Character(id) => format!("/v5/characters/{id}/"),
            Self::CharacterClones(id) => format!("/v4/characters/{id}/clones/"),
            Self::CharacterImplants(id) => format!("/v2/characters/{id}/implants/"),
            Self::CharacterContacts(id) => format!("/v2/characters/{id}/contacts/"),
            Self::CharacterSkills(id) => format!("/v2/characters/{id}/skills/"),
            Self::SolarSystem(id) => format!("/v4/universe/systems/{id}/"),
        }
    }

    /// Deterministic key for freshness metadata: a hash of the request path,
    /// so every caller asking for the same logical resource lands on the same
    /// freshness token regardless of call order.
    pub fn resource_key(&self) -> String {
        let digest = Sha256::digest(self.path().as_bytes());
        format!("{digest:x}")
    }

    /// Whether requests to this endpoint carry the principal's bearer token.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::CharacterClones(_)
                | Self::CharacterImplants(_)
                | Self::CharacterContacts(_)
                | Self::CharacterSkills(_)
        )
    }
}
