use tracing::warn;

use crate::error::Error;

/// The closed set of ESI scopes this mirror acts on. Principals may grant
/// more; anything unrecognized is ignored at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    ReadClones,
    ReadImplants,
    ReadContacts,
    ReadSkills,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadClones => "esi-clones.read_clones.v1",
            Self::ReadImplants => "esi-clones.read_implants.v1",
            Self::ReadContacts => "esi-characters.read_contacts.v1",
            Self::ReadSkills => "esi-skills.read_skills.v1",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "esi-clones.read_clones.v1" => Some(Self::ReadClones),
            "esi-clones.read_implants.v1" => Some(Self::ReadImplants),
            "esi-characters.read_contacts.v1" => Some(Self::ReadContacts),
            "esi-skills.read_skills.v1" => Some(Self::ReadSkills),
            _ => None,
        }
    }
}

/// The scopes a principal granted, decoded from the stored JSON array.
/// Unrecognized scope strings are dropped with a warning.
pub fn granted(user: &entity::skillboard_user::Model) -> Result<Vec<Scope>, Error> {
    let raw: Vec<String> = serde_json::from_str(&user.scopes)
        .map_err(|err| Error::Parse(format!("user {} scopes: {err}", user.id)))?;

    let mut scopes = Vec::with_capacity(raw.len());
    for value in raw {
        match Scope::parse(&value) {
            Some(scope) => scopes.push(scope),
            None => warn!(scope = %value, "ignoring unrecognized scope"),
        }
    }

    Ok(scopes)
}
