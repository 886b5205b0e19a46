use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::{
    error::Error,
    processor::{scope::Scope, ScopeProcessor},
    sync::{
        alliance::AllianceSync, character::CharacterSync, corporation::CorporationSync,
        Synchronizer,
    },
};

/// Mirrors the character's public sheet and follows its affiliation chain:
/// character, then employing corporation, then that corporation's alliance.
pub struct PublicInfoProcessor {
    characters: Arc<Synchronizer<CharacterSync>>,
    corporations: Arc<Synchronizer<CorporationSync>>,
    alliances: Arc<Synchronizer<AllianceSync>>,
}

impl PublicInfoProcessor {
    pub fn new(
        characters: Arc<Synchronizer<CharacterSync>>,
        corporations: Arc<Synchronizer<CorporationSync>>,
        alliances: Arc<Synchronizer<AllianceSync>>,
    ) -> Self {
        Self {
            characters,
            corporations,
            alliances,
        }
    }
}

#[async_trait]
impl ScopeProcessor for PublicInfoProcessor {
    fn name(&self) -> &'static str {
        "public_info"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[]
    }

    async fn process(&self, user: &entity::skillboard_user::Model) -> Result<(), Error> {
        let Some(character) = self
            .characters
            .get_or_refresh(user.character_id, None)
            .await?
        else {
            warn!(
                character_id = user.character_id,
                "character not available this pass"
            );
            return Ok(());
        };

        let Some(corporation) = self
            .corporations
            .get_or_refresh(character.corporation_id, None)
            .await?
        else {
            return Ok(());
        };

        if let Some(alliance_id) = corporation.alliance_id {
            self.alliances.get_or_refresh(alliance_id, None).await?;
        }

        Ok(())
    }
}
