use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Error,
    processor::{scope::Scope, ScopeProcessor},
    sync::{clone::CloneSync, implant::ImplantSync, Synchronizer},
};

/// Mirrors clone state and active implants. Both scopes are required; a
/// principal granting only one sees this processor skipped entirely.
pub struct CloneProcessor {
    clones: Arc<Synchronizer<CloneSync>>,
    implants: Arc<Synchronizer<ImplantSync>>,
}

impl CloneProcessor {
    pub fn new(
        clones: Arc<Synchronizer<CloneSync>>,
        implants: Arc<Synchronizer<ImplantSync>>,
    ) -> Self {
        Self { clones, implants }
    }
}

#[async_trait]
impl ScopeProcessor for CloneProcessor {
    fn name(&self) -> &'static str {
        "clones"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::ReadClones, Scope::ReadImplants]
    }

    async fn process(&self, user: &entity::skillboard_user::Model) -> Result<(), Error> {
        self.clones
            .get_or_refresh(user.character_id, Some(&user.access_token))
            .await?;
        self.implants
            .get_or_refresh(user.character_id, Some(&user.access_token))
            .await?;

        Ok(())
    }
}
