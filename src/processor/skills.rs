use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Error,
    processor::{scope::Scope, ScopeProcessor},
    sync::{skill::SkillSync, Synchronizer},
};

pub struct SkillProcessor {
    skills: Arc<Synchronizer<SkillSync>>,
}

impl SkillProcessor {
    pub fn new(skills: Arc<Synchronizer<SkillSync>>) -> Self {
        Self { skills }
    }
}

#[async_trait]
impl ScopeProcessor for SkillProcessor {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::ReadSkills]
    }

    async fn process(&self, user: &entity::skillboard_user::Model) -> Result<(), Error> {
        self.skills
            .get_or_refresh(user.character_id, Some(&user.access_token))
            .await?;

        Ok(())
    }
}
