use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Error,
    processor::{scope::Scope, ScopeProcessor},
    sync::{contact::ContactSync, Synchronizer},
};

pub struct ContactProcessor {
    contacts: Arc<Synchronizer<ContactSync>>,
}

impl ContactProcessor {
    pub fn new(contacts: Arc<Synchronizer<ContactSync>>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ScopeProcessor for ContactProcessor {
    fn name(&self) -> &'static str {
        "contacts"
    }

    fn scopes(&self) -> &'static [Scope] {
        &[Scope::ReadContacts]
    }

    async fn process(&self, user: &entity::skillboard_user::Model) -> Result<(), Error> {
        self.contacts
            .get_or_refresh(user.character_id, Some(&user.access_token))
            .await?;

        Ok(())
    }
}
