//! Scope-gated background processing.
//!
//! A processor bundles the synchronizers for one slice of a principal's data
//! and declares the ESI scopes it needs. The dispatcher runs every processor
//! whose declared scopes are all granted, sequentially, recording failures
//! without aborting the sweep. The service drains the refresh queue and
//! drives one dispatch per queued principal.

pub mod clones;
pub mod contacts;
pub mod public_info;
pub mod queue;
pub mod scope;
pub mod skills;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    data::user::UserRepository,
    error::{retry::ErrorRetryStrategy, Error},
    processor::{queue::RefreshQueue, scope::Scope},
};

#[async_trait]
pub trait ScopeProcessor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Scopes that must ALL be granted before this processor runs. An empty
    /// slice means always eligible.
    fn scopes(&self) -> &'static [Scope];

    async fn process(&self, user: &entity::skillboard_user::Model) -> Result<(), Error>;
}

/// Outcome of one dispatch sweep over the registered processors.
#[derive(Debug, Default)]
pub struct DispatchReport {
    pub ran: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub failures: Vec<(&'static str, Error)>,
}

pub struct Dispatcher {
    processors: Vec<Arc<dyn ScopeProcessor>>,
}

impl Dispatcher {
    /// The registry is fixed at startup; processors run in registration order.
    pub fn new(processors: Vec<Arc<dyn ScopeProcessor>>) -> Self {
        Self { processors }
    }

    pub async fn dispatch(
        &self,
        user: &entity::skillboard_user::Model,
    ) -> Result<DispatchReport, Error> {
        let granted = scope::granted(user)?;
        let mut report = DispatchReport::default();

        for processor in &self.processors {
            let eligible = processor
                .scopes()
                .iter()
                .all(|required| granted.contains(required));

            if !eligible {
                report.skipped.push(processor.name());
                continue;
            }

            match processor.process(user).await {
                Ok(()) => report.ran.push(processor.name()),
                Err(err) => {
                    error!(
                        processor = processor.name(),
                        character_id = user.character_id,
                        "processor failed: {err}"
                    );
                    report.failures.push((processor.name(), err));
                }
            }
        }

        Ok(report)
    }
}

pub struct ProcessorService {
    db: DatabaseConnection,
    queue: RefreshQueue,
    dispatcher: Dispatcher,
}

impl ProcessorService {
    pub fn new(db: DatabaseConnection, queue: RefreshQueue, dispatcher: Dispatcher) -> Self {
        Self {
            db,
            queue,
            dispatcher,
        }
    }

    /// Drain the refresh queue forever. Transient failures re-enqueue the
    /// user; permanent failures are logged and the entry is dropped.
    pub async fn run(&self) -> Result<(), Error> {
        info!("processor service started");

        loop {
            let user_id = self.queue.pop().await?;

            if let Err(err) = self.process_user(user_id).await {
                match err.to_retry_strategy() {
                    ErrorRetryStrategy::Retry => {
                        warn!(%user_id, "transient failure, re-enqueueing: {err}");
                        self.queue.push(user_id).await?;
                    }
                    ErrorRetryStrategy::Fail => {
                        error!(%user_id, "failed to process user: {err}");
                    }
                }
            }
        }
    }

    async fn process_user(&self, user_id: Uuid) -> Result<(), Error> {
        let repository = UserRepository::new(&self.db);

        let Some(user) = repository.get(user_id).await? else {
            warn!(%user_id, "queued user no longer exists, dropping");
            return Ok(());
        };

        let report = self.dispatcher.dispatch(&user).await?;
        info!(
            character_id = user.character_id,
            ran = report.ran.len(),
            skipped = report.skipped.len(),
            failures = report.failures.len(),
            "dispatch complete"
        );

        // A failed processor leaves last_processed untouched so the next
        // sweep retries this user.
        if report.failures.is_empty() {
            repository.mark_processed(user).await?;
        }

        Ok(())
    }
}
