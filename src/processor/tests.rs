use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{esi::EsiError, Error},
    processor::{scope::Scope, Dispatcher, ScopeProcessor},
};

struct RecordingProcessor {
    name: &'static str,
    required: &'static [Scope],
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingProcessor {
    fn new(name: &'static str, required: &'static [Scope]) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let processor = Arc::new(Self {
            name,
            required,
            calls: Arc::clone(&calls),
            fail: false,
        });

        (processor, calls)
    }

    fn failing(name: &'static str, required: &'static [Scope]) -> Arc<Self> {
        Arc::new(Self {
            name,
            required,
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        })
    }
}

#[async_trait]
impl ScopeProcessor for RecordingProcessor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn scopes(&self) -> &'static [Scope] {
        self.required
    }

    async fn process(&self, _user: &entity::skillboard_user::Model) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(EsiError::Rejected {
                path: "/v2/characters/1/skills/".to_string(),
                status: reqwest::StatusCode::FORBIDDEN,
                body: "token invalid".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn user_granting(scopes: &[&str]) -> entity::skillboard_user::Model {
    let now = Utc::now().naive_utc();

    entity::skillboard_user::Model {
        id: Uuid::new_v4(),
        character_id: 2114794365,
        access_token: "token".to_string(),
        scopes: serde_json::to_string(scopes).unwrap(),
        is_new: true,
        last_processed: None,
        created_at: now,
        updated_at: now,
    }
}

/// Expect a processor to run only when every declared scope is granted
#[tokio::test]
async fn all_scopes_required() {
    let (clones_only, clones_calls) =
        RecordingProcessor::new("clones_only", &[Scope::ReadClones]);
    let (clones_and_implants, both_calls) = RecordingProcessor::new(
        "clones_and_implants",
        &[Scope::ReadClones, Scope::ReadImplants],
    );

    let dispatcher = Dispatcher::new(vec![clones_only, clones_and_implants]);
    let user = user_granting(&["esi-clones.read_clones.v1"]);

    let report = dispatcher.dispatch(&user).await.unwrap();

    assert_eq!(clones_calls.load(Ordering::SeqCst), 1);
    assert_eq!(both_calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.ran, vec!["clones_only"]);
    assert_eq!(report.skipped, vec!["clones_and_implants"]);
    assert!(report.failures.is_empty());
}

/// Expect a processor with no declared scopes to always run
#[tokio::test]
async fn scopeless_processor_always_runs() {
    let (public, calls) = RecordingProcessor::new("public_info", &[]);

    let dispatcher = Dispatcher::new(vec![public]);
    let user = user_granting(&[]);

    let report = dispatcher.dispatch(&user).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.ran, vec!["public_info"]);
}

/// Expect a failing processor to be recorded without stopping the sweep
#[tokio::test]
async fn failure_does_not_abort_the_sweep() {
    let failing = RecordingProcessor::failing("skills", &[Scope::ReadSkills]);
    let (contacts, contacts_calls) = RecordingProcessor::new("contacts", &[Scope::ReadContacts]);

    let dispatcher = Dispatcher::new(vec![failing, contacts]);
    let user = user_granting(&[
        "esi-skills.read_skills.v1",
        "esi-characters.read_contacts.v1",
    ]);

    let report = dispatcher.dispatch(&user).await.unwrap();

    assert_eq!(contacts_calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.ran, vec!["contacts"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "skills");
}

/// Expect unrecognized granted scopes to be ignored, not to poison dispatch
#[tokio::test]
async fn unknown_granted_scopes_are_ignored() {
    let (skills, calls) = RecordingProcessor::new("skills", &[Scope::ReadSkills]);

    let dispatcher = Dispatcher::new(vec![skills]);
    let user = user_granting(&["esi-mail.read_mail.v1", "esi-skills.read_skills.v1"]);

    let report = dispatcher.dispatch(&user).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.ran, vec!["skills"]);
}

/// Expect a malformed stored scope set to surface as a parse error
#[tokio::test]
async fn malformed_scope_json_is_an_error() {
    let (skills, calls) = RecordingProcessor::new("skills", &[Scope::ReadSkills]);

    let dispatcher = Dispatcher::new(vec![skills]);
    let mut user = user_granting(&[]);
    user.scopes = "not json".to_string();

    let result = dispatcher.dispatch(&user).await;

    assert!(matches!(result, Err(Error::Parse(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
