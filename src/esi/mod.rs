//! Upstream ESI client.
//!
//! One typed fetch per entity over a shared request loop that speaks the
//! conditional-request protocol: 200 decodes the body, 304 short-circuits
//! with no decode, other 4xx responses are fatal and carry the body for
//! diagnostics, and 5xx/network failures retry after a fixed delay. Error
//! limit responses (420/429) honor the reset header before retrying. The
//! loop holds no retry cap of its own; each attempt is bounded by the
//! transport timeout and the whole call stops when the caller's future is
//! dropped.

pub mod endpoint;
pub mod model;
pub mod modifier;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{esi::EsiError, Error},
    esi::{endpoint::Endpoint, modifier::ModifierSet},
};

pub const DEFAULT_BASE_URL: &str = "https://esi.evetech.net";

/// Hard ceiling on a single attempt, independent of caller deadlines.
const TRANSPORT_TIMEOUT: Duration = Duration::from_secs(5);
/// Fixed delay between retries of a failed attempt.
const RETRY_DELAY: Duration = Duration::from_millis(500);
/// Fallback wait when an error-limit response carries no reset header.
const ERROR_LIMIT_FALLBACK: Duration = Duration::from_secs(10);

const ERROR_LIMIT_RESET_HEADER: &str = "x-esi-error-limit-reset";
const ERROR_LIMITED: u16 = 420;

/// Outcome of one conditional fetch.
#[derive(Clone, Debug)]
pub enum FetchOutcome<T> {
    /// 200: the decoded, current upstream state.
    Fresh(T),
    /// 304: unchanged since the presented ETag; no body was sent.
    NotModified,
}

#[derive(Clone)]
pub struct EsiClient {
    http: reqwest::Client,
    base_url: String,
}

impl EsiClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(TRANSPORT_TIMEOUT)
            .build()
            .map_err(EsiError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn alliance(
        &self,
        alliance_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<model::Alliance>, Error> {
        let outcome = self
            .get::<model::Alliance>(&Endpoint::Alliance(alliance_id), mods)
            .await?;

        Ok(outcome.map_fresh(|mut alliance| {
            if alliance.id == 0 {
                alliance.id = alliance_id;
            }
            alliance
        }))
    }

    pub async fn corporation(
        &self,
        corporation_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<model::Corporation>, Error> {
        let outcome = self
            .get::<model::Corporation>(&Endpoint::Corporation(corporation_id), mods)
            .await?;

        Ok(outcome.map_fresh(|mut corporation| {
            if corporation.id == 0 {
                corporation.id = corporation_id;
            }
            corporation
        }))
    }

    pub async fn character(
        &self,
        character_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<model::Character>, Error> {
        let outcome = self
            .get::<model::Character>(&Endpoint::Character(character_id), mods)
            .await?;

        Ok(outcome.map_fresh(|mut character| {
            if character.id == 0 {
                character.id = character_id;
            }
            character
        }))
    }

    pub async fn character_clones(
        &self,
        character_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<model::CharacterClones>, Error> {
        self.get(&Endpoint::CharacterClones(character_id), mods)
            .await
    }

    pub async fn character_implants(
        &self,
        character_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Vec<i64>>, Error> {
        self.get(&Endpoint::CharacterImplants(character_id), mods)
            .await
    }

    pub async fn character_contacts(
        &self,
        character_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<Vec<model::Contact>>, Error> {
        self.get(&Endpoint::CharacterContacts(character_id), mods)
            .await
    }

    pub async fn character_skills(
        &self,
        character_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<model::CharacterSkills>, Error> {
        self.get(&Endpoint::CharacterSkills(character_id), mods)
            .await
    }

    pub async fn solar_system(
        &self,
        system_id: i64,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<model::SolarSystem>, Error> {
        let outcome = self
            .get::<model::SolarSystem>(&Endpoint::SolarSystem(system_id), mods)
            .await?;

        Ok(outcome.map_fresh(|mut system| {
            if system.system_id == 0 {
                system.system_id = system_id;
            }
            system
        }))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        mods: &ModifierSet<'_>,
    ) -> Result<FetchOutcome<T>, Error> {
        let path = endpoint.path();
        let url = format!("{}{}", self.base_url, path);

        loop {
            let request = mods.apply_before(self.http.get(&url))?;

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    warn!(%path, "ESI request failed, retrying: {err}");
                    tokio::time::sleep(RETRY_DELAY).await;
                    continue;
                }
            };

            let status = response.status();
            debug!(%path, status = status.as_u16(), "GET ESI");

            if status.is_server_error() {
                warn!(%path, status = status.as_u16(), "ESI server error, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }

            if status.as_u16() == ERROR_LIMITED || status == StatusCode::TOO_MANY_REQUESTS {
                let wait = response
                    .headers()
                    .get(ERROR_LIMIT_RESET_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(ERROR_LIMIT_FALLBACK);

                warn!(%path, wait_secs = wait.as_secs(), "ESI error limited, backing off");
                tokio::time::sleep(wait).await;
                continue;
            }

            mods.apply_after(&response).await?;

            if status == StatusCode::NOT_MODIFIED {
                return Ok(FetchOutcome::NotModified);
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EsiError::Rejected { path, status, body }.into());
            }

            let value = response
                .json::<T>()
                .await
                .map_err(|source| EsiError::Decode { path, source })?;

            return Ok(FetchOutcome::Fresh(value));
        }
    }
}

impl<T> FetchOutcome<T> {
    fn map_fresh(self, f: impl FnOnce(T) -> T) -> Self {
        match self {
            Self::Fresh(value) => Self::Fresh(f(value)),
            Self::NotModified => Self::NotModified,
        }
    }
}
