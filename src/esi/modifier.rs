//! Composable request/response interceptors for the ESI client.
//!
//! Each modifier sees the outgoing request once (`before`) and the incoming
//! response once (`after`); a modifier that only cares about one phase leaves
//! the default no-op for the other. A modifier error aborts the in-flight
//! call and propagates to the caller. Ordering among independent modifiers
//! carries no meaning.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{header, RequestBuilder, Response};
use tracing::warn;

use crate::{
    error::{esi::EsiError, Error},
    etag::EtagService,
};

#[async_trait]
pub trait RequestModifier: Send + Sync {
    fn before(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(request)
    }

    async fn after(&self, _response: &Response) -> Result<(), Error> {
        Ok(())
    }
}

/// The ordered set of modifiers applied to one upstream call.
#[derive(Default)]
pub struct ModifierSet<'a> {
    modifiers: Vec<Box<dyn RequestModifier + 'a>>,
}

impl<'a> ModifierSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, modifier: impl RequestModifier + 'a) -> Self {
        self.modifiers.push(Box::new(modifier));
        self
    }

    pub(crate) fn apply_before(&self, mut request: RequestBuilder) -> Result<RequestBuilder, Error> {
        for modifier in &self.modifiers {
            request = modifier.before(request)?;
        }

        Ok(request)
    }

    pub(crate) async fn apply_after(&self, response: &Response) -> Result<(), Error> {
        for modifier in &self.modifiers {
            modifier.after(response).await?;
        }

        Ok(())
    }
}

/// Attaches the principal's access token. Constructed only when a non-empty
/// token is available; unauthenticated calls simply omit the modifier.
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl RequestModifier for BearerToken {
    fn before(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(request.header(header::AUTHORIZATION, format!("Bearer {}", self.token)))
    }
}

/// Attaches `If-None-Match` with the last seen ETag so unchanged resources
/// come back as 304 with no body.
pub struct IfNoneMatch {
    etag: String,
}

impl IfNoneMatch {
    pub fn new(etag: &str) -> Self {
        Self {
            etag: etag.to_string(),
        }
    }
}

#[async_trait]
impl RequestModifier for IfNoneMatch {
    fn before(&self, request: RequestBuilder) -> Result<RequestBuilder, Error> {
        Ok(request.header(header::IF_NONE_MATCH, &self.etag))
    }
}

/// Captures `ETag` and `Expires` from the response and upserts the freshness
/// token for the resource. Runs on both 200 and 304 responses, so a 304 still
/// extends the freshness window.
pub struct CaptureEtag<'a> {
    etags: &'a EtagService,
    resource_key: String,
    /// Floor for the freshness window; wins over a shorter `Expires` header.
    min_expiry: Option<NaiveDateTime>,
}

impl<'a> CaptureEtag<'a> {
    pub fn new(
        etags: &'a EtagService,
        resource_key: String,
        min_expiry: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            etags,
            resource_key,
            min_expiry,
        }
    }
}

#[async_trait]
impl RequestModifier for CaptureEtag<'_> {
    async fn after(&self, response: &Response) -> Result<(), Error> {
        let headers = response.headers();

        let mut cached_until = (Utc::now() + chrono::Duration::hours(1)).naive_utc();
        if let Some(value) = headers.get(header::EXPIRES) {
            let raw = value.to_str().map_err(|_| EsiError::InvalidExpiry {
                value: format!("{value:?}"),
            })?;

            cached_until = DateTime::parse_from_rfc2822(raw)
                .map_err(|_| EsiError::InvalidExpiry {
                    value: raw.to_string(),
                })?
                .naive_utc();
        }

        if let Some(min_expiry) = self.min_expiry {
            if min_expiry > cached_until {
                cached_until = min_expiry;
            }
        }

        let Some(value) = headers.get(header::ETAG) else {
            return Ok(());
        };

        let Ok(etag) = value.to_str() else {
            warn!(resource_key = %self.resource_key, "ignoring non-ASCII ETag header");
            return Ok(());
        };

        if etag.is_empty() {
            return Ok(());
        }

        self.etags
            .put(&self.resource_key, etag, cached_until)
            .await?;

        Ok(())
    }
}
