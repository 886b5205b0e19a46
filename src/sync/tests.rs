use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use mockito::ServerGuard;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::{
    cache::{Cache, MemoryCache},
    error::cache::CacheError,
    esi::{endpoint::Endpoint, EsiClient},
    etag::EtagService,
    sync::{
        alliance::AllianceSync, contact::ContactSync, skill::SkillSync,
        solar_system::SolarSystemSync, SyncResource, Synchronizer,
    },
    util::test::db::setup_test_db,
    util::test::factory::{
        mock_esi_alliance, mock_esi_contacts, mock_esi_skills, mock_esi_solar_system,
    },
};

const TEST_USER_AGENT: &str = "skillboard-tests/0.1 (contact@example.com)";

struct Harness {
    server: ServerGuard,
    db: DatabaseConnection,
    cache: Arc<dyn Cache>,
    etags: EtagService,
    esi: EsiClient,
}

impl Harness {
    fn synchronizer<R: SyncResource>(&self, resource: R) -> Synchronizer<R> {
        Synchronizer::new(
            self.db.clone(),
            Arc::clone(&self.cache),
            self.etags.clone(),
            self.esi.clone(),
            resource,
        )
    }
}

async fn harness() -> Harness {
    let server = mockito::Server::new_async().await;
    let db = setup_test_db().await.unwrap();
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let etags = EtagService::new(db.clone(), Arc::clone(&cache));
    let esi = EsiClient::new(&server.url(), TEST_USER_AGENT).unwrap();

    Harness {
        server,
        db,
        cache,
        etags,
        esi,
    }
}

fn rfc2822_in(duration: chrono::Duration) -> String {
    (Utc::now() + duration).format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Expect a cold start to fetch, persist, record freshness, and warm the
/// cache so the next lookup makes no upstream call
#[tokio::test]
async fn cold_start_fetches_once_then_serves_from_cache() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    let body = serde_json::to_string(&mock_esi_alliance()).unwrap();
    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .with_status(200)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(AllianceSync);

    let first = synchronizer
        .get_or_refresh(alliance_id, None)
        .await
        .unwrap()
        .expect("alliance should be synced");
    assert_eq!(first.alliance_id, alliance_id);
    assert_eq!(first.name, "Test Alliance Please Ignore");

    let second = synchronizer
        .get_or_refresh(alliance_id, None)
        .await
        .unwrap()
        .expect("alliance should come from cache");
    assert_eq!(second.alliance_id, alliance_id);

    mock.assert_async().await;

    let token = harness
        .etags
        .get(&Endpoint::Alliance(alliance_id).resource_key())
        .await
        .unwrap()
        .expect("freshness token should be recorded");
    assert_eq!(token.etag, "\"v1\"");
    // Alliances carry a freshness floor well past the Expires header.
    assert!(token.cached_until > (Utc::now() + chrono::Duration::days(13)).naive_utc());
}

/// Expect a stored entity with an unexpired freshness token to be served
/// without any upstream call, even with a cold cache
#[tokio::test]
async fn fresh_token_skips_upstream_entirely() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    crate::data::alliance::AllianceRepository::new(&harness.db)
        .create(alliance_id, mock_esi_alliance())
        .await
        .unwrap();
    harness
        .etags
        .put(
            &Endpoint::Alliance(alliance_id).resource_key(),
            "\"v1\"",
            (Utc::now() + chrono::Duration::hours(2)).naive_utc(),
        )
        .await
        .unwrap();

    // Simulate a restart: the freshness token survives in the database but
    // the cache starts cold.
    let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    let etags = EtagService::new(harness.db.clone(), Arc::clone(&cache));
    let synchronizer = Synchronizer::new(
        harness.db.clone(),
        cache,
        etags,
        harness.esi.clone(),
        AllianceSync,
    );

    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .expect(0)
        .create_async()
        .await;

    let alliance = synchronizer
        .get_or_refresh(alliance_id, None)
        .await
        .unwrap()
        .expect("stored alliance should be served");
    assert_eq!(alliance.alliance_id, alliance_id);

    mock.assert_async().await;
}

/// Expect an expired token to trigger a conditional request, and a 304 to
/// revalidate the stored copy without rewriting it
#[tokio::test]
async fn expired_token_revalidates_with_304() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    let created = crate::data::alliance::AllianceRepository::new(&harness.db)
        .create(alliance_id, mock_esi_alliance())
        .await
        .unwrap();
    harness
        .etags
        .put(
            &Endpoint::Alliance(alliance_id).resource_key(),
            "\"v1\"",
            (Utc::now() - chrono::Duration::hours(1)).naive_utc(),
        )
        .await
        .unwrap();

    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .match_header("if-none-match", "\"v1\"")
        .with_status(304)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(AllianceSync);

    let alliance = synchronizer
        .get_or_refresh(alliance_id, None)
        .await
        .unwrap()
        .expect("stored alliance should be revalidated");
    assert_eq!(alliance.id, created.id);
    assert_eq!(alliance.updated_at, created.updated_at);

    mock.assert_async().await;

    // The 304 extended the freshness window.
    let token = harness
        .etags
        .get(&Endpoint::Alliance(alliance_id).resource_key())
        .await
        .unwrap()
        .unwrap();
    assert!(token.cached_until > Utc::now().naive_utc());
}

/// Expect a token expiring within the grace period to revalidate rather
/// than be served as fresh
#[tokio::test]
async fn token_inside_grace_period_revalidates() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    crate::data::alliance::AllianceRepository::new(&harness.db)
        .create(alliance_id, mock_esi_alliance())
        .await
        .unwrap();
    // Still in the future, but inside the 60 second grace period.
    harness
        .etags
        .put(
            &Endpoint::Alliance(alliance_id).resource_key(),
            "\"v1\"",
            (Utc::now() + chrono::Duration::seconds(30)).naive_utc(),
        )
        .await
        .unwrap();

    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .match_header("if-none-match", "\"v1\"")
        .with_status(304)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(AllianceSync);
    synchronizer
        .get_or_refresh(alliance_id, None)
        .await
        .unwrap()
        .expect("stored alliance should be revalidated");

    mock.assert_async().await;
}

/// Expect Ok(None) when upstream answers 304 for an entity that was never
/// persisted locally
#[tokio::test]
async fn revalidated_but_never_persisted_yields_none() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    harness
        .etags
        .put(
            &Endpoint::Alliance(alliance_id).resource_key(),
            "\"v1\"",
            (Utc::now() - chrono::Duration::hours(1)).naive_utc(),
        )
        .await
        .unwrap();

    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .with_status(304)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(AllianceSync);
    let result = synchronizer.get_or_refresh(alliance_id, None).await.unwrap();

    assert!(result.is_none());
    mock.assert_async().await;
}

/// Expect a 200 on an existing entity to update the row in place
#[tokio::test]
async fn changed_entity_updates_existing_row() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    let created = crate::data::alliance::AllianceRepository::new(&harness.db)
        .create(alliance_id, mock_esi_alliance())
        .await
        .unwrap();

    let mut changed = mock_esi_alliance();
    changed.name = "Reformed Test Alliance".to_string();
    let body = serde_json::to_string(&changed).unwrap();

    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .with_status(200)
        .with_header("etag", "\"v2\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(AllianceSync);
    let alliance = synchronizer
        .get_or_refresh(alliance_id, None)
        .await
        .unwrap()
        .expect("alliance should be updated");

    assert_eq!(alliance.id, created.id);
    assert_eq!(alliance.name, "Reformed Test Alliance");
    assert_eq!(alliance.created_at, created.created_at);

    let rows = entity::prelude::EveAlliance::find().count(&harness.db).await.unwrap();
    assert_eq!(rows, 1);

    mock.assert_async().await;
}

/// Expect static universe data to carry a long freshness floor
#[tokio::test]
async fn solar_system_gets_extended_freshness() {
    let mut harness = harness().await;
    let system_id = 30000142;

    let body = serde_json::to_string(&mock_esi_solar_system()).unwrap();
    let mock = harness
        .server
        .mock("GET", "/v4/universe/systems/30000142/")
        .with_status(200)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(SolarSystemSync);
    let system = synchronizer
        .get_or_refresh(system_id, None)
        .await
        .unwrap()
        .expect("system should be synced");

    assert_eq!(system.system_id, system_id);
    assert_eq!(system.name, "Jita");

    mock.assert_async().await;

    let token = harness
        .etags
        .get(&Endpoint::SolarSystem(system_id).resource_key())
        .await
        .unwrap()
        .unwrap();
    assert!(token.cached_until > (Utc::now() + chrono::Duration::days(29)).naive_utc());
}

/// Expect concurrent lookups of one entity to make a single upstream call
#[tokio::test]
async fn concurrent_lookups_single_flight() {
    let mut harness = harness().await;
    let alliance_id = 99000001;

    let body = serde_json::to_string(&mock_esi_alliance()).unwrap();
    let mock = harness
        .server
        .mock("GET", "/v4/alliances/99000001/")
        .with_status(200)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = Arc::new(harness.synchronizer(AllianceSync));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let synchronizer = Arc::clone(&synchronizer);
        handles.push(tokio::spawn(async move {
            synchronizer.get_or_refresh(alliance_id, None).await
        }));
    }

    for handle in handles {
        let alliance = handle.await.unwrap().unwrap().expect("alliance synced");
        assert_eq!(alliance.alliance_id, alliance_id);
    }

    mock.assert_async().await;
}

/// Expect authenticated resources to present the bearer token upstream
#[tokio::test]
async fn authenticated_fetch_sends_bearer_token() {
    let mut harness = harness().await;
    let character_id = 2114794365;

    let body = serde_json::to_string(&mock_esi_skills()).unwrap();
    let mock = harness
        .server
        .mock("GET", "/v2/characters/2114794365/skills/")
        .match_header("authorization", "Bearer token123")
        .with_status(200)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::minutes(20)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(SkillSync);
    let state = synchronizer
        .get_or_refresh(character_id, Some("token123"))
        .await
        .unwrap()
        .expect("skills should be synced");

    assert_eq!(state.meta.total_sp, 5_500_000);
    assert_eq!(state.skills.len(), 2);

    mock.assert_async().await;
}

/// Expect set-layout resources to round-trip through the cache
#[tokio::test]
async fn contacts_round_trip_through_set_cache() {
    let mut harness = harness().await;
    let character_id = 2114794365;

    let body = serde_json::to_string(&mock_esi_contacts()).unwrap();
    let mock = harness
        .server
        .mock("GET", "/v2/characters/2114794365/contacts/")
        .with_status(200)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::minutes(20)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = harness.synchronizer(ContactSync);

    let first = synchronizer
        .get_or_refresh(character_id, Some("token123"))
        .await
        .unwrap()
        .expect("contacts should be synced");
    assert_eq!(first.len(), 3);

    // Second lookup is answered by the cached set, sorted by contact id.
    let second = synchronizer
        .get_or_refresh(character_id, Some("token123"))
        .await
        .unwrap()
        .expect("contacts should come from cache");
    let ids: Vec<i64> = second.iter().map(|contact| contact.contact_id).collect();
    assert_eq!(ids, vec![98000002, 99000002, 2112625428]);

    mock.assert_async().await;
}

struct BrokenCache;

#[async_trait]
impl Cache for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        broken()
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        broken()
    }

    async fn set_members(&self, _key: &str) -> Result<Vec<Vec<u8>>, CacheError> {
        broken()
    }

    async fn set_replace(
        &self,
        _key: &str,
        _values: Vec<Vec<u8>>,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        broken()
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        broken()
    }
}

fn broken<T>() -> Result<T, CacheError> {
    use serde::de::Error as _;

    Err(CacheError::Decode(serde_json::Error::custom(
        "cache unavailable",
    )))
}

/// Expect a completely unavailable cache to degrade to store and upstream,
/// never to a caller-visible error
#[tokio::test]
async fn cache_failures_are_not_fatal() {
    let mut server = mockito::Server::new_async().await;
    let db = setup_test_db().await.unwrap();
    let cache: Arc<dyn Cache> = Arc::new(BrokenCache);
    let etags = EtagService::new(db.clone(), Arc::clone(&cache));
    let esi = EsiClient::new(&server.url(), TEST_USER_AGENT).unwrap();

    let body = serde_json::to_string(&mock_esi_alliance()).unwrap();
    let mock = server
        .mock("GET", "/v4/alliances/99000001/")
        .with_status(200)
        .with_header("etag", "\"v1\"")
        .with_header("expires", &rfc2822_in(chrono::Duration::hours(1)))
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let synchronizer = Synchronizer::new(db, cache, etags, esi, AllianceSync);

    let first = synchronizer
        .get_or_refresh(99000001, None)
        .await
        .unwrap()
        .expect("alliance synced despite broken cache");
    assert_eq!(first.alliance_id, 99000001);

    // With no cache, the next lookup revalidates upstream again only after
    // the freshness window; here the token is fresh, so the store answers.
    let second = synchronizer
        .get_or_refresh(99000001, None)
        .await
        .unwrap()
        .expect("store answers while the token is fresh");
    assert_eq!(second.alliance_id, 99000001);

    mock.assert_async().await;
}
