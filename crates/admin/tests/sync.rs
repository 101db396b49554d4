//! Client/server integration tests: the synced store against a real
//! data API instance bound to an ephemeral loopback port, backed by the
//! in-memory key-value store.

#![allow(clippy::unwrap_used)]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Map, Value, json};
use url::Url;

use courtside_admin::{ApiClient, Session, SyncedStore};
use courtside_api::config::ApiConfig;
use courtside_api::kv::MemoryKv;
use courtside_api::state::AppState;
use courtside_core::{Collection, Record};

const PASSWORD: &str = "net-cord-pass";

async fn spawn_api() -> Url {
    let config = ApiConfig {
        database_url: SecretString::from("postgres://unused/test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        admin_password: SecretString::from(PASSWORD),
        sentry_dsn: None,
    };
    let state = AppState::new(config, Arc::new(MemoryKv::new()));
    let app = courtside_api::routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}").parse().unwrap()
}

async fn logged_in_store(base_url: Url) -> SyncedStore {
    let client = ApiClient::new(base_url, Session::in_memory());
    client.login(PASSWORD).await.unwrap();
    SyncedStore::new(client)
}

/// Poll until `condition` holds, or panic after a couple of seconds.
async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("condition not met within timeout");
}

fn fields(value: Value) -> Map<String, Value> {
    Record::from_value(value).unwrap().into_fields()
}

#[tokio::test]
async fn test_login_seed_and_refresh() {
    let base_url = spawn_api().await;

    let client = ApiClient::new(base_url, Session::in_memory());
    assert!(client.login("wrong").await.unwrap_err().is_unauthorized());
    assert!(!client.session().is_authenticated());

    client.login(PASSWORD).await.unwrap();
    assert!(client.session().is_authenticated());

    assert_eq!(client.seed().await.unwrap(), "Default data seeded");
    assert_eq!(client.seed().await.unwrap(), "Data already seeded");

    let store = SyncedStore::new(client);
    store.refresh().await.unwrap();

    assert_eq!(store.get_all(Collection::Events).len(), 3);
    let mixer = store.get_by_id(Collection::Events, "evt-001").unwrap();
    assert_eq!(mixer.str_field("title"), Some("Spring Tennis Mixer & Social"));

    let stats = store.stats();
    assert_eq!(stats.visible_programs, 3);
    assert_eq!(stats.total_registrations, 40);
}

#[tokio::test]
async fn test_optimistic_create_reconciles_server_id() {
    let base_url = spawn_api().await;
    let store = logged_in_store(base_url).await;

    let optimistic = store.create_event(fields(json!({
        "title": "Moonlight Doubles",
        "date": "2026-07-04",
        "price": 15
    })));
    let temp_id = optimistic.id().unwrap().to_string();

    // The cache shows the record immediately, registrations zeroed
    let cached = store.get_by_id(Collection::Events, &temp_id).unwrap();
    assert_eq!(cached.number_field("registered"), Some(0.0));

    // The background push lands server-side and the temporary id is
    // swapped for the server-assigned one
    wait_for(|| {
        store
            .get_all(Collection::Events)
            .first()
            .and_then(Record::id)
            .is_some_and(|id| id != temp_id)
    })
    .await;

    let reconciled = store.get_all(Collection::Events);
    let record = reconciled.first().unwrap();
    assert!(record.id().unwrap().starts_with("evt-"));
    assert_eq!(record.str_field("title"), Some("Moonlight Doubles"));

    // Server agrees with the cache
    let server_side = store.client().fetch(Collection::Events).await.unwrap();
    assert_eq!(server_side.first().unwrap().id(), record.id());
}

#[tokio::test]
async fn test_update_and_delete_push_to_server() {
    let base_url = spawn_api().await;
    let store = logged_in_store(base_url).await;

    let created = store
        .client()
        .create(
            Collection::Posts,
            &Record::from_fields(fields(json!({"title": "Ladder Results", "type": "news"}))),
        )
        .await
        .unwrap();
    let id = created.id().unwrap().to_string();
    store.refresh().await.unwrap();

    // update: cache first, server eventually
    let updated = store
        .update(Collection::Posts, &id, fields(json!({"title": "Ladder Finals"})))
        .unwrap();
    assert_eq!(updated.str_field("title"), Some("Ladder Finals"));

    let client = store.client().clone();
    let id_for_poll = id.clone();
    wait_for_async(move || {
        let client = client.clone();
        let id = id_for_poll.clone();
        async move {
            client
                .fetch(Collection::Posts)
                .await
                .unwrap()
                .iter()
                .any(|r| r.id() == Some(id.as_str()) && r.str_field("title") == Some("Ladder Finals"))
        }
    })
    .await;

    // delete: gone locally at once, remotely soon after
    assert!(store.delete(Collection::Posts, &id));
    assert!(store.get_by_id(Collection::Posts, &id).is_none());

    let client = store.client().clone();
    wait_for_async(move || {
        let client = client.clone();
        async move { client.fetch(Collection::Posts).await.unwrap().is_empty() }
    })
    .await;
}

/// Async flavor of `wait_for` for conditions that hit the server.
async fn wait_for_async<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("condition not met within timeout");
}

#[tokio::test]
async fn test_rejected_push_clears_session_but_keeps_local_state() {
    let base_url = spawn_api().await;

    let session = Session::in_memory();
    session.set_token("bogus-token".to_string());
    let store = SyncedStore::new(ApiClient::new(base_url, session.clone()));

    let record = store.create(
        Collection::Announcements,
        fields(json!({"title": "Court 2 closed", "type": "banner"})),
    );

    // The server rejects the push; the session is cleared...
    wait_for(|| !session.is_authenticated()).await;

    // ...but the optimistic record stays in the cache (divergence is
    // accepted until the next refresh)
    assert!(
        store
            .get_by_id(Collection::Announcements, record.id().unwrap())
            .is_some()
    );
}

#[tokio::test]
async fn test_toggle_visibility_round_trip_through_cache() {
    let base_url = spawn_api().await;
    let store = logged_in_store(base_url).await;
    store.client().seed().await.unwrap();
    store.refresh().await.unwrap();

    let hidden = store
        .toggle_visibility(Collection::Products, "prod-001")
        .unwrap();
    assert!(!hidden.is_visible());
    assert_eq!(store.products().featured().len(), 0);

    let restored = store
        .toggle_visibility(Collection::Products, "prod-001")
        .unwrap();
    assert!(restored.is_visible());
    assert_eq!(store.products().featured().len(), 1);
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let base_url = spawn_api().await;
    let store = logged_in_store(base_url).await;
    store.client().seed().await.unwrap();
    store.refresh().await.unwrap();

    let exported = store.export_all();

    let fresh = logged_in_store(spawn_api().await).await;
    fresh.import_all(&exported).unwrap();
    assert_eq!(fresh.export_all(), exported);

    assert!(fresh.import_all("{broken").is_err());
}
