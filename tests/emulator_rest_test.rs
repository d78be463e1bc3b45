//! Integration tests for the REST admin client against a fake emulator.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use pubsubc::config::{ProjectConfig, PushConfig};
use pubsubc::discovery::DiscoveredConfig;
use pubsubc::error::{ApiError, ProvisionError};
use pubsubc::provision::{provision, Provisioner, RunSummary};
use pubsubc::pubsub::{AdminClient, AdminSession, EmulatorClient};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct FakeEmulator {
    topics: Arc<Mutex<HashSet<String>>>,
    subscriptions: Arc<Mutex<HashMap<String, Value>>>,
}

async fn get_topic(
    State(state): State<FakeEmulator>,
    Path((project, topic)): Path<(String, String)>,
) -> impl IntoResponse {
    let name = format!("projects/{}/topics/{}", project, topic);
    if state.topics.lock().await.contains(&name) {
        (StatusCode::OK, Json(json!({ "name": name })))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 404, "message": "Topic not found" } })),
        )
    }
}

async fn create_topic(
    State(state): State<FakeEmulator>,
    Path((project, topic)): Path<(String, String)>,
) -> impl IntoResponse {
    if project == "broken" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "code": 500, "message": "boom" } })),
        );
    }
    let name = format!("projects/{}/topics/{}", project, topic);
    if !state.topics.lock().await.insert(name.clone()) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": { "code": 409, "message": "Topic already exists" } })),
        );
    }
    (StatusCode::OK, Json(json!({ "name": name })))
}

async fn create_subscription(
    State(state): State<FakeEmulator>,
    Path((project, subscription)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let topic = body["topic"].as_str().unwrap_or_default().to_string();
    if !state.topics.lock().await.contains(&topic) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 404, "message": "Topic not found" } })),
        );
    }

    let name = format!("projects/{}/subscriptions/{}", project, subscription);
    let mut subscriptions = state.subscriptions.lock().await;
    if subscriptions.contains_key(&name) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": { "code": 409, "message": "Subscription already exists" } })),
        );
    }
    subscriptions.insert(name, body.clone());
    (StatusCode::OK, Json(body))
}

/// Start the fake emulator on an ephemeral port and return its address.
async fn start_emulator() -> (FakeEmulator, String) {
    let state = FakeEmulator::default();

    let app = Router::new()
        .route(
            "/v1/projects/:project/topics/:topic",
            get(get_topic).put(create_topic),
        )
        .route(
            "/v1/projects/:project/subscriptions/:subscription",
            put(create_subscription),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (state, addr.to_string())
}

#[tokio::test]
async fn test_topic_lifecycle() {
    let (state, host) = start_emulator().await;
    let client = EmulatorClient::with_host(&host);
    let session = client.connect("proj1").await.unwrap();

    assert!(!session.topic_exists("t1").await.unwrap());

    let handle = session.create_topic("t1").await.unwrap();
    assert_eq!(handle.resource_name(), "projects/proj1/topics/t1");
    assert!(session.topic_exists("t1").await.unwrap());
    assert!(state.topics.lock().await.contains("projects/proj1/topics/t1"));

    session.close().await;
}

#[tokio::test]
async fn test_create_pull_and_push_subscriptions() {
    let (state, host) = start_emulator().await;
    let client = EmulatorClient::with_host(&host);
    let session = client.connect("proj1").await.unwrap();
    let topic = session.create_topic("t2").await.unwrap();

    session.create_subscription("s1", &topic, None).await.unwrap();
    let push = PushConfig {
        endpoint: "http://host:8080".to_string(),
    };
    session
        .create_subscription("s2", &topic, Some(&push))
        .await
        .unwrap();

    let subscriptions = state.subscriptions.lock().await;
    let pull = &subscriptions["projects/proj1/subscriptions/s1"];
    assert_eq!(pull["topic"], "projects/proj1/topics/t2");
    assert!(pull.get("pushConfig").is_none());

    let push = &subscriptions["projects/proj1/subscriptions/s2"];
    assert_eq!(push["topic"], "projects/proj1/topics/t2");
    assert_eq!(push["pushConfig"]["pushEndpoint"], "http://host:8080");
}

#[tokio::test]
async fn test_duplicate_subscription_is_an_error() {
    let (_state, host) = start_emulator().await;
    let client = EmulatorClient::with_host(&host);
    let session = client.connect("proj1").await.unwrap();
    let topic = session.create_topic("t").await.unwrap();

    session.create_subscription("s", &topic, None).await.unwrap();
    let err = session
        .create_subscription("s", &topic, None)
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 409);
            assert!(body.contains("already exists"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_provision_example_end_to_end() {
    let (state, host) = start_emulator().await;
    let client = EmulatorClient::with_host(&host);
    let config = ProjectConfig::parse("proj1,t1,t2:s1:s2+host|8080", "PUBSUB_PROJECT1").unwrap();

    provision(&client, &config.project_id, &config.topics)
        .await
        .unwrap();

    let topics = state.topics.lock().await;
    assert!(topics.contains("projects/proj1/topics/t1"));
    assert!(topics.contains("projects/proj1/topics/t2"));

    let subscriptions = state.subscriptions.lock().await;
    assert_eq!(subscriptions.len(), 2);
    assert!(subscriptions["projects/proj1/subscriptions/s1"]
        .get("pushConfig")
        .is_none());
    assert_eq!(
        subscriptions["projects/proj1/subscriptions/s2"]["pushConfig"]["pushEndpoint"],
        "http://host:8080"
    );
}

#[tokio::test]
async fn test_reprovisioning_surfaces_as_failure() {
    let (state, host) = start_emulator().await;
    let provisioner = Provisioner::new(EmulatorClient::with_host(&host));
    let config = DiscoveredConfig::new("proj1,t1:s1", "PUBSUB_PROJECT1");

    let summary = provisioner
        .run(vec![config.clone(), config])
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            discovered: 2,
            skipped: 0,
            failed: 1,
            provisioned: 1,
        }
    );
    assert_eq!(state.topics.lock().await.len(), 1);
}

#[tokio::test]
async fn test_remote_failure_aborts_only_that_project() {
    let (state, host) = start_emulator().await;
    let provisioner = Provisioner::new(EmulatorClient::with_host(&host));

    let summary = provisioner
        .run(vec![
            DiscoveredConfig::new("broken,t1:s1", "PUBSUB_PROJECT1"),
            DiscoveredConfig::new("proj2,t2:s2", "PUBSUB_PROJECT2"),
        ])
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.provisioned, 1);
    assert!(state
        .subscriptions
        .lock()
        .await
        .contains_key("projects/proj2/subscriptions/s2"));
}

#[tokio::test]
async fn test_unreachable_emulator_is_not_fatal() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    drop(listener);

    let client = EmulatorClient::with_host(&host);
    let err = provision(&client, "proj1", &ProjectConfig::parse("proj1,t1", "x").unwrap().topics)
        .await
        .unwrap_err();

    assert!(!err.is_fatal());
    assert!(matches!(
        err,
        ProvisionError::TopicLookup { source: ApiError::Http(_), .. }
    ));
}

#[tokio::test]
async fn test_missing_emulator_host_is_fatal() {
    let client = EmulatorClient::new(&pubsubc::config::Settings::default());
    let provisioner = Provisioner::new(client);

    let err = provisioner
        .run(vec![DiscoveredConfig::new("proj1,t1", "PUBSUB_PROJECT1")])
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("\"proj1\""));
}
