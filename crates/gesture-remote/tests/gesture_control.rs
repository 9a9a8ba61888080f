//! End-to-end tests for gesture polling against a mock backend

use gesture_remote::config::RemoteConfig;
use gesture_remote::gesture::GesturePoller;
use gesture_sdk::Gesture;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERVAL: Duration = Duration::from_millis(100);

fn gesture_response(label: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "gesture": label }))
}

async fn run_poller(config: &RemoteConfig, duration: Duration) -> Option<Gesture> {
    let client = Arc::new(config.backend_client().unwrap());
    let poller = GesturePoller::new(
        client.clone(),
        client,
        config.command_map(),
        config.poll_interval(),
    );
    let current = poller.subscribe();
    let shutdown = CancellationToken::new();
    let handle = poller.spawn(shutdown.clone());

    tokio::time::sleep(duration).await;
    shutdown.cancel();
    handle.await.unwrap();

    // Let dispatched commands reach the backend
    tokio::time::sleep(INTERVAL).await;
    let gesture = current.borrow().clone();
    gesture
}

#[tokio::test]
async fn test_steady_gesture_sends_one_command() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gesture"))
        .respond_with(gesture_response("play"))
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/spotify/play"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend)
        .await;

    let mut config = RemoteConfig::default();
    config.backend.base_url = backend.uri();
    config.poller.interval_ms = INTERVAL.as_millis() as u64;

    let gesture = run_poller(&config, INTERVAL * 5 + INTERVAL / 2).await;
    assert_eq!(gesture, Some(Gesture::from("play")));
}

#[tokio::test]
async fn test_change_sends_new_command_to_command_backend() {
    let gestures = MockServer::start().await;
    let commands = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gesture"))
        .respond_with(gesture_response("play"))
        .up_to_n_times(2)
        .mount(&gestures)
        .await;
    Mock::given(method("GET"))
        .and(path("/gesture"))
        .respond_with(gesture_response("pause"))
        .mount(&gestures)
        .await;

    Mock::given(method("POST"))
        .and(path("/spotify/play"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&commands)
        .await;
    Mock::given(method("POST"))
        .and(path("/spotify/pause"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&commands)
        .await;

    let mut config = RemoteConfig::default();
    config.backend.base_url = gestures.uri();
    config.backend.command_base_url = Some(commands.uri());
    config.poller.interval_ms = INTERVAL.as_millis() as u64;

    let gesture = run_poller(&config, INTERVAL * 5 + INTERVAL / 2).await;
    assert_eq!(gesture, Some(Gesture::from("pause")));
}

#[tokio::test]
async fn test_unbound_gesture_sends_nothing() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gesture"))
        .respond_with(gesture_response("spin"))
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;

    let mut config = RemoteConfig::default();
    config.backend.base_url = backend.uri();
    config.poller.interval_ms = INTERVAL.as_millis() as u64;

    let gesture = run_poller(&config, INTERVAL * 3 + INTERVAL / 2).await;
    assert_eq!(gesture, Some(Gesture::from("spin")));
}

#[tokio::test]
async fn test_backend_errors_keep_polling() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gesture"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/gesture"))
        .respond_with(gesture_response("like"))
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/spotify/like"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend)
        .await;

    let mut config = RemoteConfig::default();
    config.backend.base_url = backend.uri();
    config.poller.interval_ms = INTERVAL.as_millis() as u64;

    let gesture = run_poller(&config, INTERVAL * 5 + INTERVAL / 2).await;
    assert_eq!(gesture, Some(Gesture::from("like")));
}
