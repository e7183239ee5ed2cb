//! 릴레이 통합 테스트
//!
//! mockito 업스트림 앞에 실제 릴레이 서버를 띄우고 reqwest로 호출한다.

use emailai_core::config::AppConfig;
use emailai_relay::error::RELAY_ERROR_MESSAGE;
use emailai_relay::RelayServer;
use mockito::Matcher;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::watch;

struct RunningRelay {
    url: String,
    shutdown_tx: watch::Sender<bool>,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl RunningRelay {
    async fn start(upstream_base: &str) -> Self {
        let mut config = AppConfig::default_config();
        config.service.base_url = Some(upstream_base.to_string());
        config.service.request_timeout_ms = 2_000;

        let server = RelayServer::new(&config).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/classify", listener.local_addr().unwrap());

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(server.serve(listener, shutdown_rx));

        Self {
            url,
            shutdown_tx,
            handle,
        }
    }

    async fn stop(self) {
        self.shutdown_tx.send(true).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn forwards_body_and_relays_json() {
    let mut upstream = mockito::Server::new_async().await;
    let upstream_body = json!({
        "success": true,
        "result": {"category": "Produtivo"},
        "analyzedAt": "2024-01-01T00:00:00Z"
    });
    let mock = upstream
        .mock("POST", "/api/classify")
        .match_body(Matcher::Json(json!({
            "emailContent": "Preciso do relatório",
            "fileName": "a.txt"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(upstream_body.to_string())
        .expect(1)
        .create_async()
        .await;

    let relay = RunningRelay::start(&upstream.url()).await;

    let resp = reqwest::Client::new()
        .post(&relay.url)
        .json(&json!({"emailContent": "Preciso do relatório", "fileName": "a.txt"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, upstream_body);
    mock.assert_async().await;

    relay.stop().await;
}

#[tokio::test]
async fn upstream_error_becomes_fixed_500() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("POST", "/api/classify")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let relay = RunningRelay::start(&upstream.url()).await;

    let resp = reqwest::Client::new()
        .post(&relay.url)
        .json(&json!({"emailContent": "Olá"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"error": RELAY_ERROR_MESSAGE}));

    relay.stop().await;
}

#[tokio::test]
async fn unreachable_upstream_becomes_fixed_500() {
    // 바인드되지 않은 포트
    let relay = RunningRelay::start("http://127.0.0.1:9").await;

    let resp = reqwest::Client::new()
        .post(&relay.url)
        .json(&json!({"emailContent": "Olá"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], RELAY_ERROR_MESSAGE);

    relay.stop().await;
}

#[tokio::test]
async fn invalid_json_body_is_rejected_without_upstream_call() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("POST", "/api/classify")
        .expect(0)
        .create_async()
        .await;

    let relay = RunningRelay::start(&upstream.url()).await;

    let resp = reqwest::Client::new()
        .post(&relay.url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    mock.assert_async().await;

    relay.stop().await;
}
