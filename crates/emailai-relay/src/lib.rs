//! # emailai-relay
//!
//! 분류 서비스 앞단의 얇은 릴레이 서버.
//! Axum 기반, `POST /api/classify` 하나만 노출한다.
//!
//! 요청 JSON을 그대로 업스트림에 전달하고 성공 응답을 그대로 돌려준다.
//! 업스트림 오류나 연결 실패는 500과 고정 메시지로 바꾼다.

pub mod error;
pub mod handlers;

use axum::routing::post;
use axum::Router;
use emailai_core::config::AppConfig;
use emailai_core::error::CoreError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// 릴레이 상태
#[derive(Clone)]
pub struct RelayState {
    /// 업스트림 HTTP 클라이언트
    pub client: reqwest::Client,
    /// 업스트림 분류 엔드포인트 (전체 URL)
    pub upstream: String,
}

/// 라우터 구성
pub fn router(state: RelayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/classify", post(handlers::classify))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 릴레이 서버
pub struct RelayServer {
    addr: String,
    state: RelayState,
}

impl RelayServer {
    /// 설정에서 생성 (업스트림 = 해석된 분류 엔드포인트)
    pub fn new(config: &AppConfig) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            addr: format!("{}:{}", config.relay.host, config.relay.port),
            state: RelayState {
                client,
                upstream: config.service.endpoints().classify,
            },
        })
    }

    /// 바인드 주소
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// 업스트림 엔드포인트
    pub fn upstream(&self) -> &str {
        &self.state.upstream
    }

    /// 설정된 주소에 바인드 후 실행
    pub async fn run(self, shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.addr.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("잘못된 주소 {}: {}", self.addr, e),
            )
        })?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_rx).await
    }

    /// 이미 바인드된 리스너로 실행 (종료 신호까지)
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        info!(
            addr = %listener.local_addr()?,
            upstream = %self.state.upstream,
            "릴레이 서버 시작"
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(async move {
                loop {
                    if *shutdown_rx.borrow() {
                        info!("릴레이 종료 신호 수신");
                        break;
                    }
                    if shutdown_rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await?;

        info!("릴레이 서버 종료");
        Ok(())
    }
}
