//! 릴레이 에러 처리.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// 클라이언트에 보내는 고정 에러 메시지
pub const RELAY_ERROR_MESSAGE: &str = "Erro ao conectar com o servidor de classificação.";

/// 릴레이 에러
///
/// 원인은 로그로만 남기고, 응답은 항상 500 + 고정 메시지.
#[derive(Debug, Error)]
pub enum RelayError {
    /// 요청 본문이 JSON이 아님
    #[error("잘못된 요청 본문: {0}")]
    InvalidBody(String),

    /// 업스트림 연결/읽기 실패
    #[error("업스트림 연결 실패: {0}")]
    Unreachable(String),

    /// 업스트림 비정상 응답
    #[error("업스트림 오류 응답 ({status}): {body}")]
    Upstream { status: u16, body: String },
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        error!(cause = %self, "릴레이 실패");

        let body = ErrorResponse {
            error: RELAY_ERROR_MESSAGE.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
