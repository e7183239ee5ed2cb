//! 릴레이 핸들러.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::RelayError;
use crate::RelayState;

/// 업스트림 에러 본문 로그 최대 길이
const BODY_LOG_CHARS: usize = 200;

/// POST /api/classify
///
/// 본문을 변환 없이 업스트림으로 보내고, 성공 응답 JSON을 그대로 돌려준다.
pub async fn classify(
    State(state): State<RelayState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| RelayError::InvalidBody(e.to_string()))?;

    debug!(upstream = %state.upstream, size = body.len(), "분류 요청 전달");

    let resp = state
        .client
        .post(&state.upstream)
        .json(&payload)
        .send()
        .await
        .map_err(|e| RelayError::Unreachable(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(RelayError::Upstream {
            status: status.as_u16(),
            body: text.chars().take(BODY_LOG_CHARS).collect(),
        });
    }

    let data: Value = resp
        .json()
        .await
        .map_err(|e| RelayError::Unreachable(format!("응답 파싱 실패: {e}")))?;

    info!(status = %status, "업스트림 응답 수신");
    Ok(Json(data))
}
