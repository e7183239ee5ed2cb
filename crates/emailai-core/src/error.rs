//! EmailAI 핵심 에러 타입.
//!
//! 어댑터와 워크플로우 crate는 `CoreError`를 그대로 전파하거나
//! 자체 에러 타입에서 `#[from] CoreError`로 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 입력 획득과 서비스 호출, 설정/직렬화 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 지원하지 않는 업로드 파일 형식
    #[error("지원하지 않는 파일 형식: {0}")]
    UnsupportedFormat(String),

    /// PDF 텍스트 추출 실패 (추출 서비스 오류, 손상된 PDF 등)
    #[error("텍스트 추출 실패: {0}")]
    Extraction(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 2xx가 아닌 HTTP 응답
    #[error("HTTP 에러 ({status}): {body}")]
    Http {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (앞부분만)
        body: String,
    },

    /// 서비스가 `success: false`로 응답
    #[error("서비스가 요청을 거부함: {0}")]
    Rejected(String),

    /// 응답 본문 형식 오류
    #[error("잘못된 응답: {0}")]
    InvalidResponse(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_display_includes_status() {
        let err = CoreError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
