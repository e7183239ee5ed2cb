//! # emailai-network
//!
//! 외부 서비스 HTTP 어댑터.
//! 분류 서비스(`POST /api/classify`)와 PDF 추출 서비스(`POST /api/parse-pdf`)를
//! reqwest로 호출하며 `emailai-core`의 포트를 구현한다.
//! 재시도는 하지 않는다: 요청 1회, 결과 1회.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use emailai_network::http_client::HttpClassifierClient;
//! use emailai_network::pdf_client::HttpPdfExtractor;
//! ```

pub mod http_client;
pub mod pdf_client;

/// 에러 로그/메시지에 남길 응답 본문 최대 길이
pub(crate) const BODY_SNIPPET_CHARS: usize = 200;

/// 응답 본문 앞부분만 잘라낸다
pub(crate) fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
