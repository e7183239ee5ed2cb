//! 애플리케이션 설정 구조체.
//!
//! 분류 서비스 주소, 요청 타임아웃, 세션 이력 정책, 릴레이 서버 설정을 정의한다.
//! 바이너리에서 `config` crate를 통해 파일/환경변수에서 로드한 뒤
//! 시작 시 한 번 해석하여 주입한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 기본 분류 서비스 주소 (명시적 오버라이드가 없을 때 사용)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// 분류 엔드포인트 경로
pub const CLASSIFY_PATH: &str = "/api/classify";

/// PDF 추출 엔드포인트 경로
pub const PARSE_PDF_PATH: &str = "/api/parse-pdf";

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 외부 서비스 연결 설정
    #[serde(default)]
    pub service: ServiceConfig,
    /// 세션 이력 설정
    #[serde(default)]
    pub history: HistoryConfig,
    /// 릴레이 서버 설정
    #[serde(default)]
    pub relay: RelayConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 요청 타임아웃
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.service.request_timeout_ms)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let base_url = self.service.resolve_base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "service.base_url은 http(s) URL이어야 합니다: '{base_url}'"
            )));
        }
        if self.service.request_timeout_ms == 0 {
            return Err(CoreError::Config(
                "service.request_timeout_ms는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.history.preview_chars == 0 {
            return Err(CoreError::Config(
                "history.preview_chars는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================
// 서비스 연결 설정
// ============================================================

/// 외부 분류/추출 서비스 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// 서비스 기본 URL 오버라이드 (None이면 `DEFAULT_BASE_URL`)
    #[serde(default)]
    pub base_url: Option<String>,
    /// HTTP 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ServiceConfig {
    /// 기본 URL 해석: {명시적 오버라이드} > {고정 로컬 기본값}
    ///
    /// 공백뿐인 오버라이드는 없는 것으로 취급한다.
    pub fn resolve_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// 해석된 기본 URL로 엔드포인트 목록 생성
    pub fn endpoints(&self) -> ServiceEndpoints {
        ServiceEndpoints::from_base(&self.resolve_base_url())
    }
}

/// 서비스 엔드포인트 전체 URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    /// 분류 엔드포인트
    pub classify: String,
    /// PDF 추출 엔드포인트
    pub parse_pdf: String,
}

impl ServiceEndpoints {
    /// 기본 URL에서 엔드포인트 생성
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            classify: format!("{base}{CLASSIFY_PATH}"),
            parse_pdf: format!("{base}{PARSE_PDF_PATH}"),
        }
    }
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

// ============================================================
// 세션 이력 설정
// ============================================================

/// 세션 이력 정책
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// 최대 보관 항목 수 (None 또는 0이면 무제한, 초과 시 가장 오래된 항목 제거)
    ///
    /// TOML/환경변수에는 null이 없으므로 0을 무제한으로 받는다.
    #[serde(default = "default_max_entries")]
    pub max_entries: Option<usize>,
    /// 이력 미리보기 길이 (문자 수)
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl HistoryConfig {
    /// 실제 적용할 상한 (0은 무제한으로 정규화)
    pub fn cap(&self) -> Option<usize> {
        self.max_entries.filter(|&max| max > 0)
    }
}

fn default_max_entries() -> Option<usize> {
    Some(20)
}

fn default_preview_chars() -> usize {
    100
}

// ============================================================
// 릴레이 서버 설정
// ============================================================

/// 분류 요청 릴레이 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// 바인드 호스트
    #[serde(default = "default_relay_host")]
    pub host: String,
    /// 바인드 포트
    #[serde(default = "default_relay_port")]
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_relay_host(),
            port: default_relay_port(),
        }
    }
}

fn default_relay_host() -> String {
    "127.0.0.1".to_string()
}

fn default_relay_port() -> u16 {
    3000
}
