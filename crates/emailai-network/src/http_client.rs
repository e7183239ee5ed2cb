//! 분류 서비스 HTTP 클라이언트.
//!
//! `EmailClassifier` 포트 구현. `POST {base}/api/classify`에 JSON 본문을 보내고
//! 응답 상태 코드를 에러로 매핑한다.

use async_trait::async_trait;
use emailai_core::config::ServiceEndpoints;
use emailai_core::error::CoreError;
use emailai_core::models::classification::{ClassifyRequest, ClassifyResponse};
use emailai_core::ports::classifier::EmailClassifier;
use std::time::Duration;
use tracing::{debug, warn};

use crate::snippet;

/// 분류 서비스 클라이언트: `EmailClassifier` 포트 구현
#[derive(Debug)]
pub struct HttpClassifierClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifierClient {
    /// 새 분류 클라이언트 생성
    pub fn new(endpoints: &ServiceEndpoints, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        debug!(endpoint = %endpoints.classify, "HttpClassifierClient 초기화");

        Ok(Self {
            client,
            endpoint: endpoints.classify.clone(),
        })
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        warn!(status = %status, "분류 서비스 오류 응답");
        Err(CoreError::Http {
            status: status.as_u16(),
            body: snippet(&text),
        })
    }
}

#[async_trait]
impl EmailClassifier for HttpClassifierClient {
    async fn classify(&self, request: &ClassifyRequest) -> Result<ClassifyResponse, CoreError> {
        debug!(
            endpoint = %self.endpoint,
            chars = request.email_content.chars().count(),
            file_name = ?request.file_name,
            "분류 요청"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("분류 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;

        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("분류 응답 읽기 실패: {e}")))?;

        let parsed: ClassifyResponse = serde_json::from_str(&body).map_err(|e| {
            CoreError::InvalidResponse(format!(
                "분류 응답 파싱 실패: {} (raw: {})",
                e,
                snippet(&body)
            ))
        })?;

        if let Some(meta) = &parsed.metadata {
            debug!(
                model = %meta.model,
                provider = %meta.provider,
                version = %meta.version,
                "분류 응답 메타데이터"
            );
        }
        debug!(success = parsed.success, "분류 응답 수신");

        Ok(parsed)
    }

    fn provider_name(&self) -> &str {
        &self.endpoint
    }
}
