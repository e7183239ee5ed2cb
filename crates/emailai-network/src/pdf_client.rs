//! PDF 추출 서비스 HTTP 클라이언트.
//!
//! `PdfTextExtractor` 포트 구현. 원본 바이트를 multipart `file` 필드로 전송한다.

use async_trait::async_trait;
use emailai_core::config::ServiceEndpoints;
use emailai_core::error::CoreError;
use emailai_core::models::input::ExtractedText;
use emailai_core::ports::pdf_extractor::PdfTextExtractor;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

use crate::snippet;

/// multipart 파트 이름
const FILE_FIELD: &str = "file";

/// PDF MIME 타입
const PDF_MIME: &str = "application/pdf";

/// PDF 추출 서비스 클라이언트
#[derive(Debug)]
pub struct HttpPdfExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPdfExtractor {
    /// 새 추출 클라이언트 생성
    pub fn new(endpoints: &ServiceEndpoints, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoints.parse_pdf.clone(),
        })
    }
}

#[async_trait]
impl PdfTextExtractor for HttpPdfExtractor {
    async fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ExtractedText, CoreError> {
        debug!(
            endpoint = %self.endpoint,
            file_name,
            size = bytes.len(),
            "PDF 추출 요청"
        );

        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)
            .map_err(|e| CoreError::Extraction(format!("multipart 구성 실패: {e}")))?;
        let form = Form::new().part(FILE_FIELD, part);

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("PDF 추출 요청 실패: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("PDF 추출 응답 읽기 실패: {e}")))?;

        if !status.is_success() {
            warn!(status = %status, "PDF 추출 서비스 오류 응답");
            return Err(CoreError::Http {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let extracted: ExtractedText = serde_json::from_str(&body).map_err(|e| {
            CoreError::InvalidResponse(format!(
                "PDF 추출 응답 파싱 실패: {} (raw: {})",
                e,
                snippet(&body)
            ))
        })?;

        if extracted.success == Some(false) {
            return Err(CoreError::Extraction(
                "추출 서비스가 success=false로 응답".to_string(),
            ));
        }

        debug!(
            chars = extracted.text.chars().count(),
            pages = ?extracted.num_pages,
            "PDF 추출 완료"
        );

        Ok(extracted)
    }
}
