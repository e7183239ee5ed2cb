//! PDF 텍스트 추출 포트.
//!
//! 구현: `emailai-network` crate (`HttpPdfExtractor`)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::input::ExtractedText;

/// 외부 PDF 텍스트 추출 서비스
#[async_trait]
pub trait PdfTextExtractor: Send + Sync {
    /// 원본 PDF 바이트에서 텍스트 추출
    async fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<ExtractedText, CoreError>;
}
