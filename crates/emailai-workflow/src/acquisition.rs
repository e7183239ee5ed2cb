//! 입력 획득.
//!
//! 붙여넣은 텍스트 또는 업로드 파일을 평문 본문으로 바꾼다.
//! 텍스트 파일은 로컬에서 읽고, PDF는 추출 서비스에 위임한다.

use emailai_core::error::CoreError;
use emailai_core::models::input::{FileKind, InputSource, UploadedFile};
use emailai_core::ports::pdf_extractor::PdfTextExtractor;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// UTF-8 BOM
const BOM: char = '\u{feff}';

/// 입력 획득기
pub struct InputAcquirer {
    extractor: Arc<dyn PdfTextExtractor>,
}

impl InputAcquirer {
    pub fn new(extractor: Arc<dyn PdfTextExtractor>) -> Self {
        Self { extractor }
    }

    /// 입력 소스 → 평문
    ///
    /// 붙여넣은 텍스트는 그대로 반환한다 (trim은 제출 시점에만).
    pub async fn acquire(&self, source: &InputSource) -> Result<String, CoreError> {
        match source {
            InputSource::Pasted(text) => Ok(text.clone()),
            InputSource::File(file) => self.acquire_file(file).await,
        }
    }

    /// 업로드 파일 → 평문
    pub async fn acquire_file(&self, file: &UploadedFile) -> Result<String, CoreError> {
        match file.kind() {
            FileKind::Text => {
                debug!(file = %file.name, size = file.bytes.len(), "텍스트 파일 읽기");
                Ok(decode_text(&file.bytes))
            }
            FileKind::Pdf => {
                let extracted = self.extractor.extract(&file.name, &file.bytes).await?;
                Ok(extracted.text)
            }
            FileKind::Unsupported => Err(CoreError::UnsupportedFormat(file.name.clone())),
        }
    }
}

/// UTF-8 디코딩 (잘못된 바이트는 U+FFFD로 대체, 선행 BOM 제거)
pub fn decode_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = &decoded;
    text.strip_prefix(BOM).unwrap_or(text).to_string()
}

/// 로컬 경로에서 업로드 파일 읽기
///
/// 종류는 파일 이름의 확장자로만 정해지므로 MIME은 채우지 않는다.
pub async fn read_upload(path: &Path) -> Result<UploadedFile, CoreError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(UploadedFile::new(name, None, bytes))
}
