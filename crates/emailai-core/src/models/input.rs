//! 입력 모델.
//!
//! 붙여넣기 텍스트 또는 업로드 파일, 그리고 PDF 추출 응답.

use serde::{Deserialize, Serialize};

/// 허용되는 업로드 확장자
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf"];

/// 업로드 파일 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// 텍스트 파일: 로컬에서 바로 읽음
    Text,
    /// PDF: 추출 서비스에 위임
    Pdf,
    /// 그 외: 제출 전에 거부
    Unsupported,
}

impl FileKind {
    /// 확장자로 분류한다. MIME 타입은 확장자가 없을 때만 본다.
    ///
    /// `.txt`/`.pdf` 외의 확장자는 MIME과 무관하게 거부.
    pub fn classify(file_name: &str, mime: Option<&str>) -> Self {
        let extension = std::path::Path::new(file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Self::Text,
            Some("pdf") => Self::Pdf,
            Some(_) => Self::Unsupported,
            None => match mime.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
                Some("application/pdf") => Self::Pdf,
                Some("text/plain") => Self::Text,
                _ => Self::Unsupported,
            },
        }
    }
}

/// 업로드 파일 (일시적: 텍스트 흡수 후 폐기)
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 파일 이름
    pub name: String,
    /// MIME 타입 (알 수 있는 경우)
    pub mime: Option<String>,
    /// 원본 바이트
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }

    /// 파일 종류
    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.name, self.mime.as_deref())
    }
}

/// 입력 소스
#[derive(Debug, Clone)]
pub enum InputSource {
    /// 붙여넣은 텍스트 (입력 시점에는 trim하지 않음)
    Pasted(String),
    /// 업로드 파일
    File(UploadedFile),
}

/// PDF 추출 서비스 응답
///
/// 릴레이 변형은 `{text}`만 보내므로 `success`는 선택 필드.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    #[serde(default)]
    pub success: Option<bool>,
    pub text: String,
    #[serde(default)]
    pub num_pages: Option<u32>,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_extension() {
        assert_eq!(FileKind::classify("notes.txt", None), FileKind::Text);
        assert_eq!(FileKind::classify("INVOICE.PDF", None), FileKind::Pdf);
        assert_eq!(FileKind::classify("photo.png", None), FileKind::Unsupported);
    }

    #[test]
    fn classify_falls_back_to_mime() {
        assert_eq!(
            FileKind::classify("upload", Some("application/pdf")),
            FileKind::Pdf
        );
        assert_eq!(FileKind::classify("upload", Some("text/plain")), FileKind::Text);
        assert_eq!(
            FileKind::classify("upload", Some("image/png")),
            FileKind::Unsupported
        );
        assert_eq!(
            FileKind::classify("upload", Some("text/html")),
            FileKind::Unsupported
        );
    }

    #[test]
    fn other_text_extensions_rejected_despite_mime() {
        for (name, mime) in [
            ("notes.md", "text/markdown"),
            ("page.html", "text/html"),
            ("data.csv", "text/csv"),
            ("main.rs", "text/x-rust"),
            ("notes.txt.bak", "text/plain"),
        ] {
            assert_eq!(
                FileKind::classify(name, Some(mime)),
                FileKind::Unsupported,
                "{name}"
            );
        }
    }

    #[test]
    fn extension_beats_mime() {
        assert_eq!(
            FileKind::classify("report.pdf", Some("application/octet-stream")),
            FileKind::Pdf
        );
    }

    #[test]
    fn extracted_text_minimal_shape() {
        let parsed: ExtractedText = serde_json::from_str(r#"{"text": "Invoice #123"}"#).unwrap();
        assert_eq!(parsed.text, "Invoice #123");
        assert!(parsed.success.is_none());
        assert!(parsed.num_pages.is_none());
    }

    #[test]
    fn extracted_text_full_shape() {
        let parsed: ExtractedText = serde_json::from_str(
            r#"{"success": true, "text": "a", "numPages": 2, "info": {"Title": "x"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.success, Some(true));
        assert_eq!(parsed.num_pages, Some(2));
    }
}
