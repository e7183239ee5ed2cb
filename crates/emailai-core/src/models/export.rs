//! 내보내기 문서 모델.
//!
//! 현재 표시 중인 분석 결과를 JSON 파일로 저장할 때의 형식.
//! 스키마 버전은 두지 않는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classification::ClassificationResult;
use crate::error::CoreError;

/// 내보내기 문서 `{email, fileName, analysis, analyzedAt, exportedAt}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// 원본 이메일 본문
    pub email: String,
    /// 원본 파일 이름
    pub file_name: Option<String>,
    /// 분석 결과
    pub analysis: ClassificationResult,
    /// 서비스 분석 시각
    pub analyzed_at: String,
    /// 내보낸 시각
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    /// 보기 좋게 들여쓴 JSON
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON 파싱
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 다운로드 파일 이름 제안 (`analise-email-<timestamp>.json`)
    pub fn suggested_file_name(&self) -> String {
        format!(
            "analise-email-{}.json",
            self.exported_at.format("%Y%m%dT%H%M%SZ")
        )
    }
}
