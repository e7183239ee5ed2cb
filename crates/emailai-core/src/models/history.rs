//! 세션 이력 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classification::ClassificationResult;

/// 과거 분류 한 건의 불변 스냅샷 (세션 동안만 메모리에 유지)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// 세션 내 생성 순서 번호 (1부터 증가)
    pub id: u64,
    /// 이력 생성 시각
    pub created_at: DateTime<Utc>,
    /// 제출된 본문 전체 (trim 후)
    pub email: String,
    /// 본문 미리보기 (잘린 텍스트)
    pub content_preview: String,
    /// 원본 파일 이름
    pub file_name: Option<String>,
    /// 서비스가 보고한 분석 시각
    pub analyzed_at: String,
    /// 분류 결과
    pub result: ClassificationResult,
}

/// 미리보기 생성: 문자 단위로 자르고 잘렸으면 `...`을 붙인다
pub fn make_preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
