//! 분류 모델.
//!
//! 외부 분류 서비스와 주고받는 요청/응답 구조체.
//! 와이어 필드명은 camelCase를 따른다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 이메일 분류 카테고리
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// 업무 관련 (응답/조치 필요)
    Produtivo,
    /// 업무와 무관 (인사, 광고 등)
    Improdutivo,
}

/// 어조
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tone {
    Urgente,
    Formal,
    Amigavel,
    Neutro,
    Critico,
}

/// 긴급도
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    Baixa,
    Media,
    Alta,
    Critica,
}

/// 제안 조치 우선순위
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionPriority {
    Baixa,
    Media,
    Alta,
}

/// 처리 복잡도
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Complexity {
    Simples,
    Moderada,
    Complexa,
}

/// 감정 분석 (어조 × 긴급도)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentiment {
    pub tone: Tone,
    pub urgency: Urgency,
}

/// 추출된 엔티티
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entities {
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
}

impl Entities {
    /// 전체 엔티티 수
    pub fn total(&self) -> usize {
        self.people.len() + self.dates.len() + self.values.len() + self.organizations.len()
    }
}

/// 제안 조치
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedAction {
    /// 조치 설명
    pub action: String,
    /// 우선순위
    pub priority: ActionPriority,
}

/// 분류 결과: 수신 후 불변
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// 카테고리
    pub category: Category,
    /// 신뢰도 (0.0 ~ 1.0 비율)
    pub confidence: f64,
    /// 감정 분석
    pub sentiment: Sentiment,
    /// 이메일 유형 (자유 텍스트)
    #[serde(default)]
    pub email_type: String,
    /// 태그 목록
    #[serde(default)]
    pub tags: Vec<String>,
    /// 엔티티
    #[serde(default)]
    pub entities: Entities,
    /// 판단 근거
    #[serde(default)]
    pub reasoning: String,
    /// 핵심 포인트
    #[serde(default)]
    pub key_points: Vec<String>,
    /// 제안 조치 목록
    #[serde(default)]
    pub suggested_actions: Vec<SuggestedAction>,
    /// 제안 응답 초안
    #[serde(default)]
    pub suggested_response: String,
    /// 예상 응답 소요 시간
    #[serde(default)]
    pub estimated_response_time: String,
    /// 복잡도
    pub complexity: Complexity,
}

impl ClassificationResult {
    /// 의미 검증: 신뢰도는 [0, 1] 범위의 비율이어야 한다
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::InvalidResponse(format!(
                "confidence 범위 초과: {}",
                self.confidence
            )));
        }
        Ok(())
    }

    /// 신뢰도 백분율 (반올림)
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// 분류 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    /// 분류할 이메일 본문 (trim 적용)
    pub email_content: String,
    /// 원본 파일 이름 (선택)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// 응답 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub version: String,
}

/// 분류 응답 본문 (서비스 → 클라이언트)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    /// 의미상 성공 여부
    pub success: bool,
    /// 분류 결과 (실패 응답에서는 없을 수 있음)
    #[serde(default)]
    pub result: Option<ClassificationResult>,
    /// 분석 시각 (서비스가 보낸 문자열 그대로)
    #[serde(default)]
    pub analyzed_at: String,
    /// 모델 메타데이터 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

/// 검증을 통과한 분류 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutcome {
    pub result: ClassificationResult,
    pub analyzed_at: String,
    pub metadata: Option<ResponseMetadata>,
}

impl ClassifyResponse {
    /// 응답을 완전한 결과로 변환한다. 부분 결과는 없다.
    ///
    /// `success: false`, 결과 누락, 범위 밖 신뢰도는 모두 에러.
    pub fn into_outcome(self) -> Result<ClassificationOutcome, CoreError> {
        if !self.success {
            return Err(CoreError::Rejected(
                "분류 서비스가 success=false로 응답".to_string(),
            ));
        }
        let result = self.result.ok_or_else(|| {
            CoreError::InvalidResponse("success=true 응답에 result 없음".to_string())
        })?;
        result.validate()?;
        Ok(ClassificationOutcome {
            result,
            analyzed_at: self.analyzed_at,
            metadata: self.metadata,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_result;
    use super::*;

    fn response(success: bool, result: Option<ClassificationResult>) -> ClassifyResponse {
        ClassifyResponse {
            success,
            result,
            analyzed_at: "2024-01-01T00:00:00Z".to_string(),
            metadata: None,
        }
    }

    #[test]
    fn request_omits_missing_file_name() {
        let req = ClassifyRequest {
            email_content: "Olá".to_string(),
            file_name: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"emailContent": "Olá"}));

        let req = ClassifyRequest {
            email_content: "Olá".to_string(),
            file_name: Some("a.txt".to_string()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fileName"], "a.txt");
    }

    #[test]
    fn result_uses_camel_case() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert!(json.get("suggestedResponse").is_some());
        assert!(json.get("keyPoints").is_some());
        assert!(json.get("estimatedResponseTime").is_some());
        assert_eq!(json["sentiment"]["tone"], "Formal");
    }

    #[test]
    fn into_outcome_success() {
        let outcome = response(true, Some(sample_result())).into_outcome().unwrap();
        assert_eq!(outcome.result, sample_result());
        assert_eq!(outcome.analyzed_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn into_outcome_keeps_metadata() {
        let mut resp = response(true, Some(sample_result()));
        resp.metadata = Some(ResponseMetadata {
            model: "gemini-1.5-flash".to_string(),
            provider: "google".to_string(),
            version: "1.0".to_string(),
        });
        let outcome = resp.into_outcome().unwrap();
        assert_eq!(outcome.metadata.unwrap().model, "gemini-1.5-flash");
    }

    #[test]
    fn into_outcome_rejected() {
        let err = response(false, Some(sample_result())).into_outcome().unwrap_err();
        assert!(matches!(err, CoreError::Rejected(_)));
    }

    #[test]
    fn into_outcome_missing_result() {
        let err = response(true, None).into_outcome().unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }

    #[test]
    fn percentage_confidence_is_rejected() {
        let mut result = sample_result();
        result.confidence = 92.0;
        let err = response(true, Some(result)).into_outcome().unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }

    #[test]
    fn confidence_percent_rounds() {
        let mut result = sample_result();
        result.confidence = 0.956;
        assert_eq!(result.confidence_percent(), 96);
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let json = r#"{"category": "Spam", "confidence": 0.5,
            "sentiment": {"tone": "Neutro", "urgency": "Baixa"}, "complexity": "Simples"}"#;
        assert!(serde_json::from_str::<ClassificationResult>(json).is_err());
    }

    #[test]
    fn entities_total() {
        assert_eq!(sample_result().entities.total(), 3);
    }
}
