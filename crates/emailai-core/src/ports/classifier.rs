//! 이메일 분류기 포트.
//!
//! 구현: `emailai-network` crate (`HttpClassifierClient`)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::classification::{ClassifyRequest, ClassifyResponse};

/// 외부 분류 서비스
#[async_trait]
pub trait EmailClassifier: Send + Sync {
    /// 분류 요청 1회 전송
    ///
    /// 2xx가 아닌 응답과 파싱 불가 본문은 에러로 반환한다.
    /// `success` 플래그의 의미 검증은 호출자가 `ClassifyResponse::into_outcome`으로 수행한다.
    async fn classify(&self, request: &ClassifyRequest) -> Result<ClassifyResponse, CoreError>;

    /// 제공자 이름 (로그용)
    fn provider_name(&self) -> &str;
}
