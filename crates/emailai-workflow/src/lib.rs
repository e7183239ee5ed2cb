//! # emailai-workflow
//!
//! 클라이언트 측 분류 워크플로우.
//! 업로드 → 추출 → 분류 → 표시 → 이력 추가의 순서와
//! 로딩/에러 상태를 단일 상태 머신으로 관리한다.
//! 세션 이력(최대 크기 제한), JSON 내보내기, 표시용 변환을 함께 제공한다.

pub mod acquisition;
pub mod error;
pub mod export;
pub mod history;
pub mod presenter;
pub mod workflow;
