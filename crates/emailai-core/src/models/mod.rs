//! 도메인 모델.
//!
//! 모든 구조체는 serde Serialize/Deserialize를 구현한다.

pub mod classification;
pub mod export;
pub mod history;
pub mod input;
