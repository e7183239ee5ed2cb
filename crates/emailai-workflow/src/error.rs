//! 워크플로우 에러와 사용자 표시 메시지.
//!
//! 네트워크/파일 에러의 원인은 tracing으로만 남기고,
//! 사용자에게는 범주별로 고정된 한 문장만 보여준다.

use emailai_core::error::CoreError;
use std::fmt;
use thiserror::Error;

use crate::workflow::WorkflowState;

/// 사용자에게 보이는 실패 범주
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 빈 본문 제출 (네트워크 호출 없음)
    Validation,
    /// 허용되지 않는 업로드 형식
    UnsupportedFormat,
    /// 파일 읽기/PDF 추출 실패
    Acquisition,
    /// 분류 서비스 호출 실패
    Classification,
}

impl FailureKind {
    /// 고정 사용자 메시지
    pub fn message(self) -> &'static str {
        match self {
            Self::Validation => "Por favor, insira o conteúdo do email.",
            Self::UnsupportedFormat => {
                "Formato de arquivo não suportado. Use arquivos .txt ou .pdf."
            }
            Self::Acquisition => "Erro ao ler o arquivo. Tente copiar e colar o texto.",
            Self::Classification => {
                "Erro ao classificar. Verifique a conexão com o servidor de classificação."
            }
        }
    }

    /// 입력 획득 에러 → 사용자 범주
    pub fn from_acquisition_error(err: &CoreError) -> Self {
        match err {
            CoreError::UnsupportedFormat(_) => Self::UnsupportedFormat,
            _ => Self::Acquisition,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// 워크플로우 조작 거부/실패
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 다른 작업이 진행 중 (획득 또는 분류)
    #[error("작업 진행 중: {0:?}")]
    Busy(WorkflowState),

    /// 빈 본문 제출: 상태는 Failed(Validation)으로 전이됨
    #[error("{}", FailureKind::Validation.message())]
    EmptyContent,

    /// 표시 중인 결과 없음
    #[error("내보낼 분석 결과가 없습니다")]
    NothingToExport,

    /// 이력 항목 없음
    #[error("이력 항목 미발견: {0}")]
    HistoryEntryNotFound(u64),

    /// 코어 에러
    #[error(transparent)]
    Core(#[from] CoreError),
}
