//! 분류 워크플로우 상태 머신.
//!
//! `Idle → Submitting → {Succeeded, Failed}` 순환과 입력 획득(`Acquiring`)을 관리한다.
//! 비동기 호출은 `begin_*` / `finish_*` 두 단계로 나뉘며, 티켓에 담긴 세대(generation)가
//! 현재 세대와 다르면 결과를 적용하지 않는다. 오래된 응답이 새 상태를 덮어쓰지 않는다.

use chrono::{DateTime, Utc};
use emailai_core::config::HistoryConfig;
use emailai_core::error::CoreError;
use emailai_core::models::classification::{
    ClassificationResult, ClassifyRequest, ClassifyResponse,
};
use emailai_core::models::export::ExportDocument;
use emailai_core::models::history::{make_preview, HistoryEntry};
use emailai_core::models::input::InputSource;
use emailai_core::ports::classifier::EmailClassifier;
use tracing::{debug, info, warn};

use crate::acquisition::InputAcquirer;
use crate::error::{FailureKind, WorkflowError};
use crate::history::ClassificationHistory;

/// 워크플로우 상태 (상호 배타)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    /// 파일 읽기/PDF 추출 중
    Acquiring,
    /// 분류 요청 중
    Submitting,
    Succeeded,
    Failed,
}

impl WorkflowState {
    /// 비동기 작업 진행 중 여부
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Acquiring | Self::Submitting)
    }
}

/// 현재 표시 중인 결과
///
/// 결과를 만든 본문과 파일 이름을 함께 보관한다. 작업 영역 본문이
/// 이후 바뀌거나 이력에서 다른 항목을 골라도 내보내기 짝이 어긋나지 않는다.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedResult {
    pub result: ClassificationResult,
    /// 분류에 제출된 본문 (trim 후)
    pub email: String,
    /// 제출 당시 파일 이름
    pub file_name: Option<String>,
    /// 서비스가 보고한 분석 시각
    pub analyzed_at: String,
    /// 이력 항목 ID (이력에서 선택했거나 새로 추가된 항목)
    pub history_id: Option<u64>,
}

/// 진행 중인 분류 요청
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    generation: u64,
    request: ClassifyRequest,
}

impl SubmitTicket {
    /// 분류 서비스로 보낼 요청
    pub fn request(&self) -> &ClassifyRequest {
        &self.request
    }
}

/// 진행 중인 입력 획득
#[derive(Debug, Clone)]
pub struct AcquireTicket {
    generation: u64,
    file_name: Option<String>,
}

/// 비동기 결과 적용 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// 이후 조작으로 세대가 바뀌어 버려짐
    Stale,
}

/// 분류 워크플로우
#[derive(Debug)]
pub struct ClassificationWorkflow {
    state: WorkflowState,
    content: String,
    file_name: Option<String>,
    displayed: Option<DisplayedResult>,
    /// 편집 가능한 제안 응답 사본 (서비스로 다시 보내지 않음)
    edited_response: Option<String>,
    error: Option<FailureKind>,
    history: ClassificationHistory,
    preview_chars: usize,
    generation: u64,
}

impl ClassificationWorkflow {
    /// 새 워크플로우 생성
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            state: WorkflowState::Idle,
            content: String::new(),
            file_name: None,
            displayed: None,
            edited_response: None,
            error: None,
            history: ClassificationHistory::from_config(config),
            preview_chars: config.preview_chars,
            generation: 0,
        }
    }

    // ============================================================
    // 조회
    // ============================================================

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        self.displayed.as_ref().map(|d| &d.result)
    }

    pub fn displayed(&self) -> Option<&DisplayedResult> {
        self.displayed.as_ref()
    }

    pub fn edited_response(&self) -> Option<&str> {
        self.edited_response.as_deref()
    }

    pub fn error(&self) -> Option<FailureKind> {
        self.error
    }

    /// 사용자 표시용 에러 메시지
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(FailureKind::message)
    }

    pub fn history(&self) -> &ClassificationHistory {
        &self.history
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// 제출 가능 여부: 진행 중이 아니고 trim한 본문이 비어있지 않음
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.content.trim().is_empty()
    }

    // ============================================================
    // 입력
    // ============================================================

    /// 본문 직접 입력 (trim하지 않음, 파일 이름 유지)
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    /// 입력 획득 시작
    pub fn begin_acquisition(
        &mut self,
        source: &InputSource,
    ) -> Result<AcquireTicket, WorkflowError> {
        self.ensure_idle()?;
        self.generation += 1;
        self.reset_output();
        self.state = WorkflowState::Acquiring;

        let file_name = match source {
            InputSource::Pasted(_) => None,
            InputSource::File(file) => Some(file.name.clone()),
        };
        debug!(generation = self.generation, file_name = ?file_name, "입력 획득 시작");

        Ok(AcquireTicket {
            generation: self.generation,
            file_name,
        })
    }

    /// 입력 획득 결과 적용
    ///
    /// 성공하면 본문을 통째로 교체한다. 실패 원인은 로그로만 남기고 반환한다.
    pub fn finish_acquisition(
        &mut self,
        ticket: AcquireTicket,
        outcome: Result<String, CoreError>,
    ) -> Result<ApplyOutcome, CoreError> {
        if self.is_stale(ticket.generation) {
            return Ok(ApplyOutcome::Stale);
        }

        match outcome {
            Ok(text) => {
                debug!(chars = text.chars().count(), "입력 획득 완료");
                self.content = text;
                self.file_name = ticket.file_name;
                self.state = WorkflowState::Idle;
                Ok(ApplyOutcome::Applied)
            }
            Err(e) => {
                let kind = FailureKind::from_acquisition_error(&e);
                warn!(error = %e, file_name = ?ticket.file_name, "입력 획득 실패");
                self.error = Some(kind);
                self.state = WorkflowState::Failed;
                Err(e)
            }
        }
    }

    /// 입력 획득 (시작 → 획득 → 적용)
    pub async fn acquire(
        &mut self,
        acquirer: &InputAcquirer,
        source: InputSource,
    ) -> Result<(), WorkflowError> {
        let ticket = self.begin_acquisition(&source)?;
        let outcome = acquirer.acquire(&source).await;
        self.finish_acquisition(ticket, outcome)?;
        Ok(())
    }

    // ============================================================
    // 분류
    // ============================================================

    /// 분류 제출 시작
    ///
    /// 빈 본문이면 네트워크 호출 없이 `Failed(Validation)`으로 전이한다.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, WorkflowError> {
        self.ensure_idle()?;

        let trimmed = self.content.trim();
        if trimmed.is_empty() {
            self.reset_output();
            self.error = Some(FailureKind::Validation);
            self.state = WorkflowState::Failed;
            return Err(WorkflowError::EmptyContent);
        }

        let request = ClassifyRequest {
            email_content: trimmed.to_string(),
            file_name: self.file_name.clone(),
        };

        self.generation += 1;
        self.reset_output();
        self.state = WorkflowState::Submitting;
        debug!(generation = self.generation, "분류 제출");

        Ok(SubmitTicket {
            generation: self.generation,
            request,
        })
    }

    /// 분류 결과 적용
    ///
    /// 성공 시 이력에 한 건 추가하고 제안 응답 사본을 채운다.
    /// 실패 시 결과는 비운 채로 원인을 반환한다.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<ClassifyResponse, CoreError>,
    ) -> Result<ApplyOutcome, CoreError> {
        if self.is_stale(ticket.generation) {
            return Ok(ApplyOutcome::Stale);
        }

        match outcome.and_then(ClassifyResponse::into_outcome) {
            Ok(outcome) => {
                let SubmitTicket { request, .. } = ticket;
                let preview = make_preview(&request.email_content, self.preview_chars);
                let history_id = self.history.add(
                    request.email_content.clone(),
                    preview,
                    request.file_name.clone(),
                    outcome.analyzed_at.clone(),
                    outcome.result.clone(),
                );

                info!(
                    category = ?outcome.result.category,
                    confidence = outcome.result.confidence,
                    model = outcome.metadata.as_ref().map(|m| m.model.as_str()).unwrap_or("-"),
                    history_id,
                    "분류 완료"
                );

                self.edited_response = Some(outcome.result.suggested_response.clone());
                self.displayed = Some(DisplayedResult {
                    result: outcome.result,
                    email: request.email_content,
                    file_name: request.file_name,
                    analyzed_at: outcome.analyzed_at,
                    history_id: Some(history_id),
                });
                self.error = None;
                self.state = WorkflowState::Succeeded;
                Ok(ApplyOutcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "분류 실패");
                self.displayed = None;
                self.edited_response = None;
                self.error = Some(FailureKind::Classification);
                self.state = WorkflowState::Failed;
                Err(e)
            }
        }
    }

    /// 분류 (시작 → 요청 → 적용)
    pub async fn submit(&mut self, classifier: &dyn EmailClassifier) -> Result<(), WorkflowError> {
        let ticket = self.begin_submit()?;
        let outcome = classifier.classify(ticket.request()).await;
        self.finish_submit(ticket, outcome)?;
        Ok(())
    }

    // ============================================================
    // 결과/이력 조작
    // ============================================================

    /// 이력 항목 선택 (순수 조회, 이력 순서/길이 불변)
    pub fn select_history(&mut self, id: u64) -> Result<&DisplayedResult, WorkflowError> {
        self.ensure_idle()?;

        let entry: &HistoryEntry = self
            .history
            .get(id)
            .ok_or(WorkflowError::HistoryEntryNotFound(id))?;

        self.edited_response = Some(entry.result.suggested_response.clone());
        self.error = None;
        self.state = WorkflowState::Succeeded;
        Ok(&*self.displayed.insert(DisplayedResult {
            result: entry.result.clone(),
            email: entry.email.clone(),
            file_name: entry.file_name.clone(),
            analyzed_at: entry.analyzed_at.clone(),
            history_id: Some(entry.id),
        }))
    }

    /// 제안 응답 사본 편집 (표시 중인 결과가 있을 때만)
    pub fn edit_response(&mut self, text: impl Into<String>) -> bool {
        if self.displayed.is_none() {
            return false;
        }
        self.edited_response = Some(text.into());
        true
    }

    /// 작업 영역 초기화 (이력은 유지, 진행 중인 응답은 버려짐)
    pub fn clear(&mut self) {
        self.generation += 1;
        self.content.clear();
        self.file_name = None;
        self.reset_output();
        self.state = WorkflowState::Idle;
        debug!(generation = self.generation, "작업 영역 초기화");
    }

    /// 세션 이력 비우기
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 현재 결과를 내보내기 문서로 변환 (읽기 전용)
    ///
    /// `email`/`fileName`은 표시 중인 결과를 만든 제출 본문이다.
    pub fn export(&self, exported_at: DateTime<Utc>) -> Result<ExportDocument, WorkflowError> {
        let displayed = self
            .displayed
            .as_ref()
            .ok_or(WorkflowError::NothingToExport)?;

        Ok(ExportDocument {
            email: displayed.email.clone(),
            file_name: displayed.file_name.clone(),
            analysis: displayed.result.clone(),
            analyzed_at: displayed.analyzed_at.clone(),
            exported_at,
        })
    }

    // ============================================================
    // 내부
    // ============================================================

    fn ensure_idle(&self) -> Result<(), WorkflowError> {
        if self.is_busy() {
            return Err(WorkflowError::Busy(self.state));
        }
        Ok(())
    }

    fn reset_output(&mut self) {
        self.displayed = None;
        self.edited_response = None;
        self.error = None;
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                ticket = generation,
                current = self.generation,
                "오래된 응답 무시"
            );
            return true;
        }
        false
    }
}
