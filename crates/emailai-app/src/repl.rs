//! 대화형 세션 (stdin REPL).
//!
//! 한 줄 명령을 파싱해 워크플로우 조작으로 옮긴다.
//! 사용자에게 보이는 문구는 포르투갈어, 원인은 tracing으로만 남긴다.

use anyhow::Result;
use chrono::Utc;
use emailai_core::models::input::{InputSource, ACCEPTED_EXTENSIONS};
use emailai_core::ports::classifier::EmailClassifier;
use emailai_workflow::acquisition::{read_upload, InputAcquirer};
use emailai_workflow::error::{FailureKind, WorkflowError};
use emailai_workflow::export::write_export;
use emailai_workflow::presenter::{present, present_history_all};
use emailai_workflow::workflow::ClassificationWorkflow;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::render::{render_history, render_result};

/// 이력 목록 기본 표시 개수
const HISTORY_LIST_LIMIT: usize = 20;

/// 세션 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 본문 붙여넣기
    Text(String),
    /// 파일 업로드
    File(PathBuf),
    Classify,
    Show,
    History,
    Select(u64),
    /// 제안 응답 편집
    Edit(String),
    /// 내보내기 (경로 또는 디렉터리)
    Export(PathBuf),
    Clear,
    ClearHistory,
    Help,
    Quit,
}

/// 한 줄 파싱 (빈 줄은 None)
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (trimmed, ""),
    };

    let command = match name {
        "text" => Command::Text(rest.to_string()),
        "file" => {
            let path = rest.trim();
            if path.is_empty() {
                return Err("Uso: file <caminho>".to_string());
            }
            Command::File(PathBuf::from(path))
        }
        "classify" => Command::Classify,
        "show" => Command::Show,
        "history" => Command::History,
        "select" => {
            let id = rest
                .trim()
                .trim_start_matches('#')
                .parse::<u64>()
                .map_err(|_| "Uso: select <id>".to_string())?;
            Command::Select(id)
        }
        "edit" => Command::Edit(rest.to_string()),
        "export" => {
            let path = rest.trim();
            Command::Export(PathBuf::from(if path.is_empty() { "." } else { path }))
        }
        "clear" => Command::Clear,
        "clear-history" => Command::ClearHistory,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Comando desconhecido: {other}. Digite 'help'.")),
    };
    Ok(Some(command))
}

/// 도움말
pub fn help_text() -> String {
    let extensions = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Comandos:\n\
         \x20 text <conteúdo>   define o conteúdo do email\n\
         \x20 file <caminho>    carrega um arquivo ({extensions})\n\
         \x20 classify          classifica o conteúdo atual\n\
         \x20 show              mostra a análise atual\n\
         \x20 history           lista o histórico da sessão\n\
         \x20 select <id>       exibe uma análise do histórico\n\
         \x20 edit <texto>      edita a resposta sugerida\n\
         \x20 export [caminho]  salva a análise em JSON\n\
         \x20 clear             limpa o conteúdo e a análise\n\
         \x20 clear-history     limpa o histórico\n\
         \x20 quit              sai\n"
    )
}

/// 대화형 세션 상태
pub struct Session {
    workflow: ClassificationWorkflow,
    classifier: Arc<dyn EmailClassifier>,
    acquirer: InputAcquirer,
}

impl Session {
    pub fn new(
        workflow: ClassificationWorkflow,
        classifier: Arc<dyn EmailClassifier>,
        acquirer: InputAcquirer,
    ) -> Self {
        Self {
            workflow,
            classifier,
            acquirer,
        }
    }

    pub fn workflow(&self) -> &ClassificationWorkflow {
        &self.workflow
    }

    /// 명령 실행 후 출력 문자열 반환
    pub async fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Text(text) => {
                self.workflow.set_content(text);
                format!(
                    "Conteúdo definido ({} caracteres).",
                    self.workflow.content().chars().count()
                )
            }
            Command::File(path) => self.load_file(path).await,
            Command::Classify => match self.workflow.submit(self.classifier.as_ref()).await {
                Ok(()) => self.render_current(),
                Err(e) => self.user_message(&e),
            },
            Command::Show => {
                if self.workflow.result().is_some() {
                    self.render_current()
                } else if let Some(message) = self.workflow.error_message() {
                    message.to_string()
                } else {
                    "Nenhuma análise para exibir.".to_string()
                }
            }
            Command::History => {
                let history = self.workflow.history();
                let views = present_history_all(history.recent(HISTORY_LIST_LIMIT), Utc::now());
                let stats = history.stats();
                let cap = history
                    .max_entries()
                    .map(|max| max.to_string())
                    .unwrap_or_else(|| "ilimitado".to_string());
                format!(
                    "{}Total: {} (Produtivo: {}, Improdutivo: {}) · Limite: {}",
                    render_history(&views),
                    stats.total,
                    stats.produtivo,
                    stats.improdutivo,
                    cap
                )
            }
            Command::Select(id) => match self.workflow.select_history(id) {
                Ok(_) => self.render_current(),
                Err(e) => self.user_message(&e),
            },
            Command::Edit(text) => {
                if self.workflow.edit_response(text) {
                    "Resposta sugerida atualizada.".to_string()
                } else {
                    "Nenhuma análise para editar.".to_string()
                }
            }
            Command::Export(path) => self.export(path).await,
            Command::Clear => {
                self.workflow.clear();
                "Conteúdo e análise limpos.".to_string()
            }
            Command::ClearHistory => {
                self.workflow.clear_history();
                "Histórico limpo.".to_string()
            }
            Command::Help => help_text(),
            Command::Quit => String::new(),
        }
    }

    async fn load_file(&mut self, path: PathBuf) -> String {
        let upload = match read_upload(&path).await {
            Ok(upload) => upload,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "파일 읽기 실패");
                return FailureKind::Acquisition.message().to_string();
            }
        };
        let name = upload.name.clone();

        match self
            .workflow
            .acquire(&self.acquirer, InputSource::File(upload))
            .await
        {
            Ok(()) => format!(
                "Arquivo carregado: {name} ({} caracteres).",
                self.workflow.content().chars().count()
            ),
            Err(e) => self.user_message(&e),
        }
    }

    async fn export(&self, path: PathBuf) -> String {
        let doc = match self.workflow.export(Utc::now()) {
            Ok(doc) => doc,
            Err(e) => return self.user_message(&e),
        };
        match write_export(&doc, &path).await {
            Ok(written) => format!("Análise exportada para {}", written.display()),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "내보내기 실패");
                "Erro ao salvar o arquivo de exportação.".to_string()
            }
        }
    }

    fn render_current(&self) -> String {
        match self.workflow.result() {
            Some(result) => render_result(&present(result, self.workflow.edited_response())),
            None => "Nenhuma análise para exibir.".to_string(),
        }
    }

    fn user_message(&self, err: &WorkflowError) -> String {
        match err {
            WorkflowError::EmptyContent => FailureKind::Validation.message().to_string(),
            WorkflowError::Busy(_) => "Aguarde a operação em andamento.".to_string(),
            WorkflowError::NothingToExport => "Nenhuma análise para exportar.".to_string(),
            WorkflowError::HistoryEntryNotFound(id) => {
                format!("Item #{id} não encontrado no histórico.")
            }
            WorkflowError::Core(_) => self
                .workflow
                .error_message()
                .unwrap_or(FailureKind::Classification.message())
                .to_string(),
        }
    }
}

/// stdin 루프 (EOF 또는 quit까지)
pub async fn run(mut session: Session) -> Result<()> {
    info!("대화형 세션 시작");
    println!("EmailAI: digite 'help' para ver os comandos.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                let output = session.execute(command).await;
                println!("{}", output.trim_end());
            }
            Err(message) => println!("{message}"),
        }
    }

    info!(
        history = session.workflow().history().len(),
        "대화형 세션 종료"
    );
    Ok(())
}
