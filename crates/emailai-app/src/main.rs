//! # emailai-app
//!
//! EmailAI 클라이언트 바이너리 진입점.
//! 설정 로드, 어댑터 생성(DI), 서브커맨드 실행.

mod render;
mod repl;
mod settings;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use emailai_core::config::AppConfig;
use emailai_core::models::input::InputSource;
use emailai_core::ports::classifier::EmailClassifier;
use emailai_network::http_client::HttpClassifierClient;
use emailai_network::pdf_client::HttpPdfExtractor;
use emailai_relay::RelayServer;
use emailai_workflow::acquisition::{read_upload, InputAcquirer};
use emailai_workflow::error::{FailureKind, WorkflowError};
use emailai_workflow::export::write_export;
use emailai_workflow::presenter::present;
use emailai_workflow::workflow::ClassificationWorkflow;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::render_result;
use crate::repl::Session;

/// EmailAI 이메일 분류 클라이언트
///
/// 이메일 본문(텍스트/PDF)을 분류 서비스로 보내 결과를 보여준다.
#[derive(Parser, Debug)]
#[command(name = "emailai")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 분류 서비스 URL (기본: http://localhost:8000)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉터리의 config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 이메일 한 건 분류
    Classify(ClassifyArgs),
    /// 대화형 세션 (이력/선택/편집/내보내기)
    Session,
    /// 분류 요청 릴레이 서버 실행
    Relay {
        /// 바인드 포트 (기본: 설정값 또는 3000)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
}

#[derive(ClapArgs, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct ClassifyArgs {
    /// 이메일 본문
    #[arg(long, short = 't')]
    text: Option<String>,

    /// 이메일 파일 (.txt, .pdf)
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// 분석 결과 JSON 저장 경로 (파일 또는 디렉터리)
    #[arg(long, short = 'e')]
    export: Option<PathBuf>,

    /// 결과를 JSON으로 출력
    #[arg(long)]
    json: bool,
}

/// tracing 초기화 (stderr, RUST_LOG 우선)
fn init_tracing(log_level: &str) {
    let log_filter = [
        "emailai",
        "emailai_app",
        "emailai_core",
        "emailai_network",
        "emailai_workflow",
        "emailai_relay",
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{target}={log_level}"))
    .collect::<Vec<_>>()
    .join(",");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 포트 어댑터 생성
fn build_adapters(config: &AppConfig) -> Result<(Arc<dyn EmailClassifier>, InputAcquirer)> {
    let endpoints = config.service.endpoints();
    let timeout = config.request_timeout();

    let classifier: Arc<dyn EmailClassifier> = Arc::new(
        HttpClassifierClient::new(&endpoints, timeout).context("분류 클라이언트 생성 실패")?,
    );
    let extractor =
        Arc::new(HttpPdfExtractor::new(&endpoints, timeout).context("PDF 클라이언트 생성 실패")?);

    info!(
        classifier = classifier.provider_name(),
        parse_pdf = %endpoints.parse_pdf,
        "어댑터 생성 완료"
    );
    Ok((classifier, InputAcquirer::new(extractor)))
}

/// `classify` 서브커맨드: 입력 획득 → 분류 → 출력/내보내기
async fn run_classify(config: &AppConfig, args: ClassifyArgs) -> Result<()> {
    let (classifier, acquirer) = build_adapters(config)?;
    let mut workflow = ClassificationWorkflow::new(&config.history);

    if let Some(path) = &args.file {
        let upload = read_upload(path).await.map_err(|e| {
            warn!(error = %e, path = %path.display(), "파일 읽기 실패");
            anyhow!(FailureKind::Acquisition.message())
        })?;
        workflow
            .acquire(&acquirer, InputSource::File(upload))
            .await
            .map_err(|e| user_error(&workflow, e))?;
    }
    if let Some(text) = args.text {
        workflow.set_content(text);
    }

    workflow
        .submit(classifier.as_ref())
        .await
        .map_err(|e| user_error(&workflow, e))?;

    let doc = workflow
        .export(Utc::now())
        .map_err(|e| user_error(&workflow, e))?;

    if args.json {
        println!("{}", doc.to_json_pretty()?);
    } else if let Some(result) = workflow.result() {
        print!("{}", render_result(&present(result, workflow.edited_response())));
    }

    if let Some(path) = &args.export {
        let written = write_export(&doc, path)
            .await
            .with_context(|| format!("내보내기 실패: {}", path.display()))?;
        eprintln!("Análise exportada para {}", written.display());
    }
    Ok(())
}

/// 워크플로우 에러 → 사용자 메시지 에러
fn user_error(workflow: &ClassificationWorkflow, err: WorkflowError) -> anyhow::Error {
    match err {
        WorkflowError::Core(_) => anyhow!(workflow
            .error_message()
            .unwrap_or(FailureKind::Classification.message())),
        other => anyhow!(other.to_string()),
    }
}

/// `relay` 서브커맨드: Ctrl+C까지 실행
async fn run_relay(mut config: AppConfig, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.relay.port = port;
    }

    let server = RelayServer::new(&config).context("릴레이 서버 생성 실패")?;
    println!(
        "Relay em http://{} → {}",
        server.addr(),
        server.upstream()
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl+C 핸들러 등록 실패: {e}");
            return;
        }
        let _ = shutdown_tx.send(true);
    });

    server
        .run(shutdown_rx)
        .await
        .context("릴레이 서버 실행 실패")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = settings::load(args.config.as_deref(), args.server.as_deref())?;
    info!(server = %config.service.resolve_base_url(), "EmailAI 시작");

    match args.command {
        Command::Classify(classify_args) => run_classify(&config, classify_args).await,
        Command::Session => {
            let (classifier, acquirer) = build_adapters(&config)?;
            let workflow = ClassificationWorkflow::new(&config.history);
            repl::run(Session::new(workflow, classifier, acquirer)).await
        }
        Command::Relay { port } => run_relay(config, port).await,
    }
}
