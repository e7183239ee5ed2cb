//! 설정 및 DI 와이어링 통합 테스트.
//!
//! AppConfig → 어댑터 생성 검증.

use emailai_core::config::{AppConfig, DEFAULT_BASE_URL};
use emailai_core::ports::classifier::EmailClassifier;
use emailai_network::http_client::HttpClassifierClient;
use emailai_network::pdf_client::HttpPdfExtractor;
use emailai_relay::RelayServer;
use emailai_workflow::acquisition::InputAcquirer;
use emailai_workflow::workflow::{ClassificationWorkflow, WorkflowState};
use std::sync::Arc;

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();
    assert!(config.validate().is_ok());

    // 서비스 설정
    assert_eq!(config.service.resolve_base_url(), DEFAULT_BASE_URL);
    assert!(config.service.request_timeout_ms > 0);

    // 이력 설정
    assert_eq!(config.history.cap(), Some(20));
    assert_eq!(config.history.preview_chars, 100);

    // 릴레이 설정
    assert_eq!(config.relay.port, 3000);
}

#[test]
fn all_adapters_instantiate_from_config() {
    let config = AppConfig::default_config();
    let endpoints = config.service.endpoints();

    let classifier: Arc<dyn EmailClassifier> = Arc::new(
        HttpClassifierClient::new(&endpoints, config.request_timeout()).unwrap(),
    );
    assert_eq!(
        classifier.provider_name(),
        "http://localhost:8000/api/classify"
    );

    let extractor = Arc::new(HttpPdfExtractor::new(&endpoints, config.request_timeout()).unwrap());
    let _acquirer = InputAcquirer::new(extractor);

    let workflow = ClassificationWorkflow::new(&config.history);
    assert_eq!(workflow.state(), WorkflowState::Idle);
    assert!(!workflow.can_submit());

    let relay = RelayServer::new(&config).unwrap();
    assert_eq!(relay.upstream(), endpoints.classify);
}

#[test]
fn override_changes_every_endpoint() {
    let mut config = AppConfig::default_config();
    config.service.base_url = Some("https://classifier.internal".to_string());

    let endpoints = config.service.endpoints();
    assert_eq!(endpoints.classify, "https://classifier.internal/api/classify");
    assert_eq!(endpoints.parse_pdf, "https://classifier.internal/api/parse-pdf");
}
