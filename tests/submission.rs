//! End-to-end submission cycles against a mocked summarization backend.

use docsum::client::GENERIC_ERROR;
use docsum::config::{BackendConfig, ProgressConfig, SummaryLength};
use docsum::state::{Phase, NO_FILE_MESSAGE};
use docsum::{driver, Msg, SelectedFile, SummarizerClient, SummarizerState};
use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_progress() -> ProgressConfig {
    ProgressConfig {
        tick_ms: 10,
        settle_ms: 20,
        ..ProgressConfig::default()
    }
}

fn client_for(server: &MockServer) -> Arc<SummarizerClient> {
    client_with(BackendConfig {
        url: format!("{}/summarize", server.uri()),
        ..BackendConfig::default()
    })
}

fn client_with(config: BackendConfig) -> Arc<SummarizerClient> {
    Arc::new(SummarizerClient::new(&config).unwrap())
}

fn document(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file
}

fn selected(doc: &NamedTempFile) -> SummarizerState {
    let mut state = SummarizerState::new(fast_progress());
    state.update(Msg::FileSelected(SelectedFile::open(doc.path()).unwrap()));
    state
}

#[tokio::test]
async fn successful_summary_fills_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/summarize"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"summary": "S", "model_used": "bert"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let doc = document(".pdf", b"%PDF-1.4 body");
    let mut state = selected(&doc);
    driver::run_cycle(&mut state, client_for(&server), fast_progress(), |_| {}).await;

    assert_eq!(state.summary_text(), "S");
    assert_eq!(state.model_used(), "bert");
    assert_eq!(state.error_message(), "");
    assert_eq!(state.progress(), 100);
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn backend_error_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "bad file"})))
        .expect(1)
        .mount(&server)
        .await;

    let doc = document(".png", b"png bytes");
    let mut state = selected(&doc);
    driver::run_cycle(&mut state, client_for(&server), fast_progress(), |_| {}).await;

    assert_eq!(state.error_message(), "bad file");
    assert_eq!(state.summary_text(), "");
    assert_eq!(state.model_used(), "");
    assert_eq!(state.progress(), 0);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn failure_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let doc = document(".pdf", b"%PDF");
    let mut state = selected(&doc);
    driver::run_cycle(&mut state, client_for(&server), fast_progress(), |_| {}).await;

    assert_eq!(state.error_message(), GENERIC_ERROR);
    assert_eq!(state.progress(), 0);
}

#[tokio::test]
async fn undecodable_success_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let doc = document(".pdf", b"%PDF");
    let mut state = selected(&doc);
    driver::run_cycle(&mut state, client_for(&server), fast_progress(), |_| {}).await;

    assert_eq!(state.error_message(), GENERIC_ERROR);
    assert_eq!(state.summary_text(), "");
}

#[tokio::test]
async fn unreachable_backend_uses_generic_message() {
    // Nothing listens on the discard port.
    let client = client_with(BackendConfig {
        url: "http://127.0.0.1:9/summarize".to_string(),
        ..BackendConfig::default()
    });

    let doc = document(".pdf", b"%PDF");
    let mut state = selected(&doc);
    driver::run_cycle(&mut state, client, fast_progress(), |_| {}).await;

    assert_eq!(state.error_message(), GENERIC_ERROR);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn no_file_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut state = SummarizerState::new(fast_progress());
    let mut observed = 0;
    driver::run_cycle(&mut state, client_for(&server), fast_progress(), |_| observed += 1).await;

    assert_eq!(observed, 1);
    assert_eq!(state.error_message(), NO_FILE_MESSAGE);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn progress_stays_below_cap_while_waiting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"summary": "S", "model_used": "pegasus"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let doc = document(".pdf", b"%PDF");
    let mut state = selected(&doc);
    let mut waiting = Vec::new();
    driver::run_cycle(&mut state, client_for(&server), fast_progress(), |state| {
        if matches!(state.phase(), Phase::Submitting(_)) {
            waiting.push(state.progress());
        }
    })
    .await;

    assert!(waiting.len() > 1, "expected progress updates, got {waiting:?}");
    assert!(waiting.iter().all(|&p| p <= 90));
    assert!(waiting.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(waiting.last(), Some(&90));
    assert_eq!(state.progress(), 100);
}

#[tokio::test]
async fn timeout_is_reported_as_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"summary": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client_with(BackendConfig {
        url: format!("{}/summarize", server.uri()),
        timeout_ms: 50,
        ..BackendConfig::default()
    });

    let doc = document(".pdf", b"%PDF");
    let file = SelectedFile::open(doc.path()).unwrap();
    let err = client.summarize(&file).await.unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.user_message(), GENERIC_ERROR);
}

#[tokio::test]
async fn upload_carries_file_field_and_length() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"file\"; filename=\""))
        .and(body_string_contains("Content-Type: application/pdf"))
        .and(body_string_contains("name=\"length\""))
        .and(body_string_contains("long"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "S", "model_used": "pegasus"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(BackendConfig {
        url: format!("{}/summarize", server.uri()),
        length: Some(SummaryLength::Long),
        ..BackendConfig::default()
    });

    let doc = document(".pdf", b"%PDF-1.4 plain ascii body");
    let summary = client
        .summarize(&SelectedFile::open(doc.path()).unwrap())
        .await
        .unwrap();
    assert_eq!(summary.model_label(), "pegasus");
}

#[tokio::test]
async fn upload_omits_length_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("name=\"length\""))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "S"})))
        .mount(&server)
        .await;

    let doc = document(".png", b"ascii png stand-in");
    let summary = client_for(&server)
        .summarize(&SelectedFile::open(doc.path()).unwrap())
        .await
        .unwrap();
    assert_eq!(summary.model_label(), "Unknown");
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[tokio::test]
async fn successful_upload_is_quiet_at_default_filter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "S"})))
        .mount(&server)
        .await;

    let doc = document(".pdf", b"%PDF");
    let file = SelectedFile::open(doc.path()).unwrap();
    let client = client_for(&server);

    let quiet = CapturedLog::default();
    let writer = quiet.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(docsum::config::LoggingConfig::default().filter)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    {
        let _guard = tracing::subscriber::set_default(subscriber);
        client.summarize(&file).await.unwrap();
    }
    assert_eq!(quiet.text(), "");

    let verbose = CapturedLog::default();
    let writer = verbose.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("docsum=debug")
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    {
        let _guard = tracing::subscriber::set_default(subscriber);
        client.summarize(&file).await.unwrap();
    }
    let text = verbose.text();
    assert!(text.contains("submitting document"), "{text}");
    assert!(text.contains("summary received"), "{text}");
}
