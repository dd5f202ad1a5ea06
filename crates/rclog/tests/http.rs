//! Full runs over HTTP against a mock API, with the state kept on disk.

use rclog::core::{SessionLogEntry, SystemId, SystemLogEntry};
use rclog::state::{FileStateStore, StateStore};
use rclog::sync::{ApiConfig, HttpTransport, SyncConfig};
use rclog::{FetchConfig, FetchError, Fetcher, LogKind};
use rclog_testkit::fixtures::system_log;
use rclog_testkit::samples::{page_body, EMPTY_PAGE, SESSION_PAGE, SYSTEM_PAGE};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::new(ApiConfig::new("key-1", "secret-1").with_base_url(server.uri())).unwrap()
}

fn config(kind: LogKind, page_size: u32) -> FetchConfig {
    let mut config = FetchConfig::new(kind);
    config.sync = SyncConfig::new(page_size).unwrap();
    config
}

async fn mount_page(server: &MockServer, resource: &str, offset: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(resource))
        .and(header("x-api-key", "key-1"))
        .and(header("x-api-secret-key", "secret-1"))
        .and(query_param("offset", offset))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn system_log_paged_over_http_and_checkpoint_saved() {
    let server = MockServer::start().await;
    mount_page(&server, "/logs", "0", page_body(&system_log(18..=20))).await;
    mount_page(&server, "/logs", "3", page_body(&system_log(15..=17))).await;

    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(&state_path, r#"{ "system": 16 }"#).unwrap();

    let fetcher = Fetcher::new(
        transport(&server),
        FileStateStore::new(&state_path),
        config(LogKind::System, 3),
    );
    let mut out = Vec::new();
    let report = fetcher.run(&mut out).await.unwrap();

    let written: Vec<SystemLogEntry> = serde_json::from_slice(&out).unwrap();
    let ids: Vec<u64> = written.iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![17, 18, 19, 20]);
    assert_eq!(report.sync.pages_fetched, 2);

    let saved = FileStateStore::new(&state_path).load().await.unwrap();
    assert_eq!(saved.get::<SystemLogEntry>().unwrap(), Some(SystemId(20)));
}

#[tokio::test]
async fn session_log_sample_over_http() {
    let server = MockServer::start().await;
    mount_page(&server, "/session-logs", "0", SESSION_PAGE.to_string()).await;
    mount_page(&server, "/session-logs", "100", EMPTY_PAGE.to_string()).await;

    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    let fetcher = Fetcher::new(
        transport(&server),
        FileStateStore::new(&state_path),
        FetchConfig::new(LogKind::Session),
    );

    let mut out = Vec::new();
    let report = fetcher.run(&mut out).await.unwrap();

    let written: Vec<SessionLogEntry> = serde_json::from_slice(&out).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].action, "Login");
    assert_eq!(report.checkpoint, "f1b6d3c2-9a0e-4d7b-8a55-3c1e2b7d9f10");

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&state_path).unwrap()).unwrap();
    assert_eq!(saved["session"], "f1b6d3c2-9a0e-4d7b-8a55-3c1e2b7d9f10");
}

#[tokio::test]
async fn rejected_credentials_leave_state_file_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(&state_path, r#"{ "system": 2307 }"#).unwrap();

    let fetcher = Fetcher::new(
        transport(&server),
        FileStateStore::new(&state_path),
        config(LogKind::System, 10),
    );
    let mut out = Vec::new();
    let err = fetcher.run(&mut out).await.unwrap_err();

    assert!(err.is_credential());
    assert!(out.is_empty());
    assert_eq!(
        std::fs::read_to_string(&state_path).unwrap(),
        r#"{ "system": 2307 }"#
    );
}

#[tokio::test]
async fn malformed_state_file_stops_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SYSTEM_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    std::fs::write(&state_path, "id: 2309\n").unwrap();

    let fetcher = Fetcher::new(
        transport(&server),
        FileStateStore::new(&state_path),
        config(LogKind::System, 10),
    );
    let err = fetcher.run(std::io::sink()).await.unwrap_err();

    assert!(matches!(err, FetchError::State(_)));
}
