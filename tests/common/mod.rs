/*!
 * Common test utilities for the romanize test suite
 */

use anyhow::Result;
use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use romanize::transliteration::LanguageDetector;

// Re-export the mock strategies module
pub mod mock_strategies;

/// Endpoint nothing listens on; every call fails fast with a connection error
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Detector that never reaches the network
pub fn heuristic_detector() -> LanguageDetector {
    LanguageDetector::heuristic_only()
}

/// Endpoint that accepts connections and never answers
///
/// Requests against it only end when their deadline does.
pub async fn stalled_endpoint() -> Result<(String, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    Ok((format!("http://{}", address), handle))
}

/// Request URIs (path and query) received by a mock server
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    pub fn uris(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// HTTP server answering every request with the same status and body
pub struct MockServer {
    pub base_url: String,
    pub requests: RequestLog,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

pub async fn start_mock_server(status: u16, body: &'static str) -> Result<MockServer> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let requests = RequestLog::default();
    let log = requests.clone();

    let app = Router::new().fallback(move |uri: Uri| {
        let log = log.clone();
        async move {
            log.0.lock().unwrap().push(uri.to_string());
            let status = StatusCode::from_u16(status).unwrap();
            (status, body).into_response()
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    Ok(MockServer {
        base_url,
        requests,
        shutdown: Some(shutdown_tx),
    })
}
