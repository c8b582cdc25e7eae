//! Common test utilities for router-level testing with in-memory stores.
//!
//! This module provides a test fixture that builds the full router in
//! process, with in-memory source and destination stores injected, so the
//! HTTP surface can be tested without Google APIs.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use drivemove_core::{
    testing::{
        FailingStoreFactory, MemoryDestinationStore, MemorySourceStore, OperationLog,
        StaticStoreFactory,
    },
    BatchConfig, BatchOrchestrator, StagingArea, StoreFactory,
};
use drivemove_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use drivemove_core::testing::fixtures;

/// Test fixture for router testing with in-memory stores.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_move() {
///     let fixture = TestFixture::new();
///     fixture.source.add_file("id-1", "a.wav", vec![1, 2, 3]).await;
///
///     let response = fixture.post("/file_transfer").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Source store - seed files and inject failures
    pub source: Arc<MemorySourceStore>,
    /// Destination store - inspect uploaded objects
    pub destination: Arc<MemoryDestinationStore>,
    /// Operation log shared by both stores
    pub log: OperationLog,
    /// Staging directory for the fixture's runs
    pub staging_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture whose store clients connect successfully.
    pub fn new() -> Self {
        let log = OperationLog::default();
        let source = Arc::new(MemorySourceStore::with_log(log.clone()));
        let destination = Arc::new(MemoryDestinationStore::with_log(log.clone()));
        let factory = StaticStoreFactory::new(source.clone(), destination.clone());
        Self::build(Arc::new(factory), source, destination, log)
    }

    /// Create a fixture whose client setup always fails.
    pub fn with_failing_setup(message: &str) -> Self {
        let log = OperationLog::default();
        let source = Arc::new(MemorySourceStore::with_log(log.clone()));
        let destination = Arc::new(MemoryDestinationStore::with_log(log.clone()));
        Self::build(
            Arc::new(FailingStoreFactory::new(message)),
            source,
            destination,
            log,
        )
    }

    fn build(
        factory: Arc<dyn StoreFactory>,
        source: Arc<MemorySourceStore>,
        destination: Arc<MemoryDestinationStore>,
        log: OperationLog,
    ) -> Self {
        let staging_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixtures::config("test-folder", "test-bucket");

        let batch_config = BatchConfig::from(&config)
            .with_staging(StagingArea::new(staging_dir.path()));
        let orchestrator = Arc::new(BatchOrchestrator::new(batch_config, factory));
        let state = Arc::new(AppState::new(config, orchestrator));

        Self {
            router: create_router(state),
            source,
            destination,
            log,
            staging_dir,
        }
    }

    /// Serve the router on an ephemeral local port.
    pub async fn serve(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        addr
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path).await
    }

    /// Send a POST request with no body.
    pub async fn post(&self, path: &str) -> TestResponse {
        self.request("POST", path).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
