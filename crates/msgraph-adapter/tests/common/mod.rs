/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for msgraph-adapter tests

use std::sync::Arc;

use msgraph_adapter::{ClientConfig, GraphServiceClient, StaticTokenProvider};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Bearer token every mock expects
pub fn mock_access_token() -> String {
    "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiJ9.graph.signature".to_string()
}

/// Client whose base URL points at the mock server
#[allow(dead_code)]
pub fn graph_client(server: &MockServer) -> GraphServiceClient {
    let config = ClientConfig::with_base_url(format!("{}/v1.0", server.uri()));
    GraphServiceClient::with_provider(config, Arc::new(StaticTokenProvider::new(mock_access_token())))
        .expect("client init")
}

/// Graph error envelope body
#[allow(dead_code)]
pub fn odata_error(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "innerError": {
                "request-id": "b3a3f8c2-0d3c-4a9e-9b8a-1f1e2d3c4b5a",
                "date": "2024-05-01T10:00:00"
            }
        }
    })
}
