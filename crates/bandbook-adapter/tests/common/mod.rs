/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bandbook-adapter tests

use wiremock::MockServer;

pub const BOOK_PATH: &str = "/bfx/v2/book/tETHUSD/R0";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Order book URL served by the given mock server
pub fn book_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), BOOK_PATH)
}

/// Small two-sided snapshot in feed format
pub fn sample_book() -> serde_json::Value {
    serde_json::json!([
        [1001, 2999.5, 1.0],
        [1002, 3000.0, 0.4],
        [1003, 3001.5, -0.8],
        [1004, 3003.0, -2.5]
    ])
}
