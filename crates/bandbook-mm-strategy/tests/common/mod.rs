/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared fixtures for engine integration tests
[POS]:    Test infrastructure - shared across integration test modules
[UPDATE]: When adding new test patterns or fixtures
*/

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use bandbook_adapter::FeedClient;
use bandbook_mm_strategy::placement::FixedSequence;
use bandbook_mm_strategy::{Account, MarketMaker, Scheduler, StrategyParams};
use rust_decimal::Decimal;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOOK_PATH: &str = "/bfx/v2/book/tETHUSD/R0";

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

/// Serve `body` with `status` on the book path, replacing earlier mocks
pub async fn serve_book(server: &MockServer, status: u16, body: serde_json::Value) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path(BOOK_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Scheduler wired to a real feed client pointed at `server`
pub fn scheduler_for(server: &MockServer, slots: usize) -> Scheduler {
    let client = FeedClient::new(&format!("{}{}", server.uri(), BOOK_PATH)).expect("client init");
    let engine = MarketMaker::new(
        StrategyParams {
            order_range: dec("5"),
            allowed_active_orders: slots,
        },
        Account::new(dec("2000"), dec("10")),
        Box::new(FixedSequence::new([dec("0.25"), dec("0.75")])),
    );
    Scheduler::new(
        Arc::new(client),
        engine,
        Duration::from_secs(5),
        Duration::from_secs(30),
    )
}
