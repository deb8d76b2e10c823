/*
[INPUT]:  Configured order book URL
[OUTPUT]: Raw order book snapshot (unordered `[id, price, signedAmount]` entries)
[POS]:    HTTP layer - public market data endpoint (no auth required)
[UPDATE]: When the feed endpoint or response format changes
*/

use crate::http::{FeedClient, Result};
use crate::types::RawMarketEntry;
use reqwest::Method;
use tracing::debug;

impl FeedClient {
    /// Fetch the full raw order book snapshot
    ///
    /// GET {orderbook_url}
    pub async fn fetch_order_book(&self) -> Result<Vec<RawMarketEntry>> {
        let builder = self.orderbook_request(Method::GET);
        let entries: Vec<RawMarketEntry> = self.send_json(builder).await?;
        debug!(entries = entries.len(), "fetched order book snapshot");
        Ok(entries)
    }
}
