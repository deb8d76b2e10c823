/*
[INPUT]:  Order book URL (first CLI argument, optional)
[OUTPUT]: Snapshot summary (entry counts, best bid/ask)
[POS]:    Examples - public order book query
[UPDATE]: When the feed endpoint changes
*/

use bandbook_adapter::*;

const DEFAULT_URL: &str = "https://api.deversifi.com/bfx/v2/book/tETHUSD/R0";

/// Example: fetch one raw order book snapshot (no authentication required)
#[tokio::main]
async fn main() {
    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    println!("=== Order Book Feed Example ===\n");

    let client = match FeedClient::new(&url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let entries = match client.fetch_order_book().await {
        Ok(entries) => entries,
        Err(e) => {
            println!("✗ Error: {} (retryable: {})", e, e.is_retryable());
            return;
        }
    };

    let best_bid = entries
        .iter()
        .filter(|e| e.side() == BookSide::Bid)
        .max_by_key(|e| e.price);
    let best_ask = entries
        .iter()
        .filter(|e| e.side() == BookSide::Ask)
        .min_by_key(|e| e.price);

    println!("✓ {} entries", entries.len());
    for (label, best) in [("best bid", best_bid), ("best ask", best_ask)] {
        match best {
            Some(e) => println!("  {}: {} x {}", label, e.price, e.amount()),
            None => println!("  {}: none", label),
        }
    }
}
