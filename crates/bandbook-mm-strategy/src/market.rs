/*
[INPUT]:  Raw order book snapshot (unordered `RawMarketEntry` list).
[OUTPUT]: Best bid / best ask of the sample (`Spread`).
[POS]:    Data layer - snapshot analysis (no trading logic).
[UPDATE]: When changing side partitioning or best-price extraction.
*/

use rust_decimal::Decimal;

use bandbook_adapter::{BookSide, RawMarketEntry};

use crate::error::{EngineError, Result};

/// Best prices of one order book sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spread {
    pub highest_bid: Decimal,
    pub lowest_ask: Decimal,
}

impl Spread {
    /// Midpoint between best bid and best ask.
    pub fn midpoint(&self) -> Decimal {
        (self.highest_bid + self.lowest_ask) / Decimal::TWO
    }

    /// Lowest ask minus highest bid. Negative when the sampled book is crossed.
    pub fn width(&self) -> Decimal {
        self.lowest_ask - self.highest_bid
    }
}

/// Partition `entries` by side and extract the highest bid and lowest ask.
///
/// Fails with [`EngineError::EmptySide`] when either side is missing and with
/// [`EngineError::NonPositivePrice`] when a best price is zero or negative; bids
/// are checked first in both cases.
pub fn compute_spread(entries: &[RawMarketEntry]) -> Result<Spread> {
    let mut highest_bid: Option<Decimal> = None;
    let mut lowest_ask: Option<Decimal> = None;

    for entry in entries {
        match entry.side() {
            BookSide::Bid => {
                highest_bid = Some(highest_bid.map_or(entry.price, |best| best.max(entry.price)));
            }
            BookSide::Ask => {
                lowest_ask = Some(lowest_ask.map_or(entry.price, |best| best.min(entry.price)));
            }
        }
    }

    let highest_bid = highest_bid.ok_or(EngineError::EmptySide(BookSide::Bid))?;
    let lowest_ask = lowest_ask.ok_or(EngineError::EmptySide(BookSide::Ask))?;
    ensure_positive(BookSide::Bid, highest_bid)?;
    ensure_positive(BookSide::Ask, lowest_ask)?;

    Ok(Spread {
        highest_bid,
        lowest_ask,
    })
}

fn ensure_positive(side: BookSide, price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(EngineError::NonPositivePrice { side, price });
    }
    Ok(())
}
