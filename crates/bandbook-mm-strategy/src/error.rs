/*
[INPUT]:  Tick failures (empty or unpriced book side, unreachable feed, exhausted slots)
[OUTPUT]: Recoverable engine error type
[POS]:    Error handling layer - per-cycle failures that abort a tick
[UPDATE]: When adding new failure kinds to the update cycle
*/

use bandbook_adapter::{BookSide, FeedError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a single update cycle. Every variant leaves engine state untouched
/// and is retried on the next scheduled tick.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Snapshot has no entries on one side of the book
    #[error("no {0}s")]
    EmptySide(BookSide),

    /// Best price of a side is zero or negative; no order can be sized against it
    #[error("best {side} price must be positive, got {price}")]
    NonPositivePrice { side: BookSide, price: Decimal },

    /// Feed did not answer with a usable snapshot
    #[error("order book feed unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    /// Sizing was asked for an order with every slot already taken
    #[error("no free {side} slot ({active} of {max} in use)")]
    NoFreeSlot {
        side: BookSide,
        active: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
