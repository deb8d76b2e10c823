/*
[INPUT]:  Public API exports for bandbook-mm-strategy crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod error;
pub mod ledger;
pub mod market;
pub mod metrics;
pub mod order_state;
pub mod placement;
pub mod reconcile;
pub mod scheduler;
pub mod sizing;
pub mod strategy;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use error::EngineError;
pub use ledger::{Account, Asset};
pub use scheduler::{CycleOutcome, FetchFuture, OrderBookFeed, Scheduler};
pub use strategy::{BalanceSnapshot, MarketMaker, StrategyParams, TickSummary};
