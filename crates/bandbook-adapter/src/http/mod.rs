/*
[INPUT]:  HTTP client configuration and the order book endpoint
[OUTPUT]: HTTP responses and typed feed results
[POS]:    HTTP layer - REST feed communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod public;

pub use error::{FeedError, Result};

pub use client::{ClientConfig, FeedClient};
