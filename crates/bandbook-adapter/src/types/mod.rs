/*
[INPUT]:  Order book feed schema and serde requirements
[OUTPUT]: Typed Rust structs/enums with deserialization support
[POS]:    Data layer - type definitions for feed communication
[UPDATE]: When the feed schema changes or new types added
*/

pub mod enums;
pub mod models;

pub use enums::*;
pub use models::*;
