/*
[INPUT]:  Feed schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with (de)serialization support
[POS]:    Data layer - type definitions for feed communication
[UPDATE]: When the feed schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::enums::BookSide;

/// One resting entry of the public order book.
///
/// The feed sends entries as `[id, price, signedAmount]` arrays. A negative
/// amount marks an ask, anything else a bid. Entries arrive unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMarketEntry {
    pub id: u64,
    pub price: Decimal,
    pub signed_amount: Decimal,
}

impl RawMarketEntry {
    pub fn new(id: u64, price: Decimal, signed_amount: Decimal) -> Self {
        Self {
            id,
            price,
            signed_amount,
        }
    }

    pub fn side(&self) -> BookSide {
        if self.signed_amount.is_sign_negative() && !self.signed_amount.is_zero() {
            BookSide::Ask
        } else {
            BookSide::Bid
        }
    }

    /// Unsigned size of the entry.
    pub fn amount(&self) -> Decimal {
        self.signed_amount.abs()
    }
}

impl<'de> Deserialize<'de> for RawMarketEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (id, price, signed_amount) = <(u64, Decimal, Decimal)>::deserialize(deserializer)?;
        Ok(Self {
            id,
            price,
            signed_amount,
        })
    }
}

impl Serialize for RawMarketEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.id, self.price, self.signed_amount).serialize(serializer)
    }
}
