/*
[INPUT]:  Raw order book entry fields
[OUTPUT]: Book side classification
[POS]:    Data layer - enum definitions for feed communication
[UPDATE]: When side derivation rules change
*/

use serde::{Deserialize, Serialize};

/// Side of the public order book an entry rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl BookSide {
    pub fn as_str(self) -> &'static str {
        match self {
            BookSide::Bid => "bid",
            BookSide::Ask => "ask",
        }
    }
}

impl std::fmt::Display for BookSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
