/*
[INPUT]:  Order placements (debits) and reconciled fills (credits).
[OUTPUT]: Quote / base balances of the simulated account.
[POS]:    State layer - account balances.
[UPDATE]: When adding assets or changing balance bookkeeping.
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which currency of the pair an amount is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Quote,
    Base,
}

impl Asset {
    pub fn as_str(self) -> &'static str {
        match self {
            Asset::Quote => "quote",
            Asset::Base => "base",
        }
    }
}

/// Simulated account balances.
///
/// No validation: callers size orders from the current balance, so a debit
/// never exceeds what is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(alias = "usd", with = "rust_decimal::serde::str")]
    pub quote: Decimal,
    #[serde(alias = "eth", with = "rust_decimal::serde::str")]
    pub base: Decimal,
}

impl Account {
    pub fn new(quote: Decimal, base: Decimal) -> Self {
        Self { quote, base }
    }

    pub fn balance(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Quote => self.quote,
            Asset::Base => self.base,
        }
    }

    pub fn debit(&mut self, asset: Asset, amount: Decimal) {
        *self.balance_mut(asset) -= amount;
    }

    pub fn credit(&mut self, asset: Asset, amount: Decimal) {
        *self.balance_mut(asset) += amount;
    }

    fn balance_mut(&mut self, asset: Asset) -> &mut Decimal {
        match asset {
            Asset::Quote => &mut self.quote,
            Asset::Base => &mut self.base,
        }
    }
}
