/*
[INPUT]:  Sized and priced orders from the placement loop; fill decisions from reconciliation.
[OUTPUT]: Open simulated bid/ask orders per side.
[POS]:    State layer - resting order tracking.
[UPDATE]: When order fields or per-side bookkeeping change.
*/

use rust_decimal::Decimal;

use bandbook_adapter::BookSide;

use crate::ledger::Asset;

/// Synthetic resting limit order.
///
/// A bid commits quote (`input_amount`) to receive base (`output_amount`);
/// an ask commits base to receive quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOrder {
    pub side: BookSide,
    pub price: Decimal,
    pub input_amount: Decimal,
    pub output_amount: Decimal,
}

impl SimOrder {
    pub fn bid(price: Decimal, input_quote: Decimal, output_base: Decimal) -> Self {
        Self {
            side: BookSide::Bid,
            price,
            input_amount: input_quote,
            output_amount: output_base,
        }
    }

    pub fn ask(price: Decimal, input_base: Decimal, output_quote: Decimal) -> Self {
        Self {
            side: BookSide::Ask,
            price,
            input_amount: input_base,
            output_amount: output_quote,
        }
    }

    pub fn input_asset(&self) -> Asset {
        match self.side {
            BookSide::Bid => Asset::Quote,
            BookSide::Ask => Asset::Base,
        }
    }

    pub fn output_asset(&self) -> Asset {
        match self.side {
            BookSide::Bid => Asset::Base,
            BookSide::Ask => Asset::Quote,
        }
    }
}

/// Open orders per side, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveOrderBook {
    pub bids: Vec<SimOrder>,
    pub asks: Vec<SimOrder>,
}

impl ActiveOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self, side: BookSide) -> &[SimOrder] {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    pub fn count(&self, side: BookSide) -> usize {
        self.orders(side).len()
    }

    pub fn insert(&mut self, order: SimOrder) {
        match order.side {
            BookSide::Bid => self.bids.push(order),
            BookSide::Ask => self.asks.push(order),
        }
    }

    /// Sum of amounts committed by open orders on `side`.
    pub fn committed(&self, side: BookSide) -> Decimal {
        self.orders(side).iter().map(|order| order.input_amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
