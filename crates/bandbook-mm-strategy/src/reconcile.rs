/*
[INPUT]:  Active order book and the current sample's best prices.
[OUTPUT]: Orders judged filled removed from the book; assets they free.
[POS]:    Reconciliation layer - approximate fill detection.
[UPDATE]: When changing the fill predicate or freed-asset accounting.
*/

use rust_decimal::Decimal;

use crate::market::Spread;
use crate::order_state::{ActiveOrderBook, SimOrder};

/// Assets released by orders removed in one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreedAssets {
    pub quote: Decimal,
    pub base: Decimal,
    pub filled_bids: usize,
    pub filled_asks: usize,
}

impl FreedAssets {
    pub fn is_empty(&self) -> bool {
        self.filled_bids == 0 && self.filled_asks == 0
    }
}

/// A resting bid priced above the market's best bid counts as executed.
pub fn bid_filled(order: &SimOrder, highest_bid: Decimal) -> bool {
    order.price > highest_bid
}

/// A resting ask priced below the market's best ask counts as executed.
pub fn ask_filled(order: &SimOrder, lowest_ask: Decimal) -> bool {
    order.price < lowest_ask
}

/// Drop filled orders from `book` and total what they free.
///
/// Filled bids release their expected base, filled asks their expected quote.
/// Surviving orders keep their relative order.
pub fn reconcile(book: &mut ActiveOrderBook, spread: &Spread) -> FreedAssets {
    let mut freed = FreedAssets::default();

    book.bids.retain(|order| {
        if bid_filled(order, spread.highest_bid) {
            freed.base += order.output_amount;
            freed.filled_bids += 1;
            false
        } else {
            true
        }
    });

    book.asks.retain(|order| {
        if ask_filled(order, spread.lowest_ask) {
            freed.quote += order.output_amount;
            freed.filled_asks += 1;
            false
        } else {
            true
        }
    });

    freed
}
