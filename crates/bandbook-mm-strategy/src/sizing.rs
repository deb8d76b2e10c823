/*
[INPUT]:  Order price, free balance, active order count, slot count per side.
[OUTPUT]: Committed input / expected output amounts of a new order.
[POS]:    Sizing layer - even split of free capital across empty slots.
[UPDATE]: When changing amount precision or rounding rules.
*/

use rust_decimal::{Decimal, RoundingStrategy};

use bandbook_adapter::BookSide;

use crate::error::{EngineError, Result};

/// Fractional digits carried by quote currency amounts.
pub const QUOTE_SCALE: u32 = 2;
/// Fractional digits carried by base currency amounts.
pub const BASE_SCALE: u32 = 18;

// Exact halves round toward zero.
const HALF_DOWN: RoundingStrategy = RoundingStrategy::MidpointTowardZero;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidAmounts {
    pub input_quote: Decimal,
    pub output_base: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskAmounts {
    pub input_base: Decimal,
    pub output_quote: Decimal,
}

fn free_slots(side: BookSide, active: usize, max_slots: usize) -> Result<Decimal> {
    if active >= max_slots {
        return Err(EngineError::NoFreeSlot {
            side,
            active,
            max: max_slots,
        });
    }
    Ok(Decimal::from(max_slots - active))
}

/// Quote committed to one new bid and the base it buys at `price`.
pub fn size_bid(
    price: Decimal,
    quote_balance: Decimal,
    active_bids: usize,
    max_slots: usize,
) -> Result<BidAmounts> {
    let slots = free_slots(BookSide::Bid, active_bids, max_slots)?;
    if price <= Decimal::ZERO {
        return Err(EngineError::NonPositivePrice {
            side: BookSide::Bid,
            price,
        });
    }
    let input_quote = (quote_balance / slots).round_dp_with_strategy(QUOTE_SCALE, HALF_DOWN);
    let output_base = (input_quote / price).round_dp_with_strategy(BASE_SCALE, HALF_DOWN);
    Ok(BidAmounts {
        input_quote,
        output_base,
    })
}

/// Base committed to one new ask and the quote it returns at `price`.
pub fn size_ask(
    price: Decimal,
    base_balance: Decimal,
    active_asks: usize,
    max_slots: usize,
) -> Result<AskAmounts> {
    let slots = free_slots(BookSide::Ask, active_asks, max_slots)?;
    let input_base = (base_balance / slots).round_dp_with_strategy(BASE_SCALE, HALF_DOWN);
    let output_quote = (input_base * price).round_dp_with_strategy(QUOTE_SCALE, HALF_DOWN);
    Ok(AskAmounts {
        input_base,
        output_quote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal")
    }

    #[test]
    fn bid_splits_balance_over_free_slots() {
        let amounts = size_bid(Decimal::from(500), Decimal::from(1000), 5, 7).expect("slots");
        assert_eq!(amounts.input_quote, Decimal::from(500));
        assert_eq!(amounts.output_base, Decimal::ONE);
    }

    #[test]
    fn bid_rounds_quote_to_cents() {
        let amounts = size_bid(Decimal::from(500), Decimal::from(1000), 5, 8).expect("slots");
        assert_eq!(amounts.input_quote, dec("333.33"));
        assert_eq!(amounts.output_base, dec("0.66666"));
    }

    #[test]
    fn ask_rounds_base_to_eighteen_digits() {
        let amounts = size_ask(Decimal::from(500), Decimal::ONE, 5, 8).expect("slots");
        assert_eq!(amounts.input_base, dec("0.333333333333333333"));
        assert_eq!(amounts.input_base.scale(), BASE_SCALE);
        assert_eq!(amounts.output_quote, dec("166.67"));
    }

    #[test]
    fn half_values_round_toward_zero() {
        // 0.125 / 1 slot -> 0.12, not 0.13
        let bid = size_bid(Decimal::ONE, dec("0.125"), 0, 1).expect("slots");
        assert_eq!(bid.input_quote, dec("0.12"));

        // 1 * 0.005 -> 0.00
        let ask = size_ask(dec("0.005"), Decimal::ONE, 0, 1).expect("slots");
        assert_eq!(ask.output_quote, dec("0.00"));

        // just above half still rounds away
        let ask = size_ask(dec("0.0051"), Decimal::ONE, 0, 1).expect("slots");
        assert_eq!(ask.output_quote, dec("0.01"));
    }

    #[test]
    fn sizing_without_free_slot_is_an_error() {
        let err = size_bid(Decimal::from(500), Decimal::from(1000), 5, 5).expect_err("full");
        assert!(matches!(
            err,
            EngineError::NoFreeSlot {
                side: BookSide::Bid,
                active: 5,
                max: 5
            }
        ));

        let err = size_ask(Decimal::from(500), Decimal::ONE, 6, 5).expect_err("over full");
        assert!(matches!(err, EngineError::NoFreeSlot { side: BookSide::Ask, .. }));
    }

    #[test]
    fn bid_at_zero_price_is_an_error() {
        let err = size_bid(Decimal::ZERO, Decimal::from(1000), 0, 2).expect_err("zero price");
        assert!(matches!(
            err,
            EngineError::NonPositivePrice {
                side: BookSide::Bid,
                ..
            }
        ));
    }

    #[test]
    fn sequential_bids_drain_balance_evenly() {
        let max = 4;
        let mut balance = Decimal::from(1000);
        let mut placed = Vec::new();
        for active in 0..max {
            let amounts = size_bid(Decimal::from(250), balance, active, max).expect("slots");
            balance -= amounts.input_quote;
            placed.push(amounts.input_quote);
        }
        assert_eq!(placed, vec![Decimal::from(250); 4]);
        assert_eq!(balance, Decimal::ZERO);
    }
}
