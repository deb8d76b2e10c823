/*
[INPUT]:  Raw order book snapshot per tick, band width, slot count, uniform source.
[OUTPUT]: Updated account + active order book, and a `TickSummary` of what happened.
[POS]:    Strategy layer - band market making core (no I/O, no timers).
[UPDATE]: When changing the order of tick steps, top-up rules, or tick reporting.
*/

use rust_decimal::Decimal;
use tracing::{debug, info};

use bandbook_adapter::{BookSide, RawMarketEntry};

use crate::error::Result;
use crate::ledger::{Account, Asset};
use crate::market::{Spread, compute_spread};
use crate::order_state::{ActiveOrderBook, SimOrder};
use crate::placement::{Boundary, PlacementRange, UniformSource, compute_range, sample_price};
use crate::reconcile::{FreedAssets, reconcile};
use crate::sizing::{size_ask, size_bid};

/// Band and slot parameters of the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyParams {
    /// Full band width in percent; each side extends half of it around its best price.
    pub order_range: Decimal,
    /// Open orders allowed per side.
    pub allowed_active_orders: usize,
}

/// What one tick observed and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    pub spread: Spread,
    pub bid_range: PlacementRange,
    pub ask_range: PlacementRange,
    pub freed: FreedAssets,
    pub placed_bids: Vec<SimOrder>,
    pub placed_asks: Vec<SimOrder>,
}

/// Read-only view of balances and open order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub quote: Decimal,
    pub base: Decimal,
    pub active_bids: usize,
    pub active_asks: usize,
    /// Quote locked in open bids.
    pub committed_quote: Decimal,
    /// Base locked in open asks.
    pub committed_base: Decimal,
}

/// Engine state for one market: account, open orders, and the price source.
#[derive(Debug)]
pub struct MarketMaker {
    params: StrategyParams,
    account: Account,
    book: ActiveOrderBook,
    pricer: Box<dyn UniformSource>,
}

impl MarketMaker {
    pub fn new(
        params: StrategyParams,
        initial_account: Account,
        pricer: Box<dyn UniformSource>,
    ) -> Self {
        Self {
            params,
            account: initial_account,
            book: ActiveOrderBook::new(),
            pricer,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn book(&self) -> &ActiveOrderBook {
        &self.book
    }

    pub fn balance_snapshot(&self) -> BalanceSnapshot {
        BalanceSnapshot {
            quote: self.account.quote,
            base: self.account.base,
            active_bids: self.book.count(BookSide::Bid),
            active_asks: self.book.count(BookSide::Ask),
            committed_quote: self.book.committed(BookSide::Bid),
            committed_base: self.book.committed(BookSide::Ask),
        }
    }

    /// Bid and ask ranges for `spread`, each clamped at the spread midpoint.
    pub fn placement_ranges(&self, spread: &Spread) -> (PlacementRange, PlacementRange) {
        let mid = spread.midpoint();
        let pct = self.params.order_range;
        let bid_range = compute_range(spread.highest_bid, pct, Boundary::upper(mid));
        let ask_range = compute_range(spread.lowest_ask, pct, Boundary::lower(mid));
        (bid_range, ask_range)
    }

    /// Run one tick against `entries`.
    ///
    /// Nothing is mutated until the snapshot has both sides. Reconciliation
    /// credits freed assets before empty slots are refilled.
    pub fn apply_snapshot(&mut self, entries: &[RawMarketEntry]) -> Result<TickSummary> {
        let spread = compute_spread(entries)?;
        info!(
            highest_bid = %spread.highest_bid,
            lowest_ask = %spread.lowest_ask,
            width = %spread.width(),
            "sampled spread"
        );

        let (bid_range, ask_range) = self.placement_ranges(&spread);
        info!(
            bid_low = %bid_range.low,
            bid_high = %bid_range.high,
            ask_low = %ask_range.low,
            ask_high = %ask_range.high,
            "placement ranges"
        );

        let freed = reconcile(&mut self.book, &spread);
        if !freed.is_empty() {
            self.account.credit(Asset::Quote, freed.quote);
            self.account.credit(Asset::Base, freed.base);
            info!(
                filled_bids = freed.filled_bids,
                filled_asks = freed.filled_asks,
                freed_quote = %freed.quote,
                freed_base = %freed.base,
                "orders filled"
            );
        }

        let placed_bids = self.top_up(BookSide::Bid, &bid_range)?;
        let placed_asks = self.top_up(BookSide::Ask, &ask_range)?;

        Ok(TickSummary {
            spread,
            bid_range,
            ask_range,
            freed,
            placed_bids,
            placed_asks,
        })
    }

    /// Fill every empty slot on `side` with an order priced inside `range`.
    fn top_up(&mut self, side: BookSide, range: &PlacementRange) -> Result<Vec<SimOrder>> {
        let max_slots = self.params.allowed_active_orders;
        let mut placed = Vec::new();

        while self.book.count(side) < max_slots {
            let price = sample_price(range, self.pricer.as_mut());
            let active = self.book.count(side);
            let order = match side {
                BookSide::Bid => {
                    let amounts = size_bid(price, self.account.quote, active, max_slots)?;
                    SimOrder::bid(price, amounts.input_quote, amounts.output_base)
                }
                BookSide::Ask => {
                    let amounts = size_ask(price, self.account.base, active, max_slots)?;
                    SimOrder::ask(price, amounts.input_base, amounts.output_quote)
                }
            };

            self.account.debit(order.input_asset(), order.input_amount);
            self.book.insert(order);
            placed.push(order);

            info!(
                side = %side,
                price = %order.price,
                input = %order.input_amount,
                input_asset = order.input_asset().as_str(),
                output = %order.output_amount,
                output_asset = order.output_asset().as_str(),
                "order placed"
            );
        }

        if placed.is_empty() {
            debug!(side = %side, active = self.book.count(side), "no free slots");
        }

        Ok(placed)
    }
}
