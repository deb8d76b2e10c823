/*
[INPUT]:  Best price per side, configured percent range, midpoint boundary, uniform source.
[OUTPUT]: Placement ranges per side and order prices drawn from them.
[POS]:    Pricing layer - band computation and price sampling.
[UPDATE]: When changing band width semantics, clamping, or the random source.
*/

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

const PERCENT_HALF_DENOMINATOR: i64 = 200;
/// Fractional digits of a uniform draw.
const UNIT_SCALE: u32 = 18;
const UNIT_STEPS: u64 = 1_000_000_000_000_000_000;

/// Price interval a new order's price is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl PlacementRange {
    pub fn width(&self) -> Decimal {
        self.high - self.low
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.low && price <= self.high
    }
}

/// Optional clamps applied to a computed range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boundary {
    pub upper: Option<Decimal>,
    pub lower: Option<Decimal>,
}

impl Boundary {
    pub fn none() -> Self {
        Self::default()
    }

    /// Cap the high end of the range (bid side, capped at the midpoint).
    pub fn upper(upper: Decimal) -> Self {
        Self {
            upper: Some(upper),
            lower: None,
        }
    }

    /// Floor the low end of the range (ask side, floored at the midpoint).
    pub fn lower(lower: Decimal) -> Self {
        Self {
            upper: None,
            lower: Some(lower),
        }
    }
}

/// Symmetric multiplicative band around `best_price`.
///
/// `m = 1 + percent_range / 200`, `high = best * m`, `low = best / m`, then
/// `high` is capped by `boundary.upper` and `low` floored by `boundary.lower`.
pub fn compute_range(
    best_price: Decimal,
    percent_range: Decimal,
    boundary: Boundary,
) -> PlacementRange {
    let multiplier = Decimal::ONE + percent_range / Decimal::from(PERCENT_HALF_DENOMINATOR);
    let mut high = best_price * multiplier;
    let mut low = best_price / multiplier;

    if let Some(upper) = boundary.upper {
        if high > upper {
            high = upper;
        }
    }
    if let Some(lower) = boundary.lower {
        if low < lower {
            low = lower;
        }
    }

    PlacementRange { low, high }
}

/// Source of uniform draws in `[0, 1)`.
pub trait UniformSource: Send + fmt::Debug {
    fn next_unit(&mut self) -> Decimal;
}

/// Uniform source backed by a `rand` generator.
#[derive(Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded generator for reproducible runs, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng + Send + fmt::Debug> UniformSource for RngSource<R> {
    fn next_unit(&mut self) -> Decimal {
        let steps = self.rng.gen_range(0..UNIT_STEPS);
        Decimal::new(steps as i64, UNIT_SCALE)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: VecDeque<Decimal>,
}

impl FixedSequence {
    pub fn new(values: impl IntoIterator<Item = Decimal>) -> Self {
        let values: VecDeque<Decimal> = values.into_iter().collect();
        Self { values }
    }
}

impl UniformSource for FixedSequence {
    fn next_unit(&mut self) -> Decimal {
        match self.values.pop_front() {
            Some(value) => {
                self.values.push_back(value);
                value
            }
            None => Decimal::ZERO,
        }
    }
}

/// Draw a price uniformly from `range`: `low + U * (high - low)`.
pub fn sample_price(range: &PlacementRange, source: &mut dyn UniformSource) -> Decimal {
    range.low + source.next_unit() * range.width()
}
