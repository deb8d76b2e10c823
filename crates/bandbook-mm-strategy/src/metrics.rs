/*
[INPUT]:  Scheduler events (cycle start/finish/skip/failure, balance reports)
[OUTPUT]: Snapshot-friendly cycle metrics
[POS]:    Shared runtime metrics between the update and report loops
[UPDATE]: When adding/removing scheduler-level runtime signals
*/

use std::time::Instant;

use crate::strategy::BalanceSnapshot;

#[derive(Debug, Clone)]
pub struct CycleMetricsSnapshot {
    pub cycles_started: u64,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    pub cycles_skipped: u64,
    pub orders_placed: u64,
    pub orders_filled: u64,
    pub last_balance: Option<BalanceSnapshot>,
    pub last_error: Option<String>,
    pub last_update: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct CycleMetrics {
    cycles_started: u64,
    cycles_completed: u64,
    cycles_failed: u64,
    cycles_skipped: u64,
    orders_placed: u64,
    orders_filled: u64,
    last_balance: Option<BalanceSnapshot>,
    last_error: Option<String>,
    last_update: Option<Instant>,
}

impl CycleMetrics {
    pub fn snapshot(&self) -> CycleMetricsSnapshot {
        CycleMetricsSnapshot {
            cycles_started: self.cycles_started,
            cycles_completed: self.cycles_completed,
            cycles_failed: self.cycles_failed,
            cycles_skipped: self.cycles_skipped,
            orders_placed: self.orders_placed,
            orders_filled: self.orders_filled,
            last_balance: self.last_balance,
            last_error: self.last_error.clone(),
            last_update: self.last_update,
        }
    }

    pub fn record_started(&mut self) {
        self.cycles_started += 1;
        self.last_update = Some(Instant::now());
    }

    pub fn record_completed(&mut self, placed: usize, filled: usize) {
        self.cycles_completed += 1;
        self.orders_placed += placed as u64;
        self.orders_filled += filled as u64;
        self.last_update = Some(Instant::now());
    }

    pub fn record_failed(&mut self, error: String) {
        self.cycles_failed += 1;
        self.last_error = Some(error);
        self.last_update = Some(Instant::now());
    }

    pub fn record_skipped(&mut self) {
        self.cycles_skipped += 1;
        self.last_update = Some(Instant::now());
    }

    pub fn record_balance(&mut self, balance: BalanceSnapshot) {
        self.last_balance = Some(balance);
        self.last_update = Some(Instant::now());
    }
}
