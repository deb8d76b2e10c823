/*
[INPUT]:  Order book feed, engine state, update/report periods, shutdown token.
[OUTPUT]: Periodic update cycles (fetch -> tick) guarded against overlap, periodic balance reports.
[POS]:    Runtime layer - timers and re-entrancy guard around the strategy core.
[UPDATE]: When changing cycle periods, overlap handling, or report contents.
*/

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use bandbook_adapter::{FeedClient, RawMarketEntry, Result as FeedResult};

use crate::error::{EngineError, Result};
use crate::metrics::{CycleMetrics, CycleMetricsSnapshot};
use crate::strategy::{BalanceSnapshot, MarketMaker, TickSummary};

/// In-flight fetch of one order book snapshot.
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = FeedResult<Vec<RawMarketEntry>>> + Send + 'a>>;

/// Source of raw order book snapshots.
pub trait OrderBookFeed: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;
}

impl OrderBookFeed for FeedClient {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move { self.fetch_order_book().await })
    }
}

/// Result of one attempt to run an update cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    Completed(TickSummary),
    /// Another cycle was still in flight.
    Skipped,
    Failed(EngineError),
}

/// Holds the busy flag for the lifetime of one cycle and clears it on drop.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn try_claim(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives the engine: one update cycle per `update_interval`, one balance
/// report per `report_interval`.
#[derive(Clone)]
pub struct Scheduler {
    feed: Arc<dyn OrderBookFeed>,
    engine: Arc<Mutex<MarketMaker>>,
    busy: Arc<AtomicBool>,
    metrics: Arc<Mutex<CycleMetrics>>,
    update_interval: Duration,
    report_interval: Duration,
}

impl Scheduler {
    pub fn new(
        feed: Arc<dyn OrderBookFeed>,
        engine: MarketMaker,
        update_interval: Duration,
        report_interval: Duration,
    ) -> Self {
        Self {
            feed,
            engine: Arc::new(Mutex::new(engine)),
            busy: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(Mutex::new(CycleMetrics::default())),
            update_interval,
            report_interval,
        }
    }

    /// True while an update cycle is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn metrics(&self) -> CycleMetricsSnapshot {
        self.metrics.lock().await.snapshot()
    }

    pub async fn balance_snapshot(&self) -> BalanceSnapshot {
        self.engine.lock().await.balance_snapshot()
    }

    /// Run both periodic loops until `shutdown` is cancelled.
    ///
    /// A cycle already in flight when shutdown arrives is left to finish on its own.
    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            update_interval_secs = self.update_interval.as_secs(),
            report_interval_secs = self.report_interval.as_secs(),
            "scheduler starting"
        );
        tokio::join!(
            self.update_loop(shutdown.clone()),
            self.report_loop(shutdown)
        );
        info!("scheduler stopped");
    }

    async fn update_loop(&self, shutdown: CancellationToken) {
        let mut update = tokio::time::interval(self.update_interval);
        update.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = update.tick() => {
                    // Each cycle gets its own task so the timer keeps firing,
                    // and skipping, while a fetch is suspended.
                    let scheduler = self.clone();
                    tokio::spawn(async move {
                        scheduler.run_update_cycle().await;
                    });
                }
            }
        }
    }

    async fn report_loop(&self, shutdown: CancellationToken) {
        let mut report = tokio::time::interval(self.report_interval);
        report.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = report.tick() => {
                    self.report_balances().await;
                }
            }
        }
    }

    /// Entry point of one update cycle: skip if another is in flight, otherwise
    /// fetch and tick. The busy flag is released on every exit path.
    pub async fn run_update_cycle(&self) -> CycleOutcome {
        let Some(_guard) = BusyGuard::try_claim(&self.busy) else {
            warn!("previous update cycle still in flight; skipping tick");
            self.metrics.lock().await.record_skipped();
            return CycleOutcome::Skipped;
        };

        self.metrics.lock().await.record_started();

        match self.update_once().await {
            Ok(summary) => {
                let placed = summary.placed_bids.len() + summary.placed_asks.len();
                let filled = summary.freed.filled_bids + summary.freed.filled_asks;
                self.metrics.lock().await.record_completed(placed, filled);
                info!(placed, filled, "update cycle complete");
                CycleOutcome::Completed(summary)
            }
            Err(err) => {
                warn!(error = %err, "update cycle aborted");
                self.metrics.lock().await.record_failed(err.to_string());
                CycleOutcome::Failed(err)
            }
        }
    }

    async fn update_once(&self) -> Result<TickSummary> {
        let entries = self.feed.fetch().await?;
        debug!(entries = entries.len(), "snapshot received");
        let mut engine = self.engine.lock().await;
        engine.apply_snapshot(&entries)
    }

    /// Log and record current balances and open order totals. Read-only.
    pub async fn report_balances(&self) -> BalanceSnapshot {
        let snapshot = self.balance_snapshot().await;
        info!(
            quote = %snapshot.quote,
            base = %snapshot.base,
            active_bids = snapshot.active_bids,
            active_asks = snapshot.active_asks,
            committed_quote = %snapshot.committed_quote,
            committed_base = %snapshot.committed_base,
            "balance report"
        );
        self.metrics.lock().await.record_balance(snapshot);
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;
    use std::sync::atomic::AtomicUsize;

    use bandbook_adapter::{BookSide, FeedError};
    use rust_decimal::Decimal;
    use tokio::sync::Notify;

    use crate::ledger::Account;
    use crate::placement::FixedSequence;
    use crate::strategy::StrategyParams;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal")
    }

    fn two_sided_book() -> Vec<RawMarketEntry> {
        vec![
            RawMarketEntry::new(1, dec("300"), dec("1")),
            RawMarketEntry::new(2, dec("302"), dec("-1")),
        ]
    }

    fn maker() -> MarketMaker {
        MarketMaker::new(
            StrategyParams {
                order_range: dec("5"),
                allowed_active_orders: 2,
            },
            Account::new(dec("2000"), dec("10")),
            Box::new(FixedSequence::new([dec("0.5")])),
        )
    }

    /// Feed whose fetch parks until the test releases it.
    #[derive(Debug, Default)]
    struct GatedFeed {
        entries: Vec<RawMarketEntry>,
        started: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    impl GatedFeed {
        fn new(entries: Vec<RawMarketEntry>) -> Self {
            Self {
                entries,
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl OrderBookFeed for GatedFeed {
        fn fetch(&self) -> FetchFuture<'_> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.started.notify_one();
                self.release.notified().await;
                Ok(self.entries.clone())
            })
        }
    }

    /// Feed that returns a canned result immediately.
    #[derive(Debug, Default)]
    struct ScriptedFeed {
        fail_with_status: Option<u16>,
        entries: Vec<RawMarketEntry>,
        calls: AtomicUsize,
    }

    impl OrderBookFeed for ScriptedFeed {
        fn fetch(&self) -> FetchFuture<'_> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                match self.fail_with_status {
                    Some(code) => Err(FeedError::Status { code }),
                    None => Ok(self.entries.clone()),
                }
            })
        }
    }

    #[test]
    fn busy_guard_clears_flag_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let guard = BusyGuard::try_claim(&flag);
            assert!(guard.is_some());
            assert!(flag.load(Ordering::SeqCst));
            assert!(BusyGuard::try_claim(&flag).is_none());
        }
        assert!(!flag.load(Ordering::SeqCst));
        assert!(BusyGuard::try_claim(&flag).is_some());
    }

    #[tokio::test]
    async fn overlapping_cycle_is_skipped() {
        let feed = Arc::new(GatedFeed::new(two_sided_book()));
        let scheduler = Scheduler::new(
            feed.clone(),
            maker(),
            Duration::from_secs(5),
            Duration::from_secs(30),
        );

        let first = {
            let scheduler = scheduler.clone();
            tokio::spawn(async move { scheduler.run_update_cycle().await })
        };
        feed.started.notified().await;
        assert!(scheduler.is_busy());

        let second = scheduler.run_update_cycle().await;
        assert!(matches!(second, CycleOutcome::Skipped));
        assert_eq!(feed.calls(), 1);

        feed.release.notify_one();
        let first = first.await.expect("first cycle joins");
        match first {
            CycleOutcome::Completed(summary) => {
                assert_eq!(summary.placed_bids.len(), 2);
                assert_eq!(summary.placed_asks.len(), 2);
            }
            other => panic!("expected completed cycle, got {other:?}"),
        }
        assert!(!scheduler.is_busy());

        // The next tick runs normally once the flag is released.
        feed.release.notify_one();
        let third = scheduler.run_update_cycle().await;
        assert!(matches!(third, CycleOutcome::Completed(_)));
        assert_eq!(feed.calls(), 2);

        let metrics = scheduler.metrics().await;
        assert_eq!(metrics.cycles_started, 2);
        assert_eq!(metrics.cycles_completed, 2);
        assert_eq!(metrics.cycles_skipped, 1);
        assert_eq!(metrics.orders_placed, 4);
    }

    #[tokio::test]
    async fn failed_fetch_releases_flag_and_keeps_state() {
        let feed = Arc::new(ScriptedFeed {
            fail_with_status: Some(503),
            ..ScriptedFeed::default()
        });
        let scheduler = Scheduler::new(
            feed.clone(),
            maker(),
            Duration::from_secs(5),
            Duration::from_secs(30),
        );
        let before = scheduler.balance_snapshot().await;

        for _ in 0..2 {
            let outcome = scheduler.run_update_cycle().await;
            assert!(matches!(
                outcome,
                CycleOutcome::Failed(EngineError::FeedUnavailable(FeedError::Status { code: 503 }))
            ));
            assert!(!scheduler.is_busy());
        }

        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.balance_snapshot().await, before);
        let metrics = scheduler.metrics().await;
        assert_eq!(metrics.cycles_failed, 2);
        assert!(metrics.last_error.is_some());
    }

    #[tokio::test]
    async fn one_sided_snapshot_aborts_cycle() {
        let feed = Arc::new(ScriptedFeed {
            entries: vec![RawMarketEntry::new(1, dec("300"), dec("-1"))],
            ..ScriptedFeed::default()
        });
        let scheduler =
            Scheduler::new(feed, maker(), Duration::from_secs(5), Duration::from_secs(30));

        let outcome = scheduler.run_update_cycle().await;
        assert!(matches!(outcome, CycleOutcome::Failed(EngineError::EmptySide(BookSide::Bid))));
        assert!(!scheduler.is_busy());

        let snapshot = scheduler.balance_snapshot().await;
        assert_eq!(snapshot.active_bids + snapshot.active_asks, 0);
        assert_eq!(snapshot.quote, dec("2000"));
    }

    #[tokio::test]
    async fn balance_report_reflects_open_orders() {
        let feed = Arc::new(ScriptedFeed {
            entries: two_sided_book(),
            ..ScriptedFeed::default()
        });
        let scheduler =
            Scheduler::new(feed, maker(), Duration::from_secs(5), Duration::from_secs(30));

        assert!(matches!(scheduler.run_update_cycle().await, CycleOutcome::Completed(_)));
        let report = scheduler.report_balances().await;

        assert_eq!(report.active_bids, 2);
        assert_eq!(report.active_asks, 2);
        assert_eq!(report.quote + report.committed_quote, dec("2000"));
        assert_eq!(report.base + report.committed_base, dec("10"));
        assert_eq!(scheduler.metrics().await.last_balance, Some(report));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_skips_ticks_while_fetch_hangs() {
        let feed = Arc::new(GatedFeed::new(two_sided_book()));
        let scheduler = Scheduler::new(
            feed.clone(),
            maker(),
            Duration::from_secs(5),
            Duration::from_secs(30),
        );
        let shutdown = CancellationToken::new();

        let runner = {
            let scheduler = scheduler.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move { scheduler.run(shutdown).await })
        };

        // Ticks at 0s (starts the hung fetch), 5s, 10s and 15s.
        tokio::time::sleep(Duration::from_secs(16)).await;

        assert_eq!(feed.calls(), 1);
        assert!(scheduler.is_busy());
        let metrics = scheduler.metrics().await;
        assert_eq!(metrics.cycles_started, 1);
        assert!(metrics.cycles_skipped >= 3);
        assert!(metrics.last_balance.is_some());

        shutdown.cancel();
        runner.await.expect("scheduler stops");

        feed.release.notify_one();
    }
}
