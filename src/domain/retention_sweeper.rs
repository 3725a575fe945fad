//! Background purge of records past the retention window.
//!
//! The sweeper runs once at startup and then on a fixed interval. Each cycle
//! deletes every record created more than [`RETENTION_MONTHS`] months ago in
//! one atomic store call. A failed cycle is logged and retried on the next
//! tick; the task only exits when its [`SweeperHandle`] is shut down.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Months, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::domain::repositories::RecordStore;
use crate::error::AppError;

/// Age after which records are purged.
pub const RETENTION_MONTHS: u32 = 12;

/// Default period between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(86_400);

/// Returns the creation-time cutoff for a sweep started at `now`.
///
/// Subtracts calendar months, so a sweep on 2025-02-28 removes records
/// created before 2024-02-28. Dates that do not exist in the target month
/// are clamped to its last day.
pub fn retention_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(RETENTION_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Liveness and last-outcome information shared with the health endpoint.
#[derive(Debug, Default)]
pub struct SweeperStatus {
    running: AtomicBool,
    consecutive_failures: AtomicU32,
    last_success: RwLock<Option<DateTime<Utc>>>,
}

impl SweeperStatus {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Acquire)
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success.read().map(|g| *g).unwrap_or(None)
    }

    fn record_success(&self, at: DateTime<Utc>) {
        self.consecutive_failures.store(0, Ordering::Release);
        if let Ok(mut last) = self.last_success.write() {
            *last = Some(at);
        }
    }

    fn record_failure(&self) -> u32 {
        self.consecutive_failures.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// Clears [`SweeperStatus::is_running`] when the loop exits, including by panic.
struct RunningGuard<'a>(&'a SweeperStatus);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.running.store(false, Ordering::Release);
    }
}

/// Periodic retention sweep over a [`RecordStore`].
pub struct RetentionSweeper {
    store: Arc<dyn RecordStore>,
    interval: Duration,
    status: Arc<SweeperStatus>,
}

impl RetentionSweeper {
    pub fn new(store: Arc<dyn RecordStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            status: Arc::new(SweeperStatus::default()),
        }
    }

    /// Shared status, readable while the sweeper runs.
    pub fn status(&self) -> Arc<SweeperStatus> {
        self.status.clone()
    }

    /// Deletes all records created before [`retention_cutoff`]`(now)`.
    ///
    /// # Errors
    ///
    /// Propagates store failures; the periodic loop logs them instead.
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let cutoff = retention_cutoff(now);
        self.store.delete_older_than(cutoff).await
    }

    async fn run_cycle(&self, now: DateTime<Utc>) {
        match self.sweep_once(now).await {
            Ok(deleted) => {
                self.status.record_success(now);
                info!(deleted, cutoff = %retention_cutoff(now), "Retention sweep completed");
            }
            Err(e) => {
                let failures = self.status.record_failure();
                error!(error = %e, failures, "Retention sweep failed, retrying next cycle");
            }
        }
    }

    /// Runs until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// A sweep that has started is always awaited to completion before the
    /// shutdown signal is observed.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.status.running.store(true, Ordering::Release);
        let _running = RunningGuard(self.status.as_ref());
        info!(interval_secs = self.interval.as_secs(), "Retention sweeper started");

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => self.run_cycle(Utc::now()).await,
            }
        }

        info!("Retention sweeper stopped");
    }

    /// Spawns the sweeper on the current runtime.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown, rx) = watch::channel(false);
        let status = self.status();
        let handle = tokio::spawn(self.run(rx));

        SweeperHandle {
            shutdown,
            handle,
            status,
        }
    }
}

/// Owner of a spawned sweeper task.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
    status: Arc<SweeperStatus>,
}

impl SweeperHandle {
    pub fn status(&self) -> Arc<SweeperStatus> {
        self.status.clone()
    }

    /// Signals the task to stop and waits for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            error!(error = %e, "Retention sweeper task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::MockRecordStore;
    use crate::infrastructure::persistence::MemoryRecordStore;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use mockall::Sequence;

    fn record(code: &str, created_at: DateTime<Utc>) -> UrlRecord {
        UrlRecord::new(
            code.to_string(),
            format!("https://example.com/{code}"),
            created_at,
        )
    }

    #[test]
    fn test_cutoff_is_one_calendar_year() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(
            retention_cutoff(now),
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_cutoff_clamps_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 0).unwrap();
        assert_eq!(
            retention_cutoff(now),
            Utc.with_ymd_and_hms(2023, 2, 28, 8, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_sweep_once_passes_cutoff_to_store() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        let mut store = MockRecordStore::new();
        store
            .expect_delete_older_than()
            .withf(move |cutoff| *cutoff == expected)
            .times(1)
            .returning(|_| Ok(7));

        let sweeper = RetentionSweeper::new(Arc::new(store), DEFAULT_SWEEP_INTERVAL);

        assert_eq!(sweeper.sweep_once(now).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_sweep_deletes_only_expired_records() {
        let now = Utc::now();
        let cutoff = retention_cutoff(now);

        let store = Arc::new(MemoryRecordStore::new());
        store.seed(record("old", cutoff - ChronoDuration::days(1)));
        store.seed(record("edge", cutoff));
        store.seed(record("fresh", now - ChronoDuration::days(1)));

        let sweeper = RetentionSweeper::new(store.clone(), DEFAULT_SWEEP_INTERVAL);
        let deleted = sweeper.sweep_once(now).await.unwrap();

        assert_eq!(deleted, 1);
        assert!(store.find("old").await.unwrap().is_none());
        assert!(store.find("edge").await.unwrap().is_some());
        assert!(store.find("fresh").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_cycle_is_retried_next_tick() {
        let mut seq = Sequence::new();
        let mut store = MockRecordStore::new();
        store
            .expect_delete_older_than()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::store_unavailable("connection refused")));
        store
            .expect_delete_older_than()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(2));

        let sweeper = RetentionSweeper::new(Arc::new(store), DEFAULT_SWEEP_INTERVAL);
        let status = sweeper.status();

        sweeper.run_cycle(Utc::now()).await;
        assert_eq!(status.consecutive_failures(), 1);
        assert!(status.last_success().is_none());

        sweeper.run_cycle(Utc::now()).await;
        assert_eq!(status.consecutive_failures(), 0);
        assert!(status.last_success().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_sweeper_runs_and_shuts_down() {
        let store = Arc::new(MemoryRecordStore::new());
        store.seed(record("ancient", Utc::now() - ChronoDuration::days(800)));

        let handle = RetentionSweeper::new(store.clone(), Duration::from_secs(3600)).spawn();
        let status = handle.status();

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(status.is_running());
        assert!(store.find("ancient").await.unwrap().is_none());

        handle.shutdown().await;
        assert!(!status.is_running());
    }

    #[tokio::test]
    async fn test_running_flag_cleared_when_task_panics() {
        let mut store = MockRecordStore::new();
        store
            .expect_delete_older_than()
            .returning(|_| panic!("store backend crashed"));

        let handle = RetentionSweeper::new(Arc::new(store), DEFAULT_SWEEP_INTERVAL).spawn();
        let status = handle.status();

        while !handle.handle.is_finished() {
            tokio::task::yield_now().await;
        }

        assert!(!status.is_running());
        handle.shutdown().await;
    }
}
