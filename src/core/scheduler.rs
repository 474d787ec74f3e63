use crate::core::refresh::RefreshService;
use crate::domain::model::{LeaderboardKind, LeaderboardSnapshot};
use crate::utils::error::Result;
use crate::utils::validation::parse_daily_time;
use chrono::{DateTime, Days, Local, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// Fires once a day at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    pub fn parse(value: &str) -> Result<Self> {
        Ok(Self::new(parse_daily_time("scheduler.daily_at", value)?))
    }

    pub fn at(&self) -> NaiveTime {
        self.at
    }

    /// First fire time strictly after `now`.
    pub fn next_run_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.at);
        if today > now {
            today
        } else {
            today
                .checked_add_days(Days::new(1))
                .unwrap_or(today)
        }
    }

    pub fn delay_from(&self, now: DateTime<Local>) -> Duration {
        let now = now.naive_local();
        (self.next_run_after(now) - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Logs one line per board and returns (succeeded, failed).
pub fn summarize(results: &[(LeaderboardKind, Result<LeaderboardSnapshot>)]) -> (usize, usize) {
    let mut ok = 0;
    let mut failed = 0;
    for (kind, result) in results {
        match result {
            Ok(snapshot) => {
                ok += 1;
                tracing::info!("✅ {}: {} rows", kind, snapshot.boards.row_count());
            }
            Err(e) => {
                failed += 1;
                tracing::error!("❌ {}: {}", kind, e);
            }
        }
    }
    (ok, failed)
}

/// Process exit code of the first failed board, if any.
pub fn first_failure_code(results: &[(LeaderboardKind, Result<LeaderboardSnapshot>)]) -> Option<i32> {
    results
        .iter()
        .find_map(|(_, result)| result.as_ref().err().map(|e| e.exit_code()))
}

/// Refreshes every board on startup (optionally) and then daily. Failures are
/// logged and left for the next run.
pub async fn run_daily(service: RefreshService, schedule: DailySchedule, run_on_startup: bool) {
    tracing::info!("⏳ Daily scheduler initialized, runs at {} local time", schedule.at());

    if run_on_startup {
        tracing::info!("🔄 Running initial refresh...");
        summarize(&service.refresh_all().await);
    }

    loop {
        let now = Local::now();
        let wait = schedule.delay_from(now);
        tracing::info!(
            "📅 Next refresh at {}",
            schedule.next_run_after(now.naive_local())
        );
        tokio::time::sleep(wait).await;

        tracing::info!("⏰ Starting scheduled refresh");
        let (ok, failed) = summarize(&service.refresh_all().await);
        tracing::info!("Scheduled refresh finished: {} ok, {} failed", ok, failed);
    }
}
