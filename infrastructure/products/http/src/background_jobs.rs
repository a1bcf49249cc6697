use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use product_errors::ProductError;
use product_query_handlers::ListProductsQueryHandler;
use tracing::{error, info};

/// Daily wall-clock hour in a fixed time zone.
#[derive(Debug, Clone, Copy)]
pub struct RefreshSchedule {
    hour: u32,
    timezone: Tz,
}

impl RefreshSchedule {
    pub fn new(hour: u32, timezone: Tz) -> Self { Self { hour, timezone } }

    pub fn hour(&self) -> u32 { self.hour }

    pub fn timezone(&self) -> Tz { self.timezone }

    /// First occurrence of the refresh hour strictly after `now`. A local
    /// hour skipped by a DST jump moves to the next day.
    pub fn next_run_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.with_timezone(&self.timezone).date_naive();

        today
            .iter_days()
            .take(3)
            .filter_map(|day| day.and_hms_opt(self.hour, 0, 0))
            .filter_map(|local| {
                self.timezone.from_local_datetime(&local).earliest()
            })
            .map(|at| at.with_timezone(&Utc))
            .find(|at| *at > now)
            .unwrap_or_else(|| now + Duration::days(1))
    }
}

/// Flushes and rebuilds the product cache once a day.
#[derive(Clone)]
pub struct CacheRefreshJob {
    listing: ListProductsQueryHandler,
    schedule: RefreshSchedule,
}

impl CacheRefreshJob {
    pub fn new(
        listing: ListProductsQueryHandler, schedule: RefreshSchedule,
    ) -> Self {
        Self { listing, schedule }
    }

    pub fn schedule(&self) -> RefreshSchedule { self.schedule }

    /// Spawns the refresh loop on the current runtime.
    pub fn start(self) {
        tokio::spawn(async move {
            info!(
                hour = self.schedule.hour,
                timezone = %self.schedule.timezone,
                "Starting daily product cache refresh job"
            );

            loop {
                let now = Utc::now();
                let next = self.schedule.next_run_after(now);
                let wait = (next - now).to_std().unwrap_or_default();
                info!(next_run = %next, "Next product cache refresh scheduled");

                tokio::time::sleep(wait).await;

                if let Err(e) = self.trigger().await {
                    error!("Failed to refresh product cache: {}", e);
                }
            }
        });
    }

    /// Manually trigger a refresh. Returns the number of products cached.
    pub async fn trigger(&self) -> Result<usize, ProductError> {
        self.listing.refresh().await
    }
}
