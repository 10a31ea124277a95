//! Background jobs spawned by the server binary.

use chrono::NaiveTime;
use services::session::close_stale_sessions;
use std::time::Duration;
use tokio::task::JoinHandle;
use util::{config, state::AppState, time::parse_wall_time};

const RETRY_AFTER: Duration = Duration::from_secs(60 * 60);

/// How long to wait until the display-zone clock next reads `at`.
pub fn until_next_close(state: &AppState, at: NaiveTime) -> Option<Duration> {
    let now = state.clock().now();
    let next = state.display().next_occurrence(&now, at)?;
    (next - now).to_std().ok()
}

/// Closes every open session once a day at `AUTO_CLOSE_TIME`.
///
/// Returns `None` when the configured time cannot be parsed; the server
/// keeps running without the job.
pub fn spawn_auto_close(state: AppState) -> Option<JoinHandle<()>> {
    let raw = config::auto_close_time();
    let at = match parse_wall_time(&raw) {
        Ok(at) => at,
        Err(e) => {
            tracing::error!(value = %raw, error = %e, "Invalid AUTO_CLOSE_TIME, auto-close disabled");
            return None;
        }
    };

    tracing::info!(at = %at, zone = state.display().name(), "Scheduled daily session auto-close");

    Some(tokio::spawn(async move {
        loop {
            let Some(wait) = until_next_close(&state, at) else {
                tracing::warn!(at = %at, "No upcoming auto-close instant, retrying later");
                tokio::time::sleep(RETRY_AFTER).await;
                continue;
            };
            tokio::time::sleep(wait).await;

            if let Err(e) = close_stale_sessions(&state).await {
                tracing::error!(error = %e, "Auto-close of stale sessions failed");
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use db::test_utils::setup_test_db;
    use std::sync::Arc;
    use util::time::{DisplayZone, FixedClock, Normalizer};

    #[tokio::test]
    async fn waits_until_local_close_time() {
        // 04:00Z is 09:30 in Asia/Kolkata; 23:59 local is 18:29Z.
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 9, 24, 4, 0, 0).unwrap());
        let state = AppState::new(
            setup_test_db().await,
            Arc::new(clock.clone()),
            Normalizer::default(),
            DisplayZone::parse("Asia/Kolkata").unwrap(),
        );
        let at = parse_wall_time("23:59").unwrap();

        assert_eq!(
            until_next_close(&state, at),
            Some(Duration::from_secs((14 * 60 + 29) * 60))
        );

        // Exactly at the close time the next run is a day later.
        clock.set(Utc.with_ymd_and_hms(2025, 9, 24, 18, 29, 0).unwrap());
        assert_eq!(until_next_close(&state, at), Some(Duration::from_secs(24 * 60 * 60)));
    }
}
