//! Relative-time rendering for post timestamps
//!
//! `format_relative_time` is pure; `start_time_refresh` keeps a display
//! target current on a 1 s cadence and hands back the cancellation handle.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::view::{PostView, ViewError, ViewSlot};

/// Cadence of the periodic re-render
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Render an absolute timestamp relative to `now`.
///
/// Thresholds mirror the feed UI: seconds under a minute, minutes under an
/// hour, hours under a day, days under a week, then the calendar date. Unit
/// values are floored and not pluralization-aware ("1 hours ago"). A
/// timestamp in the future clamps to "0 seconds ago".
pub fn format_relative_time(now: DateTime<Utc>, posted_at: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(posted_at);

    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        return format!("{} seconds ago", seconds.max(0));
    }
    if elapsed.num_minutes() < 60 {
        return format!("{} minutes ago", elapsed.num_minutes());
    }
    if elapsed.num_hours() < 24 {
        return format!("{} hours ago", elapsed.num_hours());
    }
    if elapsed.num_days() < 7 {
        return format!("{} days ago", elapsed.num_days());
    }

    // More than a week old: show the date
    posted_at.format("%B %-d, %Y").to_string()
}

/// Write the current relative time into a post's time slot
pub fn render_post_time(
    view: &dyn PostView,
    post_id: i64,
    posted_at: DateTime<Utc>,
) -> Result<(), ViewError> {
    let text = format_relative_time(Utc::now(), posted_at);
    view.set_text(post_id, ViewSlot::PostTime, &text)
}

/// Handle to a running periodic refresh
///
/// The refresh stops on `cancel()` or when the handle is dropped; callers
/// hold it exactly as long as the display target exists.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the periodic refresh
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Render a post's relative time immediately, then keep it fresh every
/// second.
///
/// Fails fast if the display target is missing. The refresh also ends on
/// its own if the target disappears later.
pub fn start_time_refresh(
    view: Arc<dyn PostView>,
    post_id: i64,
    posted_at: DateTime<Utc>,
) -> Result<RefreshHandle, ViewError> {
    render_post_time(view.as_ref(), post_id, posted_at)?;

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
        // the immediate render already happened; skip the interval's
        // instant first tick
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = render_post_time(view.as_ref(), post_id, posted_at) {
                tracing::warn!("Stopping time refresh for post {}: {}", post_id, e);
                break;
            }
        }
    });

    Ok(RefreshHandle { task })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn posted() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 6, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_seconds_under_a_minute() {
        let now = posted() + ChronoDuration::seconds(45);
        assert_eq!(format_relative_time(now, posted()), "45 seconds ago");
    }

    #[test]
    fn test_minute_boundary() {
        let now = posted() + ChronoDuration::seconds(59);
        assert_eq!(format_relative_time(now, posted()), "59 seconds ago");

        let now = posted() + ChronoDuration::seconds(60);
        assert_eq!(format_relative_time(now, posted()), "1 minutes ago");
    }

    #[test]
    fn test_hours_are_floored() {
        // 3670 s is 1 h 1 m 10 s
        let now = posted() + ChronoDuration::seconds(3670);
        assert_eq!(format_relative_time(now, posted()), "1 hours ago");
    }

    #[test]
    fn test_days_are_floored() {
        // 90000 s is a shade over one day
        let now = posted() + ChronoDuration::seconds(90_000);
        assert_eq!(format_relative_time(now, posted()), "1 days ago");
    }

    #[test]
    fn test_just_under_a_week_stays_relative() {
        let now = posted() + ChronoDuration::days(7) - ChronoDuration::seconds(1);
        assert_eq!(format_relative_time(now, posted()), "6 days ago");
    }

    #[test]
    fn test_week_old_falls_back_to_date() {
        let now = posted() + ChronoDuration::days(9);
        assert_eq!(format_relative_time(now, posted()), "January 6, 2024");
    }

    #[test]
    fn test_future_timestamp_clamps_to_zero() {
        let now = posted() - ChronoDuration::seconds(30);
        assert_eq!(format_relative_time(now, posted()), "0 seconds ago");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let now = posted() + ChronoDuration::seconds(3670);
        assert_eq!(
            format_relative_time(now, posted()),
            format_relative_time(now, posted())
        );
    }

    #[tokio::test]
    async fn test_refresh_renders_immediately_and_cancels() {
        let view = Arc::new(MemoryView::new());
        view.register_post(7);

        let handle = start_time_refresh(view.clone(), 7, Utc::now()).unwrap();
        assert_eq!(
            view.text(7, ViewSlot::PostTime).as_deref(),
            Some("0 seconds ago")
        );

        handle.cancel();
        for _ in 0..50 {
            if handle.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_refresh_fails_fast_without_target() {
        let view = Arc::new(MemoryView::new());

        let err = start_time_refresh(view, 9, Utc::now()).unwrap_err();
        assert!(matches!(err, ViewError::MissingTarget { post_id: 9, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_stops_when_target_removed() {
        let view = Arc::new(MemoryView::new());
        view.register_post(3);

        let handle = start_time_refresh(view.clone(), 3, Utc::now()).unwrap();
        view.remove_post(3);

        // paused time auto-advances; the next tick hits the missing target
        for _ in 0..50 {
            if handle.is_finished() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(handle.is_finished());
    }
}
