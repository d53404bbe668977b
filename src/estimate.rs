//! Progress estimation for a running video generation job.
//!
//! Everything here is a pure function of the job's start time and the
//! observation time; nothing is retained between renders.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Assumed total duration of a video generation job, in seconds.
pub const TOTAL_ESTIMATED_SECONDS: i64 = 438;

/// Below this many remaining seconds the countdown gives way to the
/// reassurance message.
pub const REASSURANCE_THRESHOLD_SECONDS: i64 = 2;

/// Shown once the estimate has run out.
pub const REASSURANCE_MESSAGE: &str =
    "It's taking longer than usual, but your video will be completed soon.";

/// The supplied start time cannot be represented as a timestamp.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("start time {0} ms since the Unix epoch is not a valid timestamp")]
pub struct InvalidStartTime(pub i64);

/// Converts a start time in Unix epoch milliseconds into a UTC timestamp.
///
/// Values outside the representable timestamp range are rejected.
pub fn parse_start_time(start_time_millis: i64) -> Result<DateTime<Utc>, InvalidStartTime> {
    DateTime::<Utc>::from_timestamp_millis(start_time_millis)
        .ok_or(InvalidStartTime(start_time_millis))
}

/// Snapshot of the estimated progress at a single observation time.
///
/// Invariants: `progress_percent` is within `0.0..=100.0` and
/// `remaining_seconds` is never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEstimate {
    elapsed_seconds: i64,
    progress_percent: f32,
    remaining_seconds: i64,
}

impl ProgressEstimate {
    /// Computes the estimate for a job started at `start`, observed at `now`.
    pub fn between(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let elapsed_millis = now.signed_duration_since(start).num_milliseconds();
        let elapsed_seconds = elapsed_millis.div_euclid(1000);
        let progress_percent = (elapsed_seconds as f32 / TOTAL_ESTIMATED_SECONDS as f32 * 100.0)
            .clamp(0.0, 100.0);
        let remaining_seconds = (TOTAL_ESTIMATED_SECONDS - elapsed_seconds).max(0);
        Self {
            elapsed_seconds,
            progress_percent,
            remaining_seconds,
        }
    }

    /// Computes the estimate against the current wall clock.
    pub fn since(start: DateTime<Utc>) -> Self {
        Self::between(start, Utc::now())
    }

    /// Whole seconds elapsed since the job started. Negative when the start
    /// time lies in the future.
    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed_seconds
    }

    /// Progress in percent, clamped to `0.0..=100.0`.
    pub fn progress_percent(&self) -> f32 {
        self.progress_percent
    }

    /// Progress as a `0.0..=1.0` fraction, for sizing the bar fill.
    pub fn progress_fraction(&self) -> f32 {
        self.progress_percent / 100.0
    }

    /// Progress rounded to a whole percent, as reported to assistive
    /// technologies.
    pub fn rounded_percent(&self) -> u8 {
        self.progress_percent.round() as u8
    }

    /// Seconds left of the estimate, floored at zero.
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    /// Whether the estimate is used up and the status line should reassure
    /// instead of counting down.
    pub fn is_overdue(&self) -> bool {
        self.remaining_seconds < REASSURANCE_THRESHOLD_SECONDS
    }

    /// The status line shown under the bar.
    pub fn status_message(&self) -> String {
        if self.is_overdue() {
            REASSURANCE_MESSAGE.to_string()
        } else {
            countdown_message(self.remaining_seconds)
        }
    }
}

/// Formats the remaining-time countdown, with "second" singular only for
/// exactly one second.
fn countdown_message(remaining_seconds: i64) -> String {
    format!(
        "Estimated time remaining: {} second{}",
        remaining_seconds,
        if remaining_seconds == 1 { "" } else { "s" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn observed_after(seconds: i64) -> ProgressEstimate {
        ProgressEstimate::between(start(), start() + chrono::Duration::seconds(seconds))
    }

    #[test]
    fn fresh_job_reports_zero_progress() {
        let estimate = observed_after(0);
        assert_eq!(estimate.elapsed_seconds(), 0);
        assert_eq!(estimate.progress_percent(), 0.0);
        assert_eq!(estimate.remaining_seconds(), TOTAL_ESTIMATED_SECONDS);
        assert_eq!(
            estimate.status_message(),
            "Estimated time remaining: 438 seconds"
        );
    }

    #[test]
    fn halfway_job_reports_fifty_percent() {
        let estimate = observed_after(219);
        assert_eq!(estimate.progress_percent(), 50.0);
        assert_eq!(estimate.rounded_percent(), 50);
        assert_eq!(estimate.remaining_seconds(), 219);
        assert_eq!(
            estimate.status_message(),
            "Estimated time remaining: 219 seconds"
        );
    }

    #[test]
    fn one_second_left_switches_to_reassurance() {
        let estimate = observed_after(437);
        assert_eq!(estimate.remaining_seconds(), 1);
        assert!(estimate.is_overdue());
        assert_eq!(estimate.status_message(), REASSURANCE_MESSAGE);
    }

    #[test]
    fn two_seconds_left_still_counts_down() {
        let estimate = observed_after(436);
        assert_eq!(estimate.remaining_seconds(), 2);
        assert!(!estimate.is_overdue());
        assert_eq!(
            estimate.status_message(),
            "Estimated time remaining: 2 seconds"
        );
    }

    #[test]
    fn overrun_job_saturates() {
        let estimate = observed_after(600);
        assert_eq!(estimate.progress_percent(), 100.0);
        assert_eq!(estimate.rounded_percent(), 100);
        assert_eq!(estimate.remaining_seconds(), 0);
        assert_eq!(estimate.status_message(), REASSURANCE_MESSAGE);
    }

    #[test]
    fn future_start_clamps_progress_to_zero() {
        let estimate = observed_after(-5);
        assert_eq!(estimate.elapsed_seconds(), -5);
        assert_eq!(estimate.progress_percent(), 0.0);
        assert!(estimate.remaining_seconds() >= TOTAL_ESTIMATED_SECONDS);
    }

    #[test]
    fn elapsed_seconds_floor_sub_second_remainders() {
        let now = DateTime::from_timestamp_millis(start().timestamp_millis() + 1_999).unwrap();
        let estimate = ProgressEstimate::between(start(), now);
        assert_eq!(estimate.elapsed_seconds(), 1);
        assert_eq!(estimate.remaining_seconds(), TOTAL_ESTIMATED_SECONDS - 1);
    }

    #[test]
    fn progress_is_monotonic_as_time_advances() {
        let mut last_percent = -1.0f32;
        let mut last_remaining = i64::MAX;
        for seconds in 0..500 {
            let estimate = observed_after(seconds);
            assert!(estimate.progress_percent() >= last_percent);
            assert!(estimate.remaining_seconds() <= last_remaining);
            assert!((0.0..=100.0).contains(&estimate.progress_percent()));
            assert!(estimate.remaining_seconds() >= 0);
            last_percent = estimate.progress_percent();
            last_remaining = estimate.remaining_seconds();
        }
    }

    #[test]
    fn countdown_message_pluralizes() {
        assert_eq!(countdown_message(1), "Estimated time remaining: 1 second");
        assert_eq!(countdown_message(0), "Estimated time remaining: 0 seconds");
        assert_eq!(countdown_message(2), "Estimated time remaining: 2 seconds");
    }

    #[test]
    fn parse_start_time_accepts_epoch_millis() {
        let start_time = parse_start_time(1_700_000_000_000).unwrap();
        assert_eq!(start_time.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn parse_start_time_rejects_out_of_range_values() {
        assert_eq!(
            parse_start_time(i64::MAX),
            Err(InvalidStartTime(i64::MAX))
        );
    }
}
