//! Estimated-progress indicator for long-running video generation jobs.
//!
//! A video generation backend only reports when a job started; completion
//! arrives out of band. In the meantime clients show an optimistic progress
//! bar driven purely by elapsed wall-clock time, measured against a fixed
//! 438-second estimate. This crate provides that bar as a
//! [tessera-ui](https://tessera-ui.github.io) component.
//!
//! # Example
//!
//! ```
//! use tessera_video_progress::{ProgressEstimatorArgsBuilder, progress_estimator};
//!
//! progress_estimator(
//!     ProgressEstimatorArgsBuilder::default()
//!         .start_time_millis(chrono::Utc::now().timestamp_millis())
//!         .build()
//!         .unwrap(),
//! );
//! ```
//!
//! The component is a pure function of the start time and the current frame's
//! wall clock. It never polls or self-updates; the host's frame loop
//! re-invokes it, which keeps the estimate current.

pub mod estimate;
pub mod progress_estimator;

pub use estimate::{
    InvalidStartTime, ProgressEstimate, REASSURANCE_MESSAGE, REASSURANCE_THRESHOLD_SECONDS,
    TOTAL_ESTIMATED_SECONDS,
};
pub use progress_estimator::{
    ProgressEstimatorArgs, ProgressEstimatorArgsBuilder, progress_estimator,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassurance_threshold_sits_inside_the_estimate_window() {
        assert!(REASSURANCE_THRESHOLD_SECONDS > 0);
        assert!(REASSURANCE_THRESHOLD_SECONDS < TOTAL_ESTIMATED_SECONDS);
    }
}
