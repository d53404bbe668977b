//! Estimated-progress component for a pending video generation job.
//!
//! ## Usage
//!
//! Render while a submitted job is pending. The component carries no state of
//! its own; the frame loop re-invokes it and the estimate tracks wall-clock
//! time on its own.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use tessera_ui::{
    Color, ComputedData, Constraint, DimensionValue, Dp, Modifier, Px, PxPosition,
    accesskit::Role, tessera,
};
use tessera_ui_basic_components::{
    alignment::CrossAxisAlignment,
    column::ColumnArgsBuilder,
    column_ui,
    modifier::ModifierExt as _,
    shape_def::Shape,
    spacer::spacer,
    surface::{SurfaceArgsBuilder, SurfaceStyle, surface},
    text::{TextArgsBuilder, text},
};
use tracing::error;

use crate::estimate::{ProgressEstimate, parse_start_time};

/// Heading shown above the bar.
const HEADING: &str = "Your video is being generated...";

/// Accessible name of the bar, read by assistive technologies.
const BAR_ACCESSIBILITY_LABEL: &str = "Video processing progress";

/// Arguments for the `progress_estimator` component.
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned")]
pub struct ProgressEstimatorArgs {
    /// When the tracked job began, in Unix epoch milliseconds.
    pub start_time_millis: i64,

    /// Width of the bar.
    #[builder(default = "Dp(240.0)")]
    pub bar_width: Dp,

    /// Height of the bar.
    #[builder(default = "Dp(10.0)")]
    pub bar_height: Dp,

    /// Color of the elapsed portion of the bar.
    #[builder(default = "Color::new(0.145, 0.388, 0.922, 1.0)")]
    pub fill_color: Color,

    /// Color of the inactive track behind the fill.
    #[builder(default = "Color::new(0.898, 0.906, 0.922, 1.0)")]
    pub track_color: Color,

    /// Color of the heading and the status line.
    #[builder(default = "Color::BLACK")]
    pub text_color: Color,
}

/// Builds args for a job started at the given instant, with default styling.
impl From<DateTime<Utc>> for ProgressEstimatorArgs {
    fn from(start_time: DateTime<Utc>) -> Self {
        ProgressEstimatorArgsBuilder::default()
            .start_time_millis(start_time.timestamp_millis())
            .build()
            .expect("builder construction failed")
    }
}

/// # progress_estimator
///
/// Renders an estimated progress view for a long-running video generation
/// job: a heading, a bar sized by elapsed wall-clock time against the fixed
/// 438-second estimate, and a remaining-time status line.
///
/// The bar exposes itself to assistive technologies as a progress indicator
/// with its rounded percentage in the 0 to 100 range.
///
/// An out-of-range `start_time_millis` never panics the host: the component
/// logs one diagnostic and renders nothing.
///
/// ## Parameters
///
/// - `args` — configures the start time and styling; see
///   [`ProgressEstimatorArgs`].
///
/// ## Examples
///
/// ```
/// use tessera_video_progress::progress_estimator::{
///     ProgressEstimatorArgsBuilder, progress_estimator,
/// };
///
/// progress_estimator(
///     ProgressEstimatorArgsBuilder::default()
///         .start_time_millis(chrono::Utc::now().timestamp_millis())
///         .build()
///         .unwrap(),
/// );
/// ```
#[tessera]
pub fn progress_estimator(args: impl Into<ProgressEstimatorArgs>) {
    let args: ProgressEstimatorArgs = args.into();

    let start_time = match parse_start_time(args.start_time_millis) {
        Ok(start_time) => start_time,
        Err(err) => {
            error!("progress_estimator: {err}, rendering nothing");
            return;
        }
    };
    let estimate = ProgressEstimate::since(start_time);

    let heading_color = args.text_color;
    let status_color = args.text_color;
    let status = estimate.status_message();
    let bar_width = args.bar_width;
    let bar_height = args.bar_height;
    let fill_color = args.fill_color;
    let track_color = args.track_color;

    column_ui!(
        ColumnArgsBuilder::default()
            .cross_axis_alignment(CrossAxisAlignment::Start)
            .build()
            .expect("builder construction failed"),
        move || {
            text(
                TextArgsBuilder::default()
                    .text(HEADING.to_string())
                    .size(Dp(18.0))
                    .color(heading_color)
                    .build()
                    .expect("builder construction failed"),
            )
        },
        || spacer(Modifier::new().height(Dp(16.0))),
        move || estimated_progress_bar(estimate, bar_width, bar_height, fill_color, track_color),
        || spacer(Modifier::new().height(Dp(8.0))),
        move || {
            text(
                TextArgsBuilder::default()
                    .text(status)
                    .size(Dp(16.0))
                    .color(status_color)
                    .build()
                    .expect("builder construction failed"),
            )
        },
    );
}

/// The bar itself: a full-width track with the elapsed fill placed on top.
#[tessera]
fn estimated_progress_bar(
    estimate: ProgressEstimate,
    width: Dp,
    height: Dp,
    fill_color: Color,
    track_color: Color,
) {
    let shape = Shape::RoundedRectangle {
        corner_radius: height.0 as f32 / 2.0,
        g2_k_value: 3.0,
    };

    // Child 0: the inactive track, drawn first. Both children fill whatever
    // fixed bounds the measure below hands them.
    surface(
        SurfaceArgsBuilder::default()
            .style(SurfaceStyle::Filled { color: track_color })
            .shape(shape)
            .width(DimensionValue::FILLED)
            .height(DimensionValue::FILLED)
            .build()
            .expect("builder construction failed"),
        || {},
    );

    // Child 1: the elapsed fill.
    surface(
        SurfaceArgsBuilder::default()
            .style(SurfaceStyle::Filled { color: fill_color })
            .shape(shape)
            .width(DimensionValue::FILLED)
            .height(DimensionValue::FILLED)
            .build()
            .expect("builder construction failed"),
        || {},
    );

    let rounded_percent = estimate.rounded_percent();
    input_handler(Box::new(move |input| {
        input
            .accessibility()
            .role(Role::ProgressIndicator)
            .label(BAR_ACCESSIBILITY_LABEL)
            .numeric_value(f64::from(rounded_percent))
            .numeric_range(0.0, 100.0)
            .commit();
    }));

    let fraction = estimate.progress_fraction();
    measure(Box::new(move |input| {
        let self_width = width.to_px();
        let self_height = height.to_px();

        let track_id = input.children_ids[0];
        let fill_id = input.children_ids[1];

        let track_constraint = Constraint::new(
            DimensionValue::Fixed(self_width),
            DimensionValue::Fixed(self_height),
        );
        input.measure_child(track_id, &track_constraint)?;
        input.place_child(track_id, PxPosition::new(Px(0), Px(0)));

        let fill_width = Px((self_width.to_f32() * fraction) as i32);
        let fill_constraint = Constraint::new(
            DimensionValue::Fixed(fill_width),
            DimensionValue::Fixed(self_height),
        );
        input.measure_child(fill_id, &fill_constraint)?;
        input.place_child(fill_id, PxPosition::new(Px(0), Px(0)));

        Ok(ComputedData {
            width: self_width,
            height: self_height,
        })
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_a_start_time() {
        assert!(ProgressEstimatorArgsBuilder::default().build().is_err());
    }

    #[test]
    fn builder_defaults_match_the_page_palette() {
        let args = ProgressEstimatorArgsBuilder::default()
            .start_time_millis(0)
            .build()
            .unwrap();
        assert_eq!(args.bar_width, Dp(240.0));
        assert_eq!(args.bar_height, Dp(10.0));
        assert_eq!(args.track_color, Color::new(0.898, 0.906, 0.922, 1.0));
        assert_eq!(args.fill_color, Color::new(0.145, 0.388, 0.922, 1.0));
    }

    #[test]
    fn args_from_datetime_carry_epoch_millis() {
        let start_time = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let args = ProgressEstimatorArgs::from(start_time);
        assert_eq!(args.start_time_millis, 1_700_000_000_000);
    }
}
