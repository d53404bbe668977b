//! Shows the estimated-progress component tracking a job "started" at app
//! launch. Let it run past 437 seconds to see the reassurance message.

use chrono::Utc;
use tessera_ui::{Color, DimensionValue, Dp, Renderer, tessera};
use tessera_ui_basic_components::surface::{SurfaceArgsBuilder, SurfaceStyle, surface};
use tessera_video_progress::{ProgressEstimatorArgsBuilder, progress_estimator};

#[tessera]
fn app(start_time_millis: i64) {
    surface(
        SurfaceArgsBuilder::default()
            .style(SurfaceStyle::Filled {
                color: Color::WHITE,
            })
            .width(DimensionValue::FILLED)
            .height(DimensionValue::FILLED)
            .padding(Dp(24.0))
            .build()
            .unwrap(),
        move || {
            progress_estimator(
                ProgressEstimatorArgsBuilder::default()
                    .start_time_millis(start_time_millis)
                    .build()
                    .unwrap(),
            )
        },
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = flexi_logger::Logger::try_with_env()?
        .write_mode(flexi_logger::WriteMode::Async)
        .start()?;

    let start_time_millis = Utc::now().timestamp_millis();

    Renderer::run(
        move || app(start_time_millis),
        |app| {
            tessera_ui_basic_components::pipelines::register_pipelines(app);
        },
    )?;

    Ok(())
}
