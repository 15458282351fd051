//! Headless battle host binary.
//!
//! ```bash
//! BATTLE_DATA_DIR=crates/client/headless/data cargo run -p battle-client
//! ```

use std::time::Duration;

use anyhow::Result;
use battle_client::{ClientConfig, Driver, StopReason, load_machine, logging};
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_file.as_deref())?;

    tracing::info!("Loading battle from {}", config.data_dir.display());
    let (machine, max_ticks, report) = load_machine(&config)?;
    tracing::info!(
        player_units = report.player_units,
        ai_units = report.ai_units,
        max_ticks,
        "Battle ready"
    );

    let mut driver = Driver::new(machine, max_ticks);
    let summary = if config.frame_ms == 0 {
        driver.run()
    } else {
        let mut frames = time::interval(Duration::from_millis(config.frame_ms));
        frames.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = frames.tick() => {
                    if let Some(reason) = driver.frame() {
                        break driver.summary(reason);
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    break driver.summary(StopReason::Interrupted);
                }
            }
        }
    };

    match summary.reason {
        StopReason::Finished(outcome) => {
            tracing::info!(?outcome, frames = summary.frames, "Battle finished")
        }
        StopReason::TickLimit => {
            tracing::warn!(frames = summary.frames, "Battle stopped before a result")
        }
        StopReason::NoBattle => tracing::warn!("No battle was running"),
        StopReason::Interrupted => tracing::info!(frames = summary.frames, "Battle interrupted"),
    }

    Ok(())
}
