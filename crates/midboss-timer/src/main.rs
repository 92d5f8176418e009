//! MidBoss headless runner
//!
//! Runs a single countdown without a UI and logs every timer event.

use anyhow::{bail, Result};
use clap::Parser;
use midboss_core::models::{format_mm_ss, Preset};
use midboss_timer::{TimerController, TimerEventType};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "midboss-run")]
#[command(about = "MidBoss timer - run one countdown without a UI", long_about = None)]
struct Args {
    /// Preset in minutes (5, 6 or 7)
    #[arg(short, long, default_value_t = 5)]
    preset: u64,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn preset(&self) -> Result<Preset> {
        match Preset::from_minutes(self.preset) {
            Some(preset) => Ok(preset),
            None => bail!("No {} minute preset, choose 5, 6 or 7", self.preset),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("midboss_timer={}", args.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let preset = args.preset()?;
    tracing::info!("MidBoss runner starting a {} countdown", preset.label());

    let controller = TimerController::silent();
    let mut events = controller.subscribe();

    controller.select_timer(preset.seconds());
    controller.start_timer();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => match event.event_type {
                    TimerEventType::Tick { remaining_seconds } => {
                        tracing::info!("{}", format_mm_ss(remaining_seconds));
                    }
                    TimerEventType::AlertThreshold { remaining_seconds } => {
                        tracing::warn!("Only {} seconds left!", remaining_seconds);
                    }
                    TimerEventType::Completed => {
                        tracing::info!("Time's up!");
                        break;
                    }
                    other => tracing::debug!("Timer event: {}", other.name()),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} timer events", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(
                    "Interrupted with {} remaining",
                    format_mm_ss(controller.remaining_seconds())
                );
                break;
            }
        }
    }

    controller.shutdown();
    Ok(())
}
