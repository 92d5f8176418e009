pub mod config;
pub mod preset;
pub mod timer;

pub use config::{AlertConfig, Config, LoggingConfig};
pub use preset::Preset;
pub use timer::{format_mm_ss, TimerPhase, TimerSnapshot, ALERT_THRESHOLD_SECONDS};
