//! Countdown snapshot and display helpers

use serde::{Deserialize, Serialize};

/// Remaining seconds at which the alert cue fires.
pub const ALERT_THRESHOLD_SECONDS: u64 = 30;

/// Point-in-time view of the countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub selected_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Selected,
    Running,
    Paused,
}

impl TimerSnapshot {
    pub fn phase(&self) -> TimerPhase {
        if self.selected_seconds == 0 {
            TimerPhase::Idle
        } else if self.running {
            TimerPhase::Running
        } else if self.remaining_seconds > 0 && self.remaining_seconds < self.selected_seconds {
            TimerPhase::Paused
        } else {
            TimerPhase::Selected
        }
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }

    /// Fraction of the selected duration already counted down.
    pub fn progress(&self) -> f64 {
        if self.selected_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.selected_seconds.saturating_sub(self.remaining_seconds);
        (elapsed as f64 / self.selected_seconds as f64).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.selected_seconds > 0 && self.remaining_seconds == 0 && !self.running
    }
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "Idle",
            TimerPhase::Selected => "Ready",
            TimerPhase::Running => "Running",
            TimerPhase::Paused => "Paused",
        }
    }
}

pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(selected: u64, remaining: u64, running: bool) -> TimerSnapshot {
        TimerSnapshot {
            selected_seconds: selected,
            remaining_seconds: remaining,
            running,
        }
    }

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(30), "00:30");
        assert_eq!(format_mm_ss(300), "05:00");
        assert_eq!(format_mm_ss(419), "06:59");
        assert_eq!(format_mm_ss(6000), "100:00");
    }

    #[test]
    fn test_phase_derivation() {
        assert_eq!(TimerSnapshot::default().phase(), TimerPhase::Idle);
        assert_eq!(snapshot(300, 300, false).phase(), TimerPhase::Selected);
        assert_eq!(snapshot(300, 299, true).phase(), TimerPhase::Running);
        assert_eq!(snapshot(300, 150, false).phase(), TimerPhase::Paused);
        assert_eq!(snapshot(300, 0, false).phase(), TimerPhase::Selected);
    }

    #[test]
    fn test_progress() {
        assert_eq!(TimerSnapshot::default().progress(), 0.0);
        assert_eq!(snapshot(300, 300, false).progress(), 0.0);
        assert_eq!(snapshot(300, 150, true).progress(), 0.5);
        assert_eq!(snapshot(300, 0, false).progress(), 1.0);
    }

    #[test]
    fn test_is_finished() {
        assert!(snapshot(360, 0, false).is_finished());
        assert!(!snapshot(360, 1, false).is_finished());
        assert!(!TimerSnapshot::default().is_finished());
    }

    #[test]
    fn test_snapshot_serialization() {
        let json = serde_json::to_value(snapshot(420, 30, true)).unwrap();
        assert_eq!(json["selected_seconds"], 420);
        assert_eq!(json["remaining_seconds"], 30);
        assert_eq!(json["running"], true);
    }
}
