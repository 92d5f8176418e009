//! Timer events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event emitted by the countdown controller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerEvent {
    pub event_type: TimerEventType,
    pub timestamp: DateTime<Utc>,
}

/// Types of timer events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEventType {
    /// Preset selected
    Selected { seconds: u64 },
    /// Countdown started or resumed
    Started { remaining_seconds: u64 },
    /// One second counted down
    Tick { remaining_seconds: u64 },
    /// Remaining time reached the alert threshold
    AlertThreshold { remaining_seconds: u64 },
    /// Countdown paused
    Paused { remaining_seconds: u64 },
    /// Countdown stopped and rewound to the selected duration
    Stopped { remaining_seconds: u64 },
    /// Selection cleared
    Reset,
    /// Countdown reached zero
    Completed,
}

impl TimerEvent {
    /// Create a new timer event
    pub fn new(event_type: TimerEventType) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
        }
    }

    pub fn selected(seconds: u64) -> Self {
        Self::new(TimerEventType::Selected { seconds })
    }

    pub fn started(remaining_seconds: u64) -> Self {
        Self::new(TimerEventType::Started { remaining_seconds })
    }

    pub fn tick(remaining_seconds: u64) -> Self {
        Self::new(TimerEventType::Tick { remaining_seconds })
    }

    pub fn alert_threshold(remaining_seconds: u64) -> Self {
        Self::new(TimerEventType::AlertThreshold { remaining_seconds })
    }

    pub fn paused(remaining_seconds: u64) -> Self {
        Self::new(TimerEventType::Paused { remaining_seconds })
    }

    pub fn stopped(remaining_seconds: u64) -> Self {
        Self::new(TimerEventType::Stopped { remaining_seconds })
    }
}

impl TimerEventType {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEventType::Selected { .. } => "selected",
            TimerEventType::Started { .. } => "started",
            TimerEventType::Tick { .. } => "tick",
            TimerEventType::AlertThreshold { .. } => "alert_threshold",
            TimerEventType::Paused { .. } => "paused",
            TimerEventType::Stopped { .. } => "stopped",
            TimerEventType::Reset => "reset",
            TimerEventType::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_event_creation() {
        let event = TimerEvent::started(300);
        match event.event_type {
            TimerEventType::Started { remaining_seconds } => assert_eq!(remaining_seconds, 300),
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let event = TimerEvent::alert_threshold(30);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"]["type"], "alert_threshold");
        assert_eq!(json["event_type"]["remaining_seconds"], 30);
        assert!(json["timestamp"].is_string());

        let json = serde_json::to_value(TimerEvent::new(TimerEventType::Completed)).unwrap();
        assert_eq!(json["event_type"]["type"], "completed");
    }

    #[test]
    fn test_event_names_match_serde_tags() {
        let types = [
            TimerEventType::Selected { seconds: 300 },
            TimerEventType::Tick {
                remaining_seconds: 1,
            },
            TimerEventType::Reset,
        ];
        for event_type in types {
            let json = serde_json::to_value(event_type).unwrap();
            assert_eq!(json["type"], event_type.name());
        }
    }
}
