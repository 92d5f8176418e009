//! Alert cues for the terminal UI

use midboss_core::models::AlertConfig;
use midboss_timer::{CueSet, SoundCue, SoundCueError};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Terminal bell. The alert only marks the bell as pending; the draw loop
/// rings it so the BEL byte never lands inside a frame being written.
#[derive(Debug, Default)]
pub struct BellCue {
    pending: AtomicBool,
}

impl BellCue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Writes BEL if an alert arrived since the last call.
    pub fn ring_if_pending<W: Write>(&self, out: &mut W) -> std::io::Result<bool> {
        if !self.pending.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(true)
    }
}

impl SoundCue for BellCue {
    fn play_alert(&self) -> Result<(), SoundCueError> {
        self.pending.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) {
        self.pending.store(false, Ordering::SeqCst);
    }
}

/// Desktop notification shown on a blocking worker thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotificationCue;

impl SoundCue for DesktopNotificationCue {
    fn play_alert(&self) -> Result<(), SoundCueError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SoundCueError::Unavailable(e.to_string()))?;
        runtime.spawn_blocking(|| {
            send_os_notification("⏰ 30 Seconds Left", "Your countdown is almost over!")
        });
        Ok(())
    }
}

pub fn send_os_notification(title: &str, body: &str) {
    if let Err(e) = notify_rust::Notification::new()
        .summary(title)
        .body(body)
        .icon("clock")
        .timeout(notify_rust::Timeout::Milliseconds(5000))
        .show()
    {
        tracing::error!("Failed to send notification: {}", e);
    }
}

pub fn send_urgent_notification(title: &str, body: &str) {
    let mut notification = notify_rust::Notification::new();
    notification
        .summary(title)
        .body(body)
        .icon("alarm-clock")
        .timeout(notify_rust::Timeout::Milliseconds(10000));

    #[cfg(all(unix, not(target_os = "macos")))]
    notification.urgency(notify_rust::Urgency::Critical);

    if let Err(e) = notification.show() {
        tracing::error!("Failed to send urgent notification: {}", e);
    }
}

/// Cue set for the enabled alerts, plus the bell the draw loop has to ring.
pub fn build_alert_cue(alerts: &AlertConfig) -> (Arc<dyn SoundCue>, Option<Arc<BellCue>>) {
    let mut cues = CueSet::new();

    let bell = if alerts.audio_bell {
        let bell = Arc::new(BellCue::new());
        cues.push(bell.clone());
        Some(bell)
    } else {
        None
    };

    if alerts.desktop_notifications {
        cues.push(Arc::new(DesktopNotificationCue));
    }

    (Arc::new(cues), bell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_once_per_alert() {
        let bell = BellCue::new();
        let mut out = Vec::new();

        assert!(!bell.ring_if_pending(&mut out).unwrap());
        assert!(out.is_empty());

        bell.play_alert().unwrap();
        assert!(bell.is_pending());
        assert!(bell.ring_if_pending(&mut out).unwrap());
        assert!(!bell.ring_if_pending(&mut out).unwrap());
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_release_drops_pending_bell() {
        let bell = BellCue::new();
        bell.play_alert().unwrap();
        bell.release();
        assert!(!bell.is_pending());
    }

    #[test]
    fn test_notification_needs_runtime() {
        let result = DesktopNotificationCue.play_alert();
        assert!(matches!(result, Err(SoundCueError::Unavailable(_))));
    }

    #[test]
    fn test_build_alert_cue_respects_config() {
        let (_, bell) = build_alert_cue(&AlertConfig::default());
        assert!(bell.is_some());

        let muted = AlertConfig {
            audio_bell: false,
            desktop_notifications: false,
        };
        let (cue, bell) = build_alert_cue(&muted);
        assert!(bell.is_none());
        assert!(cue.play_alert().is_ok());
    }
}
