//! Application state management

use crossterm::event::KeyCode;
use midboss_core::models::{format_mm_ss, AlertConfig, Preset, TimerSnapshot};
use midboss_timer::{TimerController, TimerEvent, TimerEventType};
use tokio::sync::watch;

/// Every clickable button on the screen, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Preset(Preset),
    Start,
    Pause,
    Stop,
    Reset,
}

impl Control {
    pub const ALL: [Self; 7] = [
        Self::Preset(Preset::SevenMinutes),
        Self::Preset(Preset::SixMinutes),
        Self::Preset(Preset::FiveMinutes),
        Self::Start,
        Self::Pause,
        Self::Stop,
        Self::Reset,
    ];

    pub const ACTIONS: [Self; 3] = [Self::Start, Self::Pause, Self::Stop];

    pub fn label(&self) -> &'static str {
        match self {
            Control::Preset(preset) => preset.label(),
            Control::Start => "Start",
            Control::Pause => "Pause",
            Control::Stop => "Stop",
            Control::Reset => "Reset",
        }
    }

    pub fn shortcut(&self) -> String {
        match self {
            Control::Preset(preset) => preset.shortcut().to_string(),
            Control::Start => "s".to_string(),
            Control::Pause => "p".to_string(),
            Control::Stop => "x".to_string(),
            Control::Reset => "r".to_string(),
        }
    }

    pub fn is_enabled(&self, snapshot: &TimerSnapshot) -> bool {
        match self {
            Control::Preset(_) => !snapshot.running,
            Control::Start => {
                !snapshot.running && snapshot.selected_seconds > 0 && snapshot.remaining_seconds > 0
            }
            Control::Pause => snapshot.running,
            Control::Stop | Control::Reset => true,
        }
    }
}

pub struct App {
    pub controller: TimerController,
    timer_rx: watch::Receiver<TimerSnapshot>,
    pub alerts: AlertConfig,
    pub focused_index: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(controller: TimerController, alerts: AlertConfig) -> Self {
        let timer_rx = controller.watch();
        Self {
            controller,
            timer_rx,
            alerts,
            focused_index: 0,
            show_help: false,
            should_quit: false,
            status_message: String::new(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        *self.timer_rx.borrow()
    }

    pub fn focused_control(&self) -> Control {
        Control::ALL[self.focused_index % Control::ALL.len()]
    }

    pub fn selected_preset(&self) -> Option<Preset> {
        Preset::from_seconds(self.snapshot().selected_seconds)
    }

    pub fn focus_next(&mut self) {
        self.focused_index = (self.focused_index + 1) % Control::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focused_index = self
            .focused_index
            .checked_sub(1)
            .unwrap_or(Control::ALL.len() - 1);
    }

    /// Press a button. Disabled buttons only leave a status message.
    pub fn activate(&mut self, control: Control) {
        if !control.is_enabled(&self.snapshot()) {
            self.status_message = format!("{} is not available right now", control.label());
            return;
        }

        match control {
            Control::Preset(preset) => self.controller.select_timer(preset.seconds()),
            Control::Start => self.controller.start_timer(),
            Control::Pause => self.controller.pause_timer(),
            Control::Stop => self.controller.stop_timer(),
            Control::Reset => self.controller.reset_timers(),
        }
    }

    pub fn toggle_running(&mut self) {
        if self.snapshot().running {
            self.activate(Control::Pause);
        } else {
            self.activate(Control::Start);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('s') => self.activate(Control::Start),
            KeyCode::Char('p') => self.activate(Control::Pause),
            KeyCode::Char(' ') => self.toggle_running(),
            KeyCode::Char('x') => self.activate(Control::Stop),
            KeyCode::Char('r') => self.activate(Control::Reset),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.focus_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.focus_previous(),
            KeyCode::Enter => self.activate(self.focused_control()),
            KeyCode::Char(c) => {
                if let Some(preset) = Preset::from_shortcut(c) {
                    self.activate(Control::Preset(preset));
                }
            }
            _ => {}
        }
    }

    /// Update the status line for a timer event. Returns true when the
    /// countdown just finished.
    pub fn handle_timer_event(&mut self, event: &TimerEvent) -> bool {
        match event.event_type {
            TimerEventType::Selected { seconds } => {
                self.status_message = format!("Selected {}", format_mm_ss(seconds));
            }
            TimerEventType::Started { remaining_seconds } => {
                self.status_message =
                    format!("Counting down from {}", format_mm_ss(remaining_seconds));
            }
            TimerEventType::Tick { .. } => {}
            TimerEventType::AlertThreshold { remaining_seconds } => {
                self.status_message = format!("⚠️  {} seconds left!", remaining_seconds);
            }
            TimerEventType::Paused { remaining_seconds } => {
                self.status_message = format!("Paused at {}", format_mm_ss(remaining_seconds));
            }
            TimerEventType::Stopped { remaining_seconds } => {
                self.status_message =
                    format!("Stopped, back to {}", format_mm_ss(remaining_seconds));
            }
            TimerEventType::Reset => {
                self.status_message = "Timer reset".to_string();
            }
            TimerEventType::Completed => {
                self.status_message = "🔔 TIME'S UP! 🔔".to_string();
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Duration};

    fn app() -> App {
        App::new(TimerController::silent(), AlertConfig::default())
    }

    #[test]
    fn test_control_gating() {
        let idle = TimerSnapshot::default();
        assert!(Control::Preset(Preset::FiveMinutes).is_enabled(&idle));
        assert!(!Control::Start.is_enabled(&idle));
        assert!(!Control::Pause.is_enabled(&idle));
        assert!(Control::Stop.is_enabled(&idle));

        let running = TimerSnapshot {
            selected_seconds: 300,
            remaining_seconds: 200,
            running: true,
        };
        assert!(!Control::Preset(Preset::FiveMinutes).is_enabled(&running));
        assert!(!Control::Start.is_enabled(&running));
        assert!(Control::Pause.is_enabled(&running));
        assert!(Control::Reset.is_enabled(&running));
    }

    #[test]
    fn test_preset_keys_select() {
        let mut app = app();
        app.handle_key(KeyCode::Char('6'));
        assert_eq!(app.snapshot().remaining_seconds, 360);
        assert_eq!(app.selected_preset(), Some(Preset::SixMinutes));

        app.handle_key(KeyCode::Char('7'));
        assert_eq!(app.snapshot().selected_seconds, 420);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut app = app();
        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('9'));
        app.handle_key(KeyCode::Char('z'));
        assert_eq!(app.selected_preset(), Some(Preset::FiveMinutes));
        assert!(app.status_message.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app();
        assert_eq!(app.focused_control(), Control::Preset(Preset::SevenMinutes));

        app.handle_key(KeyCode::Left);
        assert_eq!(app.focused_control(), Control::Reset);

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.focused_control(), Control::Preset(Preset::SevenMinutes));
    }

    #[test]
    fn test_disabled_button_sets_status() {
        let mut app = app();
        app.handle_key(KeyCode::Char('s'));
        assert!(!app.snapshot().running);
        assert_eq!(app.status_message, "Start is not available right now");
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        app.handle_key(KeyCode::Char('?'));
        assert!(app.show_help);

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_drives_countdown() {
        let mut app = app();
        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('s'));
        assert!(app.snapshot().running);

        app.handle_key(KeyCode::Char('7'));
        assert_eq!(app.snapshot().selected_seconds, 300);

        sleep(Duration::from_millis(3_500)).await;
        app.handle_key(KeyCode::Char(' '));
        let paused = app.snapshot();
        assert!(!paused.running);
        assert_eq!(paused.remaining_seconds, 297);
        assert_eq!(paused.display(), "04:57");

        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.snapshot().remaining_seconds, 300);

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.snapshot(), TimerSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_activates_focused_button() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.snapshot().selected_seconds, 360);

        for _ in 0..2 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.focused_control(), Control::Start);
        app.handle_key(KeyCode::Enter);
        assert!(app.snapshot().running);

        app.handle_key(KeyCode::Char('p'));
        assert!(!app.snapshot().running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_events_update_status() {
        let mut app = app();
        let mut events = app.controller.subscribe();

        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('s'));
        sleep(Duration::from_millis(300_500)).await;

        let mut completed = false;
        let mut saw_alert = false;
        while let Ok(event) = events.try_recv() {
            completed |= app.handle_timer_event(&event);
            if matches!(event.event_type, TimerEventType::AlertThreshold { .. }) {
                saw_alert = true;
                assert_eq!(app.status_message, "⚠️  30 seconds left!");
            }
        }

        assert!(saw_alert);
        assert!(completed);
        assert_eq!(app.status_message, "🔔 TIME'S UP! 🔔");
        assert!(app.snapshot().is_finished());
    }
}
