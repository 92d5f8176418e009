//! Countdown state machine
//!
//! [`TimerController`] owns the selected duration, the remaining seconds and
//! the running flag, plus the single tick task that counts down while
//! running. Operations that do not apply in the current state are no-ops.

use midboss_core::models::{TimerSnapshot, ALERT_THRESHOLD_SECONDS};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use super::events::{TimerEvent, TimerEventType};
use crate::cue::{SilentCue, SoundCue};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const EVENT_CAPACITY: usize = 1000;

#[derive(Debug, Default)]
struct CountdownState {
    selected_seconds: u64,
    remaining_seconds: u64,
    running: bool,
    /// Identifies the live tick task. Ticks carrying an older epoch are dropped.
    epoch: u64,
    tick_task: Option<JoinHandle<()>>,
}

impl CountdownState {
    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            selected_seconds: self.selected_seconds,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
        }
    }

    fn cancel_tick(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
        self.running = false;
    }
}

enum TickOutcome {
    Stale,
    Counted { alert: bool, finished: bool },
}

struct Shared {
    state: Mutex<CountdownState>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    event_tx: broadcast::Sender<TimerEvent>,
    cue: Arc<dyn SoundCue>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CountdownState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Must be called with the state lock held so observers see changes in order.
    fn publish(&self, state: &CountdownState, event: TimerEvent) {
        self.snapshot_tx.send_replace(state.snapshot());
        let _ = self.event_tx.send(event);
    }

    fn apply_tick(&self, epoch: u64) -> TickOutcome {
        let mut state = self.lock();
        if state.epoch != epoch || !state.running || state.remaining_seconds == 0 {
            return TickOutcome::Stale;
        }

        state.remaining_seconds -= 1;
        let remaining = state.remaining_seconds;
        self.publish(&state, TimerEvent::tick(remaining));

        let alert = remaining == ALERT_THRESHOLD_SECONDS;
        if alert {
            let _ = self.event_tx.send(TimerEvent::alert_threshold(remaining));
        }

        let finished = remaining == 0;
        if finished {
            state.running = false;
            // This task is the one finishing; dropping its handle just detaches it.
            state.tick_task = None;
            self.publish(&state, TimerEvent::new(TimerEventType::Completed));
        }

        TickOutcome::Counted { alert, finished }
    }

    fn play_alert(&self) {
        tracing::info!("{} seconds left, playing alert", ALERT_THRESHOLD_SECONDS);
        if let Err(e) = self.cue.play_alert() {
            tracing::warn!("Failed to play alert cue: {}", e);
        }
    }
}

async fn run_ticks(shared: Arc<Shared>, epoch: u64, first_tick: Instant) {
    let mut ticks = interval_at(first_tick, TICK_INTERVAL);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;

        match shared.apply_tick(epoch) {
            TickOutcome::Stale => {
                tracing::debug!("Tick task {} is no longer current, exiting", epoch);
                break;
            }
            TickOutcome::Counted { alert, finished } => {
                // The cue runs outside the state lock.
                if alert {
                    shared.play_alert();
                }
                if finished {
                    tracing::info!("Countdown completed");
                    break;
                }
            }
        }
    }
}

/// Single countdown with preset selection and a cancellable one-second tick.
pub struct TimerController {
    shared: Arc<Shared>,
}

impl TimerController {
    pub fn new(cue: Arc<dyn SoundCue>) -> Self {
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::default());
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CountdownState::default()),
                snapshot_tx,
                event_tx,
                cue,
            }),
        }
    }

    /// Controller whose alert plays nothing.
    pub fn silent() -> Self {
        Self::new(Arc::new(SilentCue))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.lock().snapshot()
    }

    /// Receiver that always holds the latest snapshot.
    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Subscribe to timer events
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.shared.event_tx.subscribe()
    }

    pub fn selected_seconds(&self) -> u64 {
        self.shared.lock().selected_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.shared.lock().remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// Choose the countdown duration. Ignored while running.
    pub fn select_timer(&self, seconds: u64) {
        let mut state = self.shared.lock();
        if state.running {
            tracing::debug!("Ignoring selection of {}s while running", seconds);
            return;
        }

        state.selected_seconds = seconds;
        state.remaining_seconds = seconds;
        tracing::info!("Selected {}s countdown", seconds);
        self.shared.publish(&state, TimerEvent::selected(seconds));
    }

    /// Start or resume counting down from the current remaining value.
    ///
    /// Ignored when already running, when nothing is selected, or when
    /// nothing is left to count down. Must be called within a Tokio runtime.
    pub fn start_timer(&self) {
        let mut state = self.shared.lock();
        if state.running {
            tracing::debug!("Start ignored, countdown already running");
            return;
        }
        if state.selected_seconds == 0 {
            tracing::debug!("Start ignored, no duration selected");
            return;
        }
        if state.remaining_seconds == 0 {
            tracing::debug!("Start ignored, countdown already at zero");
            return;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Cannot start countdown outside a Tokio runtime: {}", e);
                return;
            }
        };

        state.epoch = state.epoch.wrapping_add(1);
        state.running = true;
        let first_tick = Instant::now() + TICK_INTERVAL;
        let task = runtime.spawn(run_ticks(Arc::clone(&self.shared), state.epoch, first_tick));
        state.tick_task = Some(task);

        let remaining = state.remaining_seconds;
        tracing::info!("Countdown started with {}s remaining", remaining);
        self.shared.publish(&state, TimerEvent::started(remaining));
    }

    /// Stop ticking and keep the remaining value for a later resume.
    pub fn pause_timer(&self) {
        let mut state = self.shared.lock();
        if !state.running {
            tracing::debug!("Pause ignored, countdown not running");
            return;
        }

        state.cancel_tick();
        let remaining = state.remaining_seconds;
        tracing::info!("Countdown paused at {}s", remaining);
        self.shared.publish(&state, TimerEvent::paused(remaining));
    }

    /// Stop ticking and rewind to the selected duration.
    pub fn stop_timer(&self) {
        let mut state = self.shared.lock();
        let before = state.snapshot();

        state.cancel_tick();
        state.remaining_seconds = state.selected_seconds;

        if state.snapshot() == before {
            tracing::debug!("Stop had nothing to do");
            return;
        }

        let remaining = state.remaining_seconds;
        tracing::info!("Countdown stopped, rewound to {}s", remaining);
        self.shared.publish(&state, TimerEvent::stopped(remaining));
    }

    /// Stop ticking and clear the selection.
    pub fn reset_timers(&self) {
        let mut state = self.shared.lock();
        let before = state.snapshot();

        state.cancel_tick();
        state.selected_seconds = 0;
        state.remaining_seconds = 0;

        if state.snapshot() == before {
            tracing::debug!("Reset had nothing to do");
            return;
        }

        tracing::info!("Timer reset");
        self.shared
            .publish(&state, TimerEvent::new(TimerEventType::Reset));
    }

    /// Cancel any pending tick and release the sound cue.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.lock();
            let was_running = state.running;
            state.cancel_tick();
            if was_running {
                let remaining = state.remaining_seconds;
                self.shared.publish(&state, TimerEvent::paused(remaining));
            }
        }

        self.shared.cue.release();
        tracing::info!("Timer controller shut down");
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::silent()
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.shared.lock().cancel_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midboss_core::models::{Preset, TimerPhase};

    #[test]
    fn test_new_controller_is_idle() {
        let controller = TimerController::silent();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot, TimerSnapshot::default());
        assert_eq!(snapshot.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_select_every_preset() {
        let controller = TimerController::silent();
        for preset in Preset::ALL {
            controller.select_timer(preset.seconds());
            assert_eq!(controller.remaining_seconds(), preset.seconds());
            assert_eq!(controller.selected_seconds(), preset.seconds());
            assert!(!controller.is_running());
        }
    }

    #[test]
    fn test_start_without_selection_is_ignored() {
        let controller = TimerController::silent();
        controller.start_timer();
        assert!(!controller.is_running());
        assert_eq!(controller.snapshot(), TimerSnapshot::default());
    }

    #[test]
    fn test_start_outside_runtime_is_ignored() {
        let controller = TimerController::silent();
        controller.select_timer(300);
        controller.start_timer();
        assert!(!controller.is_running());
        assert_eq!(controller.remaining_seconds(), 300);
    }

    #[test]
    fn test_stop_and_reset_when_idle_do_nothing() {
        let controller = TimerController::silent();
        let mut rx = controller.subscribe();

        controller.pause_timer();
        controller.stop_timer();
        controller.reset_timers();

        assert_eq!(controller.snapshot(), TimerSnapshot::default());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_while_running_is_ignored() {
        let controller = TimerController::silent();
        controller.select_timer(360);
        controller.start_timer();
        assert!(controller.is_running());

        controller.select_timer(420);
        assert_eq!(controller.selected_seconds(), 360);
        assert_eq!(controller.remaining_seconds(), 360);

        controller.reset_timers();
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_keeps_one_task() {
        let controller = TimerController::silent();
        controller.select_timer(300);
        let mut rx = controller.subscribe();

        controller.start_timer();
        let epoch = controller.shared.lock().epoch;
        controller.start_timer();
        assert_eq!(controller.shared.lock().epoch, epoch);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event.event_type, TimerEventType::Started { .. }));
        assert!(rx.try_recv().is_err());

        controller.pause_timer();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_task_handle() {
        let controller = TimerController::silent();
        controller.select_timer(300);
        controller.start_timer();
        assert!(controller.shared.lock().tick_task.is_some());

        controller.pause_timer();
        assert!(controller.shared.lock().tick_task.is_none());
        assert!(!controller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_sees_latest_snapshot() {
        let controller = TimerController::silent();
        let mut rx = controller.watch();

        controller.select_timer(420);
        assert!(rx.has_changed().unwrap());
        let snapshot = *rx.borrow_and_update();
        assert_eq!(snapshot.remaining_seconds, 420);
        assert!(!snapshot.running);

        controller.start_timer();
        assert!(rx.borrow_and_update().running);

        controller.stop_timer();
        assert!(!rx.borrow().running);
    }
}
