//! Sound cue boundary
//!
//! The controller calls [`SoundCue::play_alert`] from inside a tick. A cue
//! must return quickly; anything slow belongs on another thread. Failures are
//! reported back and logged, never applied to the countdown.

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum SoundCueError {
    #[error("Audio output unavailable: {0}")]
    Unavailable(String),

    #[error("Playback failed: {0}")]
    Playback(String),
}

pub trait SoundCue: Send + Sync {
    fn play_alert(&self) -> Result<(), SoundCueError>;

    /// Free whatever the cue holds on to.
    fn release(&self) {}
}

/// Cue that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl SoundCue for SilentCue {
    fn play_alert(&self) -> Result<(), SoundCueError> {
        tracing::debug!("Alert cue requested, playback is silent");
        Ok(())
    }
}

/// Plays every cue in order and keeps going past failures.
#[derive(Default, Clone)]
pub struct CueSet {
    cues: Vec<Arc<dyn SoundCue>>,
}

impl CueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cue: Arc<dyn SoundCue>) -> Self {
        self.cues.push(cue);
        self
    }

    pub fn push(&mut self, cue: Arc<dyn SoundCue>) {
        self.cues.push(cue);
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

impl SoundCue for CueSet {
    fn play_alert(&self) -> Result<(), SoundCueError> {
        let mut first_error = None;
        for cue in &self.cues {
            if let Err(e) = cue.play_alert() {
                tracing::warn!("Alert cue failed: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn release(&self) {
        for cue in &self.cues {
            cue.release();
        }
    }
}
