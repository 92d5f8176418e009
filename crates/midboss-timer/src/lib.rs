//! MidBoss Timer Library
//!
//! The countdown state machine and its sound cue boundary, shared by the
//! terminal UI and the headless runner.

pub mod cue;
pub mod timer;

pub use cue::{CueSet, SilentCue, SoundCue, SoundCueError};
pub use timer::{TimerController, TimerEvent, TimerEventType};
