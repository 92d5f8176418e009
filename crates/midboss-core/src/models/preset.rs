//! Preset countdown durations

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One of the fixed countdown durations offered on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Preset {
    FiveMinutes,
    SixMinutes,
    SevenMinutes,
}

impl Preset {
    /// Presets in the order their buttons are laid out.
    pub const ALL: [Self; 3] = [Self::SevenMinutes, Self::SixMinutes, Self::FiveMinutes];

    pub fn seconds(&self) -> u64 {
        match self {
            Preset::FiveMinutes => 300,
            Preset::SixMinutes => 360,
            Preset::SevenMinutes => 420,
        }
    }

    pub fn minutes(&self) -> u64 {
        self.seconds() / 60
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::FiveMinutes => "5 min",
            Preset::SixMinutes => "6 min",
            Preset::SevenMinutes => "7 min",
        }
    }

    /// Key that selects this preset in the terminal UI.
    pub fn shortcut(&self) -> char {
        match self {
            Preset::FiveMinutes => '5',
            Preset::SixMinutes => '6',
            Preset::SevenMinutes => '7',
        }
    }

    pub fn from_seconds(seconds: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.seconds() == seconds)
    }

    pub fn from_minutes(minutes: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.minutes() == minutes)
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.shortcut() == key)
    }
}

impl TryFrom<u64> for Preset {
    type Error = Error;

    fn try_from(seconds: u64) -> Result<Self> {
        Preset::from_seconds(seconds).ok_or_else(|| {
            Error::InvalidData(format!("{} seconds is not a preset duration", seconds))
        })
    }
}

impl From<Preset> for u64 {
    fn from(preset: Preset) -> Self {
        preset.seconds()
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
