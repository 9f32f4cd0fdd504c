pub mod clock;
pub mod mistakes;
pub mod presenter;
pub mod result;

use std::io;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pacing policy for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum GameMode {
    /// Each word stays on screen for the same amount of time.
    #[serde(rename = "fixed-time")]
    #[value(name = "fixed-time")]
    FixedTimePerWord,
    /// Press Enter to continue to the next word.
    #[default]
    #[serde(rename = "manual-advance")]
    #[value(name = "manual-advance")]
    ManualAdvance,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::FixedTimePerWord => "Fixed Time",
            GameMode::ManualAdvance => "Manual Advance",
        }
    }
}

/// User-initiated cancellation observed at a suspension point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("session interrupted")]
pub struct SessionInterrupt;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Interrupted before the first word completed; no summary exists.
    #[error("aborted immediately")]
    Aborted,
    /// Only seen inside the loop; `run` turns it into an outcome or `Aborted`.
    #[error(transparent)]
    Interrupted(#[from] SessionInterrupt),
    #[error(transparent)]
    Io(#[from] io::Error),
}
