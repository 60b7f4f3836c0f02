//! Quarter-note position within a 4/4 bar

use crate::error::{FillbeatError, FillbeatResult};
use std::fmt;

/// Beats in every bar
pub const BEATS_PER_BAR: u8 = 4;

/// A validated 1-based beat position (1..=4)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeatPosition(u8);

impl BeatPosition {
    pub const ONE: BeatPosition = BeatPosition(1);
    pub const FOUR: BeatPosition = BeatPosition(BEATS_PER_BAR);

    /// Validate a raw position from the beat clock
    pub fn new(position: u8) -> FillbeatResult<Self> {
        if (1..=BEATS_PER_BAR).contains(&position) {
            Ok(BeatPosition(position))
        } else {
            Err(FillbeatError::OutOfRangeBeatPosition(position))
        }
    }

    /// Position for a 0-indexed running beat count
    pub fn from_beat_number(beat_number: u64) -> Self {
        BeatPosition((beat_number % BEATS_PER_BAR as u64) as u8 + 1)
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// 0-based index into a bar
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn is_downbeat(&self) -> bool {
        self.0 == 1
    }

    pub fn is_last(&self) -> bool {
        self.0 == BEATS_PER_BAR
    }
}

impl fmt::Display for BeatPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
