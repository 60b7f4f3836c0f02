//! Settings value types
//!
//! Pure data, replaced wholesale whenever the user changes something.

use super::pattern::{FillInterval, DEFAULT_FILL_EVERY};
use super::{FillKind, FillStart, NoteDivision};
use crate::error::FillbeatResult;
use std::num::NonZeroU32;

/// Everything the pattern generator needs to build both bar layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    pub note_division: NoteDivision,
    pub fill_kind: FillKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fill_start: FillStart,
}

impl GeneratorConfig {
    pub fn new(note_division: NoteDivision, fill_kind: FillKind) -> Self {
        Self {
            note_division,
            fill_kind,
            fill_start: FillStart::default(),
        }
    }

    pub fn with_fill_start(mut self, fill_start: FillStart) -> Self {
        self.fill_start = fill_start;
        self
    }
}

/// Bar counting settings for one playback session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterSettings {
    /// Play a fill every N bars
    pub fill_every: NonZeroU32,
    /// Bars of count-in click before bar 0 (0 = start straight away)
    pub count_in_bars: u32,
    /// Flag the first beat of each fill bar so the host can play a helper cue
    pub helper_cue: bool,
}

impl CounterSettings {
    /// Validate raw settings; `fill_every` of 0 is rejected
    pub fn new(fill_every: u32, count_in_bars: u32, helper_cue: bool) -> FillbeatResult<Self> {
        let interval = FillInterval::from_bars(fill_every)?;
        Ok(Self {
            fill_every: interval.every(),
            count_in_bars,
            helper_cue,
        })
    }

    pub fn without_count_in(mut self) -> Self {
        self.count_in_bars = 0;
        self
    }

    pub fn interval(&self) -> FillInterval {
        FillInterval::new(self.fill_every)
    }
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            fill_every: DEFAULT_FILL_EVERY,
            count_in_bars: 1,
            helper_cue: true,
        }
    }
}
