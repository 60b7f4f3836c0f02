//! FillInterval - every-N-bars selection between the normal and fill layouts.

use crate::error::{FillbeatError, FillbeatResult};
use std::fmt;
use std::num::NonZeroU32;

/// Fill spacing used when nothing else is configured
pub const DEFAULT_FILL_EVERY: NonZeroU32 = match NonZeroU32::new(4) {
    Some(every) => every,
    None => panic!("fill interval must be non-zero"),
};

/// Which layout a bar plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarKind {
    Normal,
    Fill,
}

impl fmt::Display for BarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarKind::Normal => write!(f, "normal"),
            BarKind::Fill => write!(f, "fill"),
        }
    }
}

/// Plays a fill every N bars.
///
/// The first bar of a session (index 0) is never a fill, so the player
/// always hears at least one plain bar before the first cue:
/// - `every 4`: normal on 0, 1, 2, 3, fill on 4, normal on 5, 6, 7, fill on 8...
/// - `every 1`: normal on 0, fill on every bar after it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillInterval {
    every: NonZeroU32,
}

impl FillInterval {
    pub fn new(every: NonZeroU32) -> Self {
        Self { every }
    }

    /// Validate a raw bar count coming from the settings UI
    pub fn from_bars(bars: u32) -> FillbeatResult<Self> {
        NonZeroU32::new(bars).map(Self::new).ok_or_else(|| {
            FillbeatError::InvalidConfig("fills must be at least 1 bar apart".to_string())
        })
    }

    /// How many bars apart fills are
    pub fn every(&self) -> NonZeroU32 {
        self.every
    }

    /// Classify the bar with the given 0-based index
    pub fn kind_for_bar(&self, bar_index: u64) -> BarKind {
        if bar_index > 0 && bar_index % u64::from(self.every.get()) == 0 {
            BarKind::Fill
        } else {
            BarKind::Normal
        }
    }
}

impl Default for FillInterval {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_EVERY)
    }
}

impl fmt::Display for FillInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every({} bars)", self.every)
    }
}
