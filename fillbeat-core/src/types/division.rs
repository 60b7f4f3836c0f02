//! Note division and fill settings
//!
//! These are the values the settings UI hands over as strings, so each one
//! parses from a case-insensitive name with a few short aliases. Unknown
//! names are rejected as [`FillbeatError::InvalidConfig`].

use crate::error::{FillbeatError, FillbeatResult};
use std::fmt;
use std::str::FromStr;

/// Subdivision used to build a bar's click pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NoteDivision {
    /// One click per beat
    #[default]
    Quarter,
    /// Beat plus a soft "and"
    Eighth,
    /// Three even clicks per beat
    EighthTriplet,
    /// Four clicks per beat
    Sixteenth,
    /// Swung eighths on the triplet grid
    Swing,
}

impl NoteDivision {
    pub const ALL: [NoteDivision; 5] = [
        NoteDivision::Quarter,
        NoteDivision::Eighth,
        NoteDivision::EighthTriplet,
        NoteDivision::Sixteenth,
        NoteDivision::Swing,
    ];

    /// Parse a division from its name (case-insensitive)
    pub fn from_name(s: &str) -> FillbeatResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "quarter" | "quarters" | "q" | "4" => Ok(NoteDivision::Quarter),
            "eighth" | "eighths" | "8th" | "8" => Ok(NoteDivision::Eighth),
            "triplet" | "triplets" | "eighth-triplet" | "3" => Ok(NoteDivision::EighthTriplet),
            "sixteenth" | "sixteenths" | "16th" | "16" => Ok(NoteDivision::Sixteenth),
            "swing" | "shuffle" => Ok(NoteDivision::Swing),
            other => Err(FillbeatError::InvalidConfig(format!(
                "unknown note division '{}'",
                other
            ))),
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            NoteDivision::Quarter => "quarter",
            NoteDivision::Eighth => "eighth",
            NoteDivision::EighthTriplet => "eighth-triplet",
            NoteDivision::Sixteenth => "sixteenth",
            NoteDivision::Swing => "swing",
        }
    }

    /// Slots per beat of the grid this division is written on.
    /// Straight divisions share the sixteenth grid, triplet feels use a 3-slot grid.
    pub fn slots_per_beat(&self) -> usize {
        match self {
            NoteDivision::Quarter | NoteDivision::Eighth | NoteDivision::Sixteenth => 4,
            NoteDivision::EighthTriplet | NoteDivision::Swing => 3,
        }
    }
}

impl FromStr for NoteDivision {
    type Err = FillbeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteDivision::from_name(s)
    }
}

impl fmt::Display for NoteDivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rhythmic variation played on a fill bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FillKind {
    /// Fill bars sound like normal bars
    #[default]
    NoFill,
    /// Every other slot accented
    Accented,
    /// Every slot accented
    Sixteenth,
}

impl FillKind {
    pub const ALL: [FillKind; 3] = [FillKind::NoFill, FillKind::Accented, FillKind::Sixteenth];

    /// Parse a fill kind from its name (case-insensitive)
    pub fn from_name(s: &str) -> FillbeatResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "no-fill" | "nofill" | "off" => Ok(FillKind::NoFill),
            "accented" | "accent" => Ok(FillKind::Accented),
            "sixteenth" | "16th" | "16" | "roll" => Ok(FillKind::Sixteenth),
            other => Err(FillbeatError::InvalidConfig(format!(
                "unknown fill kind '{}'",
                other
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FillKind::NoFill => "none",
            FillKind::Accented => "accented",
            FillKind::Sixteenth => "sixteenth",
        }
    }
}

impl FromStr for FillKind {
    type Err = FillbeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FillKind::from_name(s)
    }
}

impl fmt::Display for FillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Beat of the fill bar on which the fill layout takes over
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillStart {
    #[default]
    Beat1,
    Beat2,
    Beat3,
    Beat4,
}

impl FillStart {
    /// Build from a 1-based beat number
    pub fn from_beat(beat: u8) -> FillbeatResult<Self> {
        match beat {
            1 => Ok(FillStart::Beat1),
            2 => Ok(FillStart::Beat2),
            3 => Ok(FillStart::Beat3),
            4 => Ok(FillStart::Beat4),
            other => Err(FillbeatError::InvalidConfig(format!(
                "fill start beat must be 1-4, got {}",
                other
            ))),
        }
    }

    /// 1-based beat number
    pub fn beat(&self) -> u8 {
        match self {
            FillStart::Beat1 => 1,
            FillStart::Beat2 => 2,
            FillStart::Beat3 => 3,
            FillStart::Beat4 => 4,
        }
    }
}

impl FromStr for FillStart {
    type Err = FillbeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let beat = s.trim().parse::<u8>().map_err(|_| {
            FillbeatError::InvalidConfig(format!("fill start beat must be 1-4, got '{}'", s))
        })?;
        FillStart::from_beat(beat)
    }
}

impl fmt::Display for FillStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "beat {}", self.beat())
    }
}
