//! PatternDecision - what the host should play for one beat.

use crate::types::{BarKind, BeatPosition, PatternString};
use std::fmt;

/// Result of feeding one quarter note into the counter
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternDecision {
    /// Playback is stopped; nothing sounds
    Idle,
    /// Count-in click before bar 0
    CountIn {
        pattern: PatternString,
        position: BeatPosition,
        /// Beats left until bar 0, counting this one
        beats_remaining: u32,
    },
    /// A beat that belongs to no counted bar, e.g. before the first downbeat
    Pickup { pattern: PatternString },
    /// A beat inside a counted bar
    Bar {
        pattern: PatternString,
        position: BeatPosition,
        bar_index: u64,
        kind: BarKind,
        /// True on the beat that opened this bar
        bar_start: bool,
        /// Play the helper cue on this beat
        cue: bool,
    },
}

impl PatternDecision {
    /// Pattern to hand to the click engine, if anything should sound
    pub fn pattern(&self) -> Option<&PatternString> {
        match self {
            PatternDecision::Idle => None,
            PatternDecision::CountIn { pattern, .. }
            | PatternDecision::Pickup { pattern }
            | PatternDecision::Bar { pattern, .. } => Some(pattern),
        }
    }

    pub fn position(&self) -> Option<BeatPosition> {
        match self {
            PatternDecision::CountIn { position, .. } | PatternDecision::Bar { position, .. } => {
                Some(*position)
            }
            PatternDecision::Idle | PatternDecision::Pickup { .. } => None,
        }
    }

    pub fn bar_index(&self) -> Option<u64> {
        match self {
            PatternDecision::Bar { bar_index, .. } => Some(*bar_index),
            _ => None,
        }
    }

    /// The same beat without the bar-opening flags, for repeating it
    /// when a beat cannot be placed
    pub(crate) fn replayed(&self) -> Self {
        match self {
            PatternDecision::Bar {
                pattern,
                position,
                bar_index,
                kind,
                ..
            } => PatternDecision::Bar {
                pattern: pattern.clone(),
                position: *position,
                bar_index: *bar_index,
                kind: *kind,
                bar_start: false,
                cue: false,
            },
            other => other.clone(),
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(
            self,
            PatternDecision::Bar {
                kind: BarKind::Fill,
                ..
            }
        )
    }
}

impl fmt::Display for PatternDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternDecision::Idle => write!(f, "idle"),
            PatternDecision::CountIn {
                position,
                beats_remaining,
                ..
            } => write!(f, "count-in beat {} ({} left)", position, beats_remaining),
            PatternDecision::Pickup { pattern } => write!(f, "pickup {}", pattern),
            PatternDecision::Bar {
                pattern,
                position,
                bar_index,
                kind,
                ..
            } => write!(f, "bar {} beat {} {} {}", bar_index, position, kind, pattern),
        }
    }
}
