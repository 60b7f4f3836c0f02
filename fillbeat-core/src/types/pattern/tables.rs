//! Static accent tables.
//!
//! Each entry is the layout of a single beat; a bar repeats it four times.
//! Slot 0 of every beat is always [`Accent::Strong`].

use super::string::PatternString;
use crate::types::{Accent, FillKind, FillStart, NoteDivision, BEATS_PER_BAR};

const O: Accent = Accent::Silent;
const W: Accent = Accent::Weak;
const S: Accent = Accent::Strong;

// Sixteenth grid (4 slots per beat)
const QUARTER: [Accent; 4] = [S, O, O, O];
const EIGHTH: [Accent; 4] = [S, O, W, O];
const SIXTEENTH: [Accent; 4] = [S, W, W, W];
const ACCENTED_STRAIGHT: [Accent; 4] = [S, O, S, O];
const ACCENTED_SIXTEENTH: [Accent; 4] = [S, W, S, W];
const ROLL_STRAIGHT: [Accent; 4] = [S, S, S, S];

// Triplet grid (3 slots per beat)
const TRIPLET: [Accent; 3] = [S, W, W];
const SWING: [Accent; 3] = [S, O, W];
const ACCENTED_SWING: [Accent; 3] = [S, O, S];
const ROLL_TRIPLET: [Accent; 3] = [S, S, S];

/// Layout of one beat in a normal bar
pub fn normal_beat(division: NoteDivision) -> &'static [Accent] {
    match division {
        NoteDivision::Quarter => &QUARTER,
        NoteDivision::Eighth => &EIGHTH,
        NoteDivision::Sixteenth => &SIXTEENTH,
        NoteDivision::EighthTriplet => &TRIPLET,
        NoteDivision::Swing => &SWING,
    }
}

/// Layout of one beat in a fill bar
pub fn fill_beat(division: NoteDivision, kind: FillKind) -> &'static [Accent] {
    match (kind, division) {
        (FillKind::NoFill, _) => normal_beat(division),

        (FillKind::Accented, NoteDivision::Quarter | NoteDivision::Eighth) => &ACCENTED_STRAIGHT,
        (FillKind::Accented, NoteDivision::Sixteenth) => &ACCENTED_SIXTEENTH,
        (FillKind::Accented, NoteDivision::EighthTriplet) => &ROLL_TRIPLET,
        (FillKind::Accented, NoteDivision::Swing) => &ACCENTED_SWING,

        (
            FillKind::Sixteenth,
            NoteDivision::Quarter | NoteDivision::Eighth | NoteDivision::Sixteenth,
        ) => &ROLL_STRAIGHT,
        (FillKind::Sixteenth, NoteDivision::EighthTriplet | NoteDivision::Swing) => &ROLL_TRIPLET,
    }
}

/// Full normal bar for a division
pub fn normal_bar(division: NoteDivision) -> PatternString {
    let beat = normal_beat(division);
    PatternString::from_beats(
        division.slots_per_beat(),
        (0..BEATS_PER_BAR).map(|_| beat),
    )
}

/// Full fill bar. Beats before `start` keep the normal layout.
pub fn fill_bar(division: NoteDivision, kind: FillKind, start: FillStart) -> PatternString {
    let normal = normal_beat(division);
    let fill = fill_beat(division, kind);
    PatternString::from_beats(
        division.slots_per_beat(),
        (1..=BEATS_PER_BAR).map(|beat| if beat < start.beat() { normal } else { fill }),
    )
}
