//! PatternString - the accent template for one bar.

use crate::error::FillbeatError;
use crate::types::{Accent, BeatPosition, BEATS_PER_BAR};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "colored")]
use colored::*;

/// Ordered accent slots for one bar, first slot on beat 1.
///
/// The slot buffer is shared, so clones are cheap enough to hand out on
/// every beat notification.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct PatternString {
    slots: Arc<[Accent]>,
    slots_per_beat: usize,
}

impl PatternString {
    /// Build a bar from an exact slot list
    pub fn new(slots: Vec<Accent>, slots_per_beat: usize) -> Result<Self, FillbeatError> {
        if slots_per_beat == 0 || slots.len() != slots_per_beat * BEATS_PER_BAR as usize {
            return Err(FillbeatError::InvalidPattern(format!(
                "{} slots do not fill {} beats of {} slots",
                slots.len(),
                BEATS_PER_BAR,
                slots_per_beat
            )));
        }
        Ok(Self {
            slots: slots.into(),
            slots_per_beat,
        })
    }

    /// Concatenate per-beat layouts. Table layouts always have `slots_per_beat` entries.
    pub(crate) fn from_beats<'a>(
        slots_per_beat: usize,
        beats: impl Iterator<Item = &'a [Accent]>,
    ) -> Self {
        let slots: Vec<Accent> = beats.flat_map(|beat| beat.iter().copied()).collect();
        debug_assert_eq!(slots.len(), slots_per_beat * BEATS_PER_BAR as usize);
        Self {
            slots: slots.into(),
            slots_per_beat,
        }
    }

    /// The fixed count-in click: one weak click per beat on the sixteenth grid
    pub fn count_in() -> Self {
        let beat: &[Accent] = &[Accent::Weak, Accent::Silent, Accent::Silent, Accent::Silent];
        Self::from_beats(4, (0..BEATS_PER_BAR).map(|_| beat))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Accent] {
        &self.slots
    }

    pub fn slots_per_beat(&self) -> usize {
        self.slots_per_beat
    }

    /// Slots belonging to one beat
    pub fn beat(&self, position: BeatPosition) -> &[Accent] {
        let start = position.index() * self.slots_per_beat;
        &self.slots[start..start + self.slots_per_beat]
    }

    /// Number of audible slots in the bar
    pub fn clicks(&self) -> usize {
        self.slots.iter().filter(|a| a.is_audible()).count()
    }

    /// Render for a terminal, highlighting the segment of the sounding beat
    #[cfg(feature = "colored")]
    pub fn render_colored(&self, current: Option<BeatPosition>) -> String {
        let mut out = String::with_capacity(self.len() * 12);
        for (i, segment) in self.slots.chunks(self.slots_per_beat).enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let lit = current.is_some_and(|p| p.index() == i);
            for accent in segment {
                let sym = accent.symbol().to_string();
                let styled = match (accent, lit) {
                    (Accent::Strong, true) => sym.bright_red().bold(),
                    (Accent::Strong, false) => sym.red(),
                    (Accent::Weak, true) => sym.bright_yellow(),
                    (Accent::Weak, false) => sym.yellow(),
                    (Accent::Silent, _) => sym.dimmed(),
                };
                out.push_str(&styled.to_string());
            }
        }
        out
    }
}

impl fmt::Display for PatternString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for accent in self.slots.iter() {
            write!(f, "{}", accent.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for PatternString {
    type Err = FillbeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slots = s
            .trim()
            .chars()
            .map(|c| {
                Accent::from_symbol(c)
                    .ok_or_else(|| FillbeatError::InvalidPattern(format!("bad symbol '{}'", c)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if slots.is_empty() || slots.len() % BEATS_PER_BAR as usize != 0 {
            return Err(FillbeatError::InvalidPattern(format!(
                "length {} is not a multiple of {}",
                slots.len(),
                BEATS_PER_BAR
            )));
        }
        let slots_per_beat = slots.len() / BEATS_PER_BAR as usize;
        PatternString::new(slots, slots_per_beat)
    }
}

impl From<PatternString> for String {
    fn from(pattern: PatternString) -> Self {
        pattern.to_string()
    }
}

impl TryFrom<String> for PatternString {
    type Error = FillbeatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
