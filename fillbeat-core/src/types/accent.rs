//! Accent kinds for a single slot of a click pattern

use std::fmt;

/// What sounds in one subdivision slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Accent {
    /// Nothing plays
    #[default]
    Silent,
    /// Soft click
    Weak,
    /// Accented click
    Strong,
}

impl Accent {
    /// Wire symbol consumed by the click engine
    pub fn symbol(&self) -> char {
        match self {
            Accent::Silent => '0',
            Accent::Weak => '1',
            Accent::Strong => '2',
        }
    }

    /// Parse a wire symbol
    pub fn from_symbol(c: char) -> Option<Accent> {
        match c {
            '0' => Some(Accent::Silent),
            '1' => Some(Accent::Weak),
            '2' => Some(Accent::Strong),
            _ => None,
        }
    }

    /// True for anything that produces a click
    pub fn is_audible(&self) -> bool {
        !matches!(self, Accent::Silent)
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
