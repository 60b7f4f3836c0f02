//! Click patterns for one 4/4 bar
//!
//! A bar is a fixed grid of subdivision slots, one segment per beat. The
//! accent layout of each segment comes from static tables keyed by note
//! division and fill kind, so building a pattern never does rhythm math.

mod every;
mod string;
mod tables;


// Re-export public types
pub use every::{BarKind, FillInterval, DEFAULT_FILL_EVERY};
pub use string::PatternString;
pub use tables::{fill_bar, fill_beat, normal_bar, normal_beat};
