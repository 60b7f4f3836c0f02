// fillbeat-core/src/types/mod.rs

pub mod accent;
pub mod beat;
pub mod division;
pub mod pattern;
pub mod settings;

pub use accent::Accent;
pub use beat::{BeatPosition, BEATS_PER_BAR};
pub use division::{FillKind, FillStart, NoteDivision};
pub use pattern::{BarKind, FillInterval, PatternString, DEFAULT_FILL_EVERY};
pub use settings::{CounterSettings, GeneratorConfig};
