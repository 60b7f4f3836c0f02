//! # Fillbeat Core
//!
//! Host-independent core of the fillbeat practice metronome. Builds the click
//! pattern for a bar from a note division and a fill kind, and decides on
//! every bar boundary whether the bar now starting is a normal bar or a fill.
//!
//! Nothing in this crate touches audio, threads or the terminal. A host feeds
//! quarter-note positions into a [`BarFillCounter`] and plays whatever
//! [`PatternString`] comes back.
//!
//! ## Features
//!
//! - **serde**: Serialize/deserialize the settings value types
//! - **colored**: Colored terminal rendering of pattern strings
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use fillbeat_core::{BarFillCounter, CounterSettings, PatternMaker, PatternDecision};
//!
//! let maker = Arc::new(PatternMaker::default());
//! let mut counter = BarFillCounter::new(maker, CounterSettings::default().without_count_in());
//! counter.start();
//!
//! if let PatternDecision::Bar { pattern, .. } = counter.on_quarter_note(1) {
//!     assert_eq!(pattern.to_string(), "2000200020002000");
//! }
//! ```

pub mod counter;
pub mod error;
pub mod generator;
pub mod types;

// Re-export commonly used types
pub use counter::{BarFillCounter, CounterPhase, PatternDecision, SettingsChange, SettingsHandle};
pub use error::{FillbeatError, FillbeatResult};
pub use generator::PatternMaker;
pub use types::{
    Accent, BarKind, BeatPosition, CounterSettings, FillKind, FillStart, GeneratorConfig,
    NoteDivision, PatternString,
};
