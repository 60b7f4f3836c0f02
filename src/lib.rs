//! # fillbeat
//!
//! Terminal practice metronome built on [`fillbeat_core`]. A beat clock
//! drives a practice session, which asks the core counter for the pattern of
//! every quarter note and prints it, with a fill bar every few bars.
//!
//! ## Modules
//!
//! - `playback`: beat clock, session ownership of the generator and counter,
//!   terminal rendering.
//! - `commands`: prompt commands for playback and settings.
//! - `repl`: the interactive prompt.
//! - `settings`: startup settings read from the environment.

pub mod commands;
pub mod playback;
pub mod repl;
pub mod settings;

pub use crate::playback::{BeatClock, PracticeSession};
pub use crate::settings::PracticeSettings;
