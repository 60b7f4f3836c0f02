//! Settings changes queued for the bar counter.
//!
//! The settings UI never touches a running counter directly. It sends a
//! [`SettingsChange`] through a [`SettingsHandle`]; the counter applies queued
//! changes at its next bar boundary so a bar never changes halfway through.

use crate::error::{FillbeatError, FillbeatResult};
use crate::types::{FillInterval, FillKind, FillStart, GeneratorConfig, NoteDivision};
use crossbeam_channel::Sender;
use std::num::NonZeroU32;

/// A single user-initiated settings change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsChange {
    /// New division and fill kind for the pattern maker
    Pattern {
        note_division: NoteDivision,
        fill_kind: FillKind,
    },
    /// New beat on which fills begin
    FillStart(FillStart),
    /// Whole generator configuration
    Generator(GeneratorConfig),
    /// Play a fill every N bars
    FillEvery(NonZeroU32),
    /// Toggle the helper cue at the start of a fill
    HelperCue(bool),
}

/// Cloneable sender side of a counter's settings queue.
///
/// Every method validates before sending; a rejected change is never queued.
#[derive(Clone, Debug)]
pub struct SettingsHandle {
    tx: Sender<SettingsChange>,
}

impl SettingsHandle {
    pub(crate) fn new(tx: Sender<SettingsChange>) -> Self {
        Self { tx }
    }

    pub fn send(&self, change: SettingsChange) -> FillbeatResult<()> {
        self.tx.send(change).map_err(|_| FillbeatError::SettingsClosed)
    }

    pub fn configure(&self, note_division: NoteDivision, fill_kind: FillKind) -> FillbeatResult<()> {
        self.send(SettingsChange::Pattern {
            note_division,
            fill_kind,
        })
    }

    /// Configure from settings-UI names
    pub fn configure_named(&self, note_division: &str, fill_kind: &str) -> FillbeatResult<()> {
        let note_division = NoteDivision::from_name(note_division)?;
        let fill_kind = FillKind::from_name(fill_kind)?;
        self.configure(note_division, fill_kind)
    }

    pub fn set_fill_start(&self, fill_start: FillStart) -> FillbeatResult<()> {
        self.send(SettingsChange::FillStart(fill_start))
    }

    pub fn set_fill_every_n_bars(&self, bars: u32) -> FillbeatResult<()> {
        let interval = FillInterval::from_bars(bars)?;
        self.send(SettingsChange::FillEvery(interval.every()))
    }

    pub fn set_helper_cue(&self, enabled: bool) -> FillbeatResult<()> {
        self.send(SettingsChange::HelperCue(enabled))
    }
}
