//! Startup settings for a practice session
//!
//! Defaults match a plain practice setup: 90 BPM quarter notes, a one-bar
//! count-in and a fill every 4 bars with the helper cue on. Any of them can
//! be overridden from the environment:
//!
//! - `FILLBEAT_BPM`
//! - `FILLBEAT_DIVISION` (quarter, eighth, triplet, sixteenth, swing)
//! - `FILLBEAT_FILL` (none, accented, sixteenth)
//! - `FILLBEAT_FILL_START` (1-4)
//! - `FILLBEAT_FILL_EVERY`
//! - `FILLBEAT_COUNT_IN` (bars, 0 to skip)
//! - `FILLBEAT_HELPER_CUE` (on/off)

use crate::playback::clock::{MAX_BPM, MIN_BPM};
use anyhow::{anyhow, bail, Context, Result};
use fillbeat_core::{CounterSettings, FillKind, FillStart, GeneratorConfig, NoteDivision};

pub const DEFAULT_BPM: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PracticeSettings {
    pub bpm: f32,
    pub generator: GeneratorConfig,
    pub counter: CounterSettings,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            generator: GeneratorConfig::default(),
            counter: CounterSettings::default(),
        }
    }
}

impl PracticeSettings {
    /// Defaults overridden by `FILLBEAT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(bpm) = lookup("FILLBEAT_BPM") {
            settings.bpm = parse_bpm(&bpm).context("FILLBEAT_BPM")?;
        }
        if let Some(division) = lookup("FILLBEAT_DIVISION") {
            settings.generator.note_division =
                NoteDivision::from_name(&division).context("FILLBEAT_DIVISION")?;
        }
        if let Some(fill) = lookup("FILLBEAT_FILL") {
            settings.generator.fill_kind = FillKind::from_name(&fill).context("FILLBEAT_FILL")?;
        }
        if let Some(start) = lookup("FILLBEAT_FILL_START") {
            settings.generator.fill_start =
                start.parse::<FillStart>().context("FILLBEAT_FILL_START")?;
        }

        let mut fill_every = settings.counter.fill_every.get();
        let mut count_in_bars = settings.counter.count_in_bars;
        let mut helper_cue = settings.counter.helper_cue;
        if let Some(every) = lookup("FILLBEAT_FILL_EVERY") {
            fill_every = parse_count(&every).context("FILLBEAT_FILL_EVERY")?;
        }
        if let Some(bars) = lookup("FILLBEAT_COUNT_IN") {
            count_in_bars = parse_count(&bars).context("FILLBEAT_COUNT_IN")?;
        }
        if let Some(cue) = lookup("FILLBEAT_HELPER_CUE") {
            helper_cue = parse_switch(&cue).context("FILLBEAT_HELPER_CUE")?;
        }
        settings.counter =
            CounterSettings::new(fill_every, count_in_bars, helper_cue).context("FILLBEAT_FILL_EVERY")?;

        Ok(settings)
    }
}

/// Tempo in the range the clock accepts
pub fn parse_bpm(s: &str) -> Result<f32> {
    let bpm: f32 = s
        .trim()
        .parse()
        .map_err(|_| anyhow!("'{}' is not a tempo", s.trim()))?;
    if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        bail!("tempo must be between {} and {} BPM", MIN_BPM, MAX_BPM);
    }
    Ok(bpm)
}

pub fn parse_count(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| anyhow!("'{}' is not a whole number", s.trim()))
}

/// on/off, true/false, yes/no, 1/0
pub fn parse_switch(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("expected on or off, got '{}'", other),
    }
}
