//! Practice session - owns the generator and the per-playback counter
//!
//! The session is the single owner of the [`PatternMaker`]. It keeps the
//! user's current settings, builds a fresh [`BarFillCounter`] every time
//! playback starts and drops it on stop. While a counter is running, settings
//! changes are routed through its queue so they land on a bar boundary.

use crate::playback::render::ClickSink;
use crate::settings::PracticeSettings;
use fillbeat_core::{
    BarFillCounter, CounterPhase, CounterSettings, FillKind, FillStart, FillbeatResult,
    GeneratorConfig, NoteDivision, PatternDecision, PatternMaker, PatternString, SettingsChange,
};
use log::{info, warn};
use std::sync::Arc;

pub struct PracticeSession {
    maker: Arc<PatternMaker>,
    generator: GeneratorConfig,
    counter_settings: CounterSettings,
    counter: Option<BarFillCounter>,
    sink: Box<dyn ClickSink + Send>,
}

impl PracticeSession {
    pub fn new(settings: &PracticeSettings, sink: Box<dyn ClickSink + Send>) -> Self {
        Self {
            maker: Arc::new(PatternMaker::new(settings.generator)),
            generator: settings.generator,
            counter_settings: settings.counter,
            counter: None,
            sink,
        }
    }

    /// The session's generator, for read-only consumers
    pub fn maker(&self) -> &Arc<PatternMaker> {
        &self.maker
    }

    pub fn is_playing(&self) -> bool {
        self.counter.is_some()
    }

    pub fn phase(&self) -> CounterPhase {
        self.counter
            .as_ref()
            .map_or(CounterPhase::Idle, BarFillCounter::phase)
    }

    pub fn bar_index(&self) -> Option<u64> {
        self.counter.as_ref().and_then(BarFillCounter::bar_index)
    }

    /// Settings the next bar (or next session) will use
    pub fn generator(&self) -> GeneratorConfig {
        self.generator
    }

    pub fn counter_settings(&self) -> CounterSettings {
        self.counter_settings
    }

    /// Patterns for the current settings, ignoring anything still queued
    pub fn preview(&self) -> (PatternString, PatternString) {
        PatternMaker::new(self.generator).patterns()
    }

    /// Start a new playback session at bar 0
    pub fn start(&mut self) {
        if self.counter.is_some() {
            self.stop();
        }
        self.maker.configure_with(self.generator);
        let mut counter = BarFillCounter::new(self.maker.clone(), self.counter_settings);
        counter.start();
        info!(
            "session started: {} / fill {} every {} bars",
            self.generator.note_division, self.generator.fill_kind, self.counter_settings.fill_every
        );
        self.counter = Some(counter);
    }

    /// Stop playback; the counter and its bar count are discarded
    pub fn stop(&mut self) {
        if let Some(mut counter) = self.counter.take() {
            counter.stop();
            self.sink.on_stop();
        }
    }

    /// Beat callback from the clock
    pub fn handle_beat(&mut self, position: u8) -> PatternDecision {
        let Some(counter) = self.counter.as_mut() else {
            return PatternDecision::Idle;
        };
        let decision = counter.on_quarter_note(position);
        self.sink.on_decision(&decision);
        decision
    }

    pub fn set_division(&mut self, note_division: NoteDivision) -> FillbeatResult<()> {
        self.generator.note_division = note_division;
        self.push_generator()
    }

    pub fn set_fill_kind(&mut self, fill_kind: FillKind) -> FillbeatResult<()> {
        self.generator.fill_kind = fill_kind;
        self.push_generator()
    }

    pub fn set_fill_start(&mut self, fill_start: FillStart) -> FillbeatResult<()> {
        self.generator.fill_start = fill_start;
        self.push_generator()
    }

    /// Change the fill spacing. Zero is rejected and the old value stays.
    pub fn set_fill_every(&mut self, bars: u32) -> FillbeatResult<()> {
        let updated = CounterSettings::new(
            bars,
            self.counter_settings.count_in_bars,
            self.counter_settings.helper_cue,
        )?;
        if let Some(counter) = self.counter.as_mut() {
            counter.set_fill_every_n_bars(bars)?;
        }
        self.counter_settings = updated;
        Ok(())
    }

    /// Count-in length for the next start
    pub fn set_count_in(&mut self, bars: u32) {
        self.counter_settings.count_in_bars = bars;
    }

    pub fn set_helper_cue(&mut self, enabled: bool) -> FillbeatResult<()> {
        self.counter_settings.helper_cue = enabled;
        match &self.counter {
            Some(counter) => counter.settings_handle().set_helper_cue(enabled),
            None => Ok(()),
        }
    }

    fn push_generator(&mut self) -> FillbeatResult<()> {
        match &self.counter {
            Some(counter) => counter
                .settings_handle()
                .send(SettingsChange::Generator(self.generator))
                .inspect_err(|e| warn!("settings change dropped: {}", e)),
            None => {
                self.maker.configure_with(self.generator);
                Ok(())
            }
        }
    }
}
