//! BarFillCounter - bar-boundary state machine
//!
//! Consumes one quarter-note position per beat, counts bars and decides on
//! each downbeat whether the bar now starting is a fill. The chosen pattern is
//! cached for the rest of the bar, so a reconfiguration mid-bar is only heard
//! from the next downbeat on.
//!
//! ```text
//! Idle --start--> CountingIn --terminal count-in beat--> Running
//!   ^                 |                                     |
//!   +------stop-------+-----------------stop----------------+
//! ```
//!
//! The bar state lives inside the `Running` variant, so stopping drops it and
//! the next start always begins at bar 0.

mod decision;
mod messages;

#[cfg(test)]
mod tests;

pub use decision::PatternDecision;
pub use messages::{SettingsChange, SettingsHandle};

use crate::error::FillbeatResult;
use crate::generator::PatternMaker;
use crate::types::{
    BarKind, BeatPosition, CounterSettings, FillInterval, PatternString, BEATS_PER_BAR,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use std::sync::Arc;

/// Coarse state of the counter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterPhase {
    Idle,
    CountingIn,
    Running,
}

/// The bar currently sounding
#[derive(Clone, Debug)]
struct CurrentBar {
    index: u64,
    kind: BarKind,
    pattern: PatternString,
}

/// Running state, discarded on stop
#[derive(Clone, Debug, Default)]
struct BarState {
    last_quarter: Option<BeatPosition>,
    bar: Option<CurrentBar>,
}

#[derive(Clone, Debug)]
enum CounterState {
    Idle,
    CountingIn {
        bars_left: u32,
        last_quarter: Option<BeatPosition>,
    },
    Running(BarState),
}

/// Decides per bar whether to play the normal or the fill pattern
#[derive(Debug)]
pub struct BarFillCounter {
    maker: Arc<PatternMaker>,
    interval: FillInterval,
    count_in_bars: u32,
    helper_cue: bool,
    count_in: PatternString,
    state: CounterState,
    /// Last valid beat of the current run, stripped of bar-start flags
    last: Option<PatternDecision>,
    settings_tx: Sender<SettingsChange>,
    settings_rx: Receiver<SettingsChange>,
}

impl BarFillCounter {
    /// Create an idle counter drawing patterns from `maker`
    pub fn new(maker: Arc<PatternMaker>, settings: CounterSettings) -> Self {
        let (settings_tx, settings_rx) = unbounded();
        Self {
            maker,
            interval: settings.interval(),
            count_in_bars: settings.count_in_bars,
            helper_cue: settings.helper_cue,
            count_in: PatternString::count_in(),
            state: CounterState::Idle,
            last: None,
            settings_tx,
            settings_rx,
        }
    }

    /// Handle for queueing settings changes from another context
    pub fn settings_handle(&self) -> SettingsHandle {
        SettingsHandle::new(self.settings_tx.clone())
    }

    pub fn maker(&self) -> &Arc<PatternMaker> {
        &self.maker
    }

    pub fn phase(&self) -> CounterPhase {
        match self.state {
            CounterState::Idle => CounterPhase::Idle,
            CounterState::CountingIn { .. } => CounterPhase::CountingIn,
            CounterState::Running(_) => CounterPhase::Running,
        }
    }

    /// Index of the bar currently sounding, if one has started
    pub fn bar_index(&self) -> Option<u64> {
        match &self.state {
            CounterState::Running(state) => state.bar.as_ref().map(|bar| bar.index),
            _ => None,
        }
    }

    /// Fill spacing currently in effect
    pub fn fill_every_n_bars(&self) -> u32 {
        self.interval.every().get()
    }

    pub fn count_in_bars(&self) -> u32 {
        self.count_in_bars
    }

    pub fn helper_cue(&self) -> bool {
        self.helper_cue
    }

    /// Queue a new fill spacing. Takes effect at the next bar boundary while
    /// running, immediately otherwise. Zero is rejected and nothing changes.
    pub fn set_fill_every_n_bars(&mut self, bars: u32) -> FillbeatResult<()> {
        self.settings_handle().set_fill_every_n_bars(bars)?;
        if !matches!(self.state, CounterState::Running(_)) {
            self.apply_pending();
        }
        Ok(())
    }

    /// Begin playback: `Idle -> CountingIn`, or straight to `Running` without a count-in
    pub fn start(&mut self) {
        if !matches!(self.state, CounterState::Idle) {
            debug!("counter already started ({:?})", self.phase());
            return;
        }
        self.apply_pending();
        self.last = None;
        self.state = if self.count_in_bars > 0 {
            info!("counting in {} bar(s)", self.count_in_bars);
            CounterState::CountingIn {
                bars_left: self.count_in_bars,
                last_quarter: None,
            }
        } else {
            info!("counter running, fills every {} bars", self.interval.every());
            CounterState::Running(BarState::default())
        };
    }

    /// Stop playback; bar state is dropped
    pub fn stop(&mut self) {
        if !matches!(self.state, CounterState::Idle) {
            info!("counter stopped");
        }
        self.state = CounterState::Idle;
        self.last = None;
    }

    /// Feed one beat notification from the clock (position 1-4)
    pub fn on_quarter_note(&mut self, position: u8) -> PatternDecision {
        let position = match BeatPosition::new(position) {
            Ok(position) => position,
            Err(e) => {
                warn!("ignoring beat: {}", e);
                return self.fallback_decision();
            }
        };

        let (next, decision) = match std::mem::replace(&mut self.state, CounterState::Idle) {
            CounterState::Idle => {
                self.apply_pending();
                (CounterState::Idle, PatternDecision::Idle)
            }
            CounterState::CountingIn {
                bars_left,
                last_quarter,
            } => self.count_in_beat(bars_left, last_quarter, position),
            CounterState::Running(state) => self.running_beat(state, position),
        };

        self.state = next;
        if !matches!(decision, PatternDecision::Idle) {
            self.last = Some(decision.replayed());
        }
        decision
    }

    fn count_in_beat(
        &mut self,
        bars_left: u32,
        last_quarter: Option<BeatPosition>,
        position: BeatPosition,
    ) -> (CounterState, PatternDecision) {
        // Nothing is sounding from the generator yet
        self.apply_pending();

        let beats_remaining =
            (bars_left - 1) * BEATS_PER_BAR as u32 + (BEATS_PER_BAR - position.index() as u8) as u32;
        let decision = PatternDecision::CountIn {
            pattern: self.count_in.clone(),
            position,
            beats_remaining,
        };

        let terminal = position.is_last() && last_quarter != Some(position);
        let next = if terminal && bars_left <= 1 {
            info!("count-in done, fills every {} bars", self.interval.every());
            CounterState::Running(BarState::default())
        } else {
            CounterState::CountingIn {
                bars_left: if terminal { bars_left - 1 } else { bars_left },
                last_quarter: Some(position),
            }
        };
        (next, decision)
    }

    fn running_beat(
        &mut self,
        mut state: BarState,
        position: BeatPosition,
    ) -> (CounterState, PatternDecision) {
        let bar_start = position.is_downbeat() && state.last_quarter != Some(BeatPosition::ONE);
        state.last_quarter = Some(position);

        if bar_start {
            self.apply_pending();
            let index = state.bar.as_ref().map_or(0, |bar| bar.index + 1);
            let kind = self.interval.kind_for_bar(index);
            let pattern = match kind {
                BarKind::Fill => self.maker.fill_pattern(),
                BarKind::Normal => self.maker.normal_pattern(),
            };
            debug!("bar {} is {}: {}", index, kind, pattern);
            state.bar = Some(CurrentBar {
                index,
                kind,
                pattern,
            });
        }

        let decision = match &state.bar {
            Some(bar) => PatternDecision::Bar {
                pattern: bar.pattern.clone(),
                position,
                bar_index: bar.index,
                kind: bar.kind,
                bar_start,
                cue: bar_start && bar.kind == BarKind::Fill && self.helper_cue,
            },
            None => PatternDecision::Pickup {
                pattern: self.maker.normal_pattern(),
            },
        };
        (CounterState::Running(state), decision)
    }

    /// Degraded answer for a beat that could not be placed
    fn fallback_decision(&self) -> PatternDecision {
        if let Some(last) = &self.last {
            return last.clone();
        }
        match &self.state {
            CounterState::Idle => PatternDecision::Idle,
            CounterState::CountingIn { .. } => PatternDecision::Pickup {
                pattern: self.count_in.clone(),
            },
            CounterState::Running(_) => PatternDecision::Pickup {
                pattern: self.maker.normal_pattern(),
            },
        }
    }

    fn apply_pending(&mut self) {
        let changes: Vec<SettingsChange> = self.settings_rx.try_iter().collect();
        for change in changes {
            self.apply(change);
        }
    }

    fn apply(&mut self, change: SettingsChange) {
        debug!("applying {:?}", change);
        match change {
            SettingsChange::Pattern {
                note_division,
                fill_kind,
            } => self.maker.configure(note_division, fill_kind),
            SettingsChange::FillStart(fill_start) => self.maker.set_fill_start(fill_start),
            SettingsChange::Generator(config) => self.maker.configure_with(config),
            SettingsChange::FillEvery(every) => self.interval = FillInterval::new(every),
            SettingsChange::HelperCue(enabled) => self.helper_cue = enabled,
        }
    }
}
