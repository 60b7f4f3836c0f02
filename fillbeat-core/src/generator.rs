//! PatternMaker - turns a [`GeneratorConfig`] into bar patterns.
//!
//! Both layouts are built once per configuration and published together as an
//! immutable snapshot. Reconfiguring swaps the snapshot pointer, so a reader on
//! the beat callback always sees one complete configuration, old or new.
//!
//! There is no global instance. The playback session creates one generator
//! and hands an `Arc` of it to everything that needs patterns.

use crate::error::FillbeatResult;
use crate::types::pattern::{fill_bar, normal_bar};
use crate::types::{FillKind, FillStart, GeneratorConfig, NoteDivision, PatternString};
use arc_swap::ArcSwap;
use log::debug;
use std::sync::Arc;

/// One configuration and the two bars built from it
#[derive(Debug)]
struct Snapshot {
    config: GeneratorConfig,
    normal: PatternString,
    fill: PatternString,
}

impl Snapshot {
    fn build(config: GeneratorConfig) -> Self {
        Self {
            config,
            normal: normal_bar(config.note_division),
            fill: fill_bar(config.note_division, config.fill_kind, config.fill_start),
        }
    }
}

/// Shared generator of normal and fill bar patterns
#[derive(Debug)]
pub struct PatternMaker {
    current: ArcSwap<Snapshot>,
}

impl PatternMaker {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::build(config)),
        }
    }

    /// Replace division and fill kind, keeping the current fill start beat
    pub fn configure(&self, note_division: NoteDivision, fill_kind: FillKind) {
        self.update(|config| {
            GeneratorConfig::new(note_division, fill_kind).with_fill_start(config.fill_start)
        });
    }

    /// Move the fill start beat, keeping division and fill kind
    pub fn set_fill_start(&self, fill_start: FillStart) {
        self.update(|config| config.with_fill_start(fill_start));
    }

    /// Read-modify-write of the configuration. A concurrent replacement is
    /// never lost; `f` is re-run against it instead.
    fn update(&self, f: impl Fn(GeneratorConfig) -> GeneratorConfig) {
        self.current
            .rcu(|snapshot| Snapshot::build(f(snapshot.config)));
        let config = self.current.load().config;
        debug!(
            "pattern maker: {} / fill {} from {}",
            config.note_division, config.fill_kind, config.fill_start
        );
    }

    /// Replace the whole configuration
    pub fn configure_with(&self, config: GeneratorConfig) {
        debug!(
            "pattern maker: {} / fill {} from {}",
            config.note_division, config.fill_kind, config.fill_start
        );
        self.current.store(Arc::new(Snapshot::build(config)));
    }

    /// Configure from settings-UI names. On error the previous configuration stays.
    pub fn configure_named(&self, note_division: &str, fill_kind: &str) -> FillbeatResult<()> {
        let note_division = NoteDivision::from_name(note_division)?;
        let fill_kind = FillKind::from_name(fill_kind)?;
        self.configure(note_division, fill_kind);
        Ok(())
    }

    pub fn config(&self) -> GeneratorConfig {
        self.current.load().config
    }

    /// Pattern for a normal bar
    pub fn normal_pattern(&self) -> PatternString {
        self.current.load().normal.clone()
    }

    /// Pattern for a fill bar; same length as [`normal_pattern`](Self::normal_pattern)
    pub fn fill_pattern(&self) -> PatternString {
        self.current.load().fill.clone()
    }

    /// Both patterns from the same configuration
    pub fn patterns(&self) -> (PatternString, PatternString) {
        let snapshot = self.current.load();
        (snapshot.normal.clone(), snapshot.fill.clone())
    }
}

impl Default for PatternMaker {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}
