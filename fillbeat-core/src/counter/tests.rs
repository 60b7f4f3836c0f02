//! Tests for the bar counter state machine.

use super::*;
use crate::error::FillbeatError;
use crate::types::{FillKind, FillStart, NoteDivision};

fn running_counter(fill_every: u32) -> BarFillCounter {
    let maker = Arc::new(PatternMaker::default());
    maker.configure(NoteDivision::Quarter, FillKind::Sixteenth);
    let settings = CounterSettings::new(fill_every, 0, true).unwrap();
    let mut counter = BarFillCounter::new(maker, settings);
    counter.start();
    counter
}

/// Feed whole bars and collect the kind of each bar
fn play_bars(counter: &mut BarFillCounter, bars: usize) -> Vec<BarKind> {
    let mut kinds = Vec::new();
    for _ in 0..bars {
        for beat in 1..=4 {
            if let PatternDecision::Bar {
                kind,
                bar_start: true,
                ..
            } = counter.on_quarter_note(beat)
            {
                kinds.push(kind);
            }
        }
    }
    kinds
}

#[test]
fn test_new_counter_is_idle() {
    let counter = BarFillCounter::new(Arc::new(PatternMaker::default()), CounterSettings::default());
    assert_eq!(counter.phase(), CounterPhase::Idle);
    assert_eq!(counter.bar_index(), None);
    assert_eq!(counter.fill_every_n_bars(), 4);
}

#[test]
fn test_idle_ignores_beats() {
    let mut counter =
        BarFillCounter::new(Arc::new(PatternMaker::default()), CounterSettings::default());
    assert_eq!(counter.on_quarter_note(1), PatternDecision::Idle);
    assert_eq!(counter.on_quarter_note(2), PatternDecision::Idle);
    assert_eq!(counter.phase(), CounterPhase::Idle);
}

#[test]
fn test_first_downbeat_is_bar_zero() {
    let mut counter = running_counter(4);
    let decision = counter.on_quarter_note(1);
    assert_eq!(decision.bar_index(), Some(0));
    assert!(!decision.is_fill());
    assert_eq!(counter.bar_index(), Some(0));
}

#[test]
fn test_pattern_cached_for_whole_bar() {
    let mut counter = running_counter(4);
    let first = counter.on_quarter_note(1);
    let pattern = first.pattern().cloned().unwrap();

    counter.maker().configure(NoteDivision::Sixteenth, FillKind::Accented);
    for beat in 2..=4 {
        let decision = counter.on_quarter_note(beat);
        assert_eq!(decision.pattern(), Some(&pattern));
        assert_eq!(decision.position().map(|p| p.get()), Some(beat));
    }

    // New configuration is heard from the next downbeat
    let next = counter.on_quarter_note(1);
    assert_eq!(next.pattern().unwrap().to_string(), "2111211121112111");
}

#[test]
fn test_repeated_downbeat_does_not_count() {
    let mut counter = running_counter(4);
    counter.on_quarter_note(1);
    let again = counter.on_quarter_note(1);
    assert_eq!(again.bar_index(), Some(0));
    assert!(matches!(again, PatternDecision::Bar { bar_start: false, .. }));
}

#[test]
fn test_pickup_before_first_downbeat() {
    let mut counter = running_counter(4);
    let decision = counter.on_quarter_note(3);
    assert!(matches!(decision, PatternDecision::Pickup { .. }));
    assert_eq!(counter.bar_index(), None);
    counter.on_quarter_note(4);
    assert_eq!(counter.on_quarter_note(1).bar_index(), Some(0));
}

#[test]
fn test_fill_every_four() {
    let mut counter = running_counter(4);
    let kinds = play_bars(&mut counter, 16);
    let fills: Vec<usize> = kinds
        .iter()
        .enumerate()
        .filter(|(_, kind)| **kind == BarKind::Fill)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(fills, vec![4, 8, 12]);
}

#[test]
fn test_fill_bar_uses_fill_pattern() {
    let mut counter = running_counter(2);
    play_bars(&mut counter, 2);
    let decision = counter.on_quarter_note(1);
    assert!(decision.is_fill());
    assert_eq!(decision.pattern().unwrap().to_string(), "2222222222222222");
}

#[test]
fn test_helper_cue_only_on_fill_downbeat() {
    let mut counter = running_counter(1);
    play_bars(&mut counter, 1);

    let downbeat = counter.on_quarter_note(1);
    assert!(matches!(downbeat, PatternDecision::Bar { cue: true, .. }));
    let second = counter.on_quarter_note(2);
    assert!(matches!(second, PatternDecision::Bar { cue: false, .. }));
}

#[test]
fn test_helper_cue_disabled() {
    let mut counter = running_counter(1);
    counter.settings_handle().set_helper_cue(false).unwrap();
    play_bars(&mut counter, 1);
    let downbeat = counter.on_quarter_note(1);
    assert!(downbeat.is_fill());
    assert!(matches!(downbeat, PatternDecision::Bar { cue: false, .. }));
}

#[test]
fn test_count_in_then_running() {
    let maker = Arc::new(PatternMaker::default());
    let mut counter = BarFillCounter::new(maker, CounterSettings::default());
    counter.start();
    assert_eq!(counter.phase(), CounterPhase::CountingIn);

    let remaining: Vec<u32> = (1..=4)
        .map(|beat| match counter.on_quarter_note(beat) {
            PatternDecision::CountIn {
                beats_remaining,
                pattern,
                ..
            } => {
                assert_eq!(pattern.to_string(), "1000100010001000");
                beats_remaining
            }
            other => panic!("expected count-in, got {}", other),
        })
        .collect();
    assert_eq!(remaining, vec![4, 3, 2, 1]);
    assert_eq!(counter.phase(), CounterPhase::Running);
    assert_eq!(counter.bar_index(), None);

    assert_eq!(counter.on_quarter_note(1).bar_index(), Some(0));
}

#[test]
fn test_two_bar_count_in() {
    let maker = Arc::new(PatternMaker::default());
    let settings = CounterSettings::new(4, 2, true).unwrap();
    let mut counter = BarFillCounter::new(maker, settings);
    counter.start();

    match counter.on_quarter_note(1) {
        PatternDecision::CountIn {
            beats_remaining, ..
        } => assert_eq!(beats_remaining, 8),
        other => panic!("expected count-in, got {}", other),
    }
    for beat in 2..=4 {
        counter.on_quarter_note(beat);
    }
    assert_eq!(counter.phase(), CounterPhase::CountingIn);
    for beat in 1..=4 {
        counter.on_quarter_note(beat);
    }
    assert_eq!(counter.phase(), CounterPhase::Running);
}

#[test]
fn test_stop_discards_bar_state() {
    let mut counter = running_counter(4);
    play_bars(&mut counter, 6);
    assert_eq!(counter.bar_index(), Some(5));

    counter.stop();
    assert_eq!(counter.phase(), CounterPhase::Idle);
    assert_eq!(counter.bar_index(), None);

    counter.start();
    let decision = counter.on_quarter_note(1);
    assert_eq!(decision.bar_index(), Some(0));
    assert!(!decision.is_fill());
}

#[test]
fn test_start_twice_is_noop() {
    let mut counter = running_counter(4);
    play_bars(&mut counter, 2);
    counter.start();
    assert_eq!(counter.bar_index(), Some(1));
}

#[test]
fn test_out_of_range_returns_last_decision() {
    let mut counter = running_counter(4);
    counter.on_quarter_note(1);
    let second = counter.on_quarter_note(2);

    assert_eq!(counter.on_quarter_note(0), second);
    assert_eq!(counter.on_quarter_note(9), second);
    assert_eq!(counter.bar_index(), Some(0));

    // Counting continues as if the glitch never happened
    counter.on_quarter_note(3);
    counter.on_quarter_note(4);
    assert_eq!(counter.on_quarter_note(1).bar_index(), Some(1));
}

#[test]
fn test_out_of_range_after_fill_downbeat_does_not_repeat_cue() {
    let mut counter = running_counter(1);
    play_bars(&mut counter, 1);
    let downbeat = counter.on_quarter_note(1);
    assert!(matches!(downbeat, PatternDecision::Bar { cue: true, .. }));

    match counter.on_quarter_note(0) {
        PatternDecision::Bar {
            bar_index,
            kind,
            bar_start,
            cue,
            pattern,
            ..
        } => {
            assert_eq!(bar_index, 1);
            assert_eq!(kind, BarKind::Fill);
            assert!(!bar_start);
            assert!(!cue);
            assert_eq!(Some(&pattern), downbeat.pattern());
        }
        other => panic!("expected bar, got {}", other),
    }

    let second = counter.on_quarter_note(2);
    assert_eq!(second.bar_index(), Some(1));
    assert!(matches!(second, PatternDecision::Bar { bar_start: false, cue: false, .. }));
}

#[test]
fn test_out_of_range_before_any_beat() {
    let mut counter = running_counter(4);
    match counter.on_quarter_note(7) {
        PatternDecision::Pickup { pattern } => {
            assert_eq!(pattern, counter.maker().normal_pattern())
        }
        other => panic!("expected pickup, got {}", other),
    }

    let mut idle =
        BarFillCounter::new(Arc::new(PatternMaker::default()), CounterSettings::default());
    assert_eq!(idle.on_quarter_note(7), PatternDecision::Idle);
}

#[test]
fn test_fill_every_zero_rejected() {
    let mut counter = running_counter(4);
    assert!(matches!(
        counter.set_fill_every_n_bars(0),
        Err(FillbeatError::InvalidConfig(_))
    ));
    assert_eq!(counter.fill_every_n_bars(), 4);
}

#[test]
fn test_fill_every_applies_at_bar_boundary() {
    let mut counter = running_counter(4);
    counter.on_quarter_note(1);
    counter.set_fill_every_n_bars(1).unwrap();
    assert_eq!(counter.fill_every_n_bars(), 4);

    counter.on_quarter_note(2);
    assert_eq!(counter.fill_every_n_bars(), 4);
    counter.on_quarter_note(3);
    counter.on_quarter_note(4);

    let next = counter.on_quarter_note(1);
    assert_eq!(counter.fill_every_n_bars(), 1);
    assert!(next.is_fill());
}

#[test]
fn test_fill_every_applies_immediately_when_idle() {
    let mut counter =
        BarFillCounter::new(Arc::new(PatternMaker::default()), CounterSettings::default());
    counter.set_fill_every_n_bars(2).unwrap();
    assert_eq!(counter.fill_every_n_bars(), 2);
}

#[test]
fn test_queued_pattern_change_waits_for_downbeat() {
    let mut counter = running_counter(4);
    let handle = counter.settings_handle();
    counter.on_quarter_note(1);

    handle.configure(NoteDivision::Eighth, FillKind::NoFill).unwrap();
    handle.set_fill_start(FillStart::Beat3).unwrap();
    counter.on_quarter_note(2);
    assert_eq!(counter.maker().config().note_division, NoteDivision::Quarter);

    counter.on_quarter_note(3);
    counter.on_quarter_note(4);
    let next = counter.on_quarter_note(1);
    assert_eq!(counter.maker().config().note_division, NoteDivision::Eighth);
    assert_eq!(counter.maker().config().fill_start, FillStart::Beat3);
    assert_eq!(next.pattern().unwrap().to_string(), "2010201020102010");
}

#[test]
fn test_handle_rejects_invalid_changes() {
    let counter = running_counter(4);
    let handle = counter.settings_handle();
    assert!(handle.set_fill_every_n_bars(0).is_err());
    assert!(handle.configure_named("quintuplet", "none").is_err());
    assert!(counter.settings_rx.is_empty());
}

#[test]
fn test_handle_reports_closed_counter() {
    let handle = running_counter(4).settings_handle();
    assert_eq!(
        handle.set_helper_cue(true),
        Err(FillbeatError::SettingsClosed)
    );
}
