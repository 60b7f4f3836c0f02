use fillbeat_core::{
    Accent, BarFillCounter, BarKind, CounterSettings, FillKind, FillbeatError, NoteDivision,
    PatternDecision, PatternMaker,
};
use std::sync::Arc;

fn counter_with(maker: Arc<PatternMaker>, fill_every: u32) -> BarFillCounter {
    let settings = CounterSettings::new(fill_every, 0, true).unwrap();
    BarFillCounter::new(maker, settings)
}

/// Bar indices classified as fills over `bars` bars of 1,2,3,4
fn fill_bars(counter: &mut BarFillCounter, bars: usize) -> Vec<u64> {
    let mut fills = Vec::new();
    for _ in 0..bars {
        for beat in 1..=4 {
            if let PatternDecision::Bar {
                bar_index,
                kind: BarKind::Fill,
                bar_start: true,
                ..
            } = counter.on_quarter_note(beat)
            {
                fills.push(bar_index);
            }
        }
    }
    fills
}

#[test]
fn normal_patterns_are_whole_beats_starting_strong() {
    let maker = PatternMaker::default();
    for division in NoteDivision::ALL {
        maker.configure(division, FillKind::NoFill);
        let normal = maker.normal_pattern();
        assert_eq!(normal.len() % 4, 0, "{}", division);
        assert_eq!(normal.slots()[0], Accent::Strong, "{}", division);
    }
}

#[test]
fn fill_never_changes_bar_length() {
    let maker = PatternMaker::default();
    for division in NoteDivision::ALL {
        for kind in FillKind::ALL {
            maker.configure(division, kind);
            assert_eq!(
                maker.fill_pattern().len(),
                maker.normal_pattern().len(),
                "{} / {}",
                division,
                kind
            );
        }
    }
}

#[test]
fn unchanged_configuration_reads_identically() {
    let maker = PatternMaker::default();
    maker.configure(NoteDivision::Sixteenth, FillKind::Accented);
    let normal = maker.normal_pattern();
    let fill = maker.fill_pattern();
    for _ in 0..10 {
        assert_eq!(maker.normal_pattern(), normal);
        assert_eq!(maker.fill_pattern(), fill);
    }
}

#[test]
fn quarter_notes_without_fill() {
    let maker = PatternMaker::default();
    maker.configure(NoteDivision::Quarter, FillKind::NoFill);

    use Accent::{Silent as O, Strong as S};
    let expected = vec![S, O, O, O, S, O, O, O, S, O, O, O, S, O, O, O];
    assert_eq!(maker.normal_pattern().slots(), expected.as_slice());
    assert_eq!(maker.fill_pattern().slots(), expected.as_slice());
}

#[test]
fn fills_every_fourth_bar_but_never_first() {
    let mut counter = counter_with(Arc::new(PatternMaker::default()), 4);
    counter.start();
    assert_eq!(fill_bars(&mut counter, 16), vec![4, 8, 12]);
}

#[test]
fn fill_every_bar_after_the_first() {
    let mut counter = counter_with(Arc::new(PatternMaker::default()), 1);
    counter.start();
    assert_eq!(fill_bars(&mut counter, 6), vec![1, 2, 3, 4, 5]);
}

#[test]
fn restart_resets_bar_count() {
    let mut counter = counter_with(Arc::new(PatternMaker::default()), 3);
    counter.start();
    fill_bars(&mut counter, 5);
    assert_eq!(counter.bar_index(), Some(4));

    counter.stop();
    counter.start();

    let first = counter.on_quarter_note(1);
    assert_eq!(first.bar_index(), Some(0));
    assert!(!first.is_fill());
    // 3 bars after the restart, not after the old session
    counter.on_quarter_note(2);
    counter.on_quarter_note(3);
    counter.on_quarter_note(4);
    assert_eq!(fill_bars(&mut counter, 4), vec![3]);
}

#[test]
fn fresh_counter_per_session_shares_generator() {
    let maker = Arc::new(PatternMaker::default());
    maker.configure(NoteDivision::Swing, FillKind::Accented);

    let mut first = counter_with(maker.clone(), 2);
    first.start();
    fill_bars(&mut first, 3);
    drop(first);

    let mut second = counter_with(maker.clone(), 2);
    second.start();
    let decision = second.on_quarter_note(1);
    assert_eq!(decision.bar_index(), Some(0));
    assert_eq!(decision.pattern(), Some(&maker.normal_pattern()));
}

#[test]
fn zero_fill_interval_is_rejected() {
    let mut counter = counter_with(Arc::new(PatternMaker::default()), 4);
    let err = counter.set_fill_every_n_bars(0).unwrap_err();
    assert!(matches!(err, FillbeatError::InvalidConfig(_)));
    assert_eq!(counter.fill_every_n_bars(), 4);

    assert!(CounterSettings::new(0, 0, false).is_err());
}
