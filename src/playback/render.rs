//! Terminal rendering of pattern decisions
//!
//! Stands in for the click engine: instead of sounding the pattern it prints
//! the four beat boxes with the current beat lit, plus the bar's pattern.

use colored::*;
use fillbeat_core::types::BEATS_PER_BAR;
use fillbeat_core::{BarKind, BeatPosition, PatternDecision};

/// Consumer of the per-beat decisions
pub trait ClickSink {
    /// Called once per beat while playing
    fn on_decision(&mut self, decision: &PatternDecision);

    /// Called when playback stops
    fn on_stop(&mut self) {}
}

/// Prints decisions to stdout
#[derive(Debug, Default)]
pub struct TerminalSink {
    /// Print the pattern string on every beat, not just on bar starts
    pub verbose: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClickSink for TerminalSink {
    fn on_decision(&mut self, decision: &PatternDecision) {
        if let Some(line) = render_decision(decision, self.verbose) {
            println!("{}", line);
        }
    }

    fn on_stop(&mut self) {
        println!("{}", "■ stopped".bright_red());
    }
}

/// One box per beat, the current one lit
pub fn beat_boxes(current: BeatPosition) -> String {
    (1..=BEATS_PER_BAR)
        .map(|beat| {
            if beat == current.get() {
                "■".bright_red().bold().to_string()
            } else {
                "□".dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text for one decision, `None` when nothing should be shown
pub fn render_decision(decision: &PatternDecision, verbose: bool) -> Option<String> {
    match decision {
        PatternDecision::Idle => None,
        PatternDecision::CountIn {
            position,
            beats_remaining,
            ..
        } => Some(format!(
            "{}  {} {}",
            beat_boxes(*position),
            "Get ready!".bright_cyan(),
            beats_remaining.to_string().bright_white().bold()
        )),
        PatternDecision::Pickup { .. } => Some("·".dimmed().to_string()),
        PatternDecision::Bar {
            pattern,
            position,
            bar_index,
            kind,
            bar_start,
            cue,
        } => {
            let mut line = beat_boxes(*position);
            if *bar_start || verbose {
                let label = match kind {
                    BarKind::Fill => "FILL".bright_magenta().bold(),
                    BarKind::Normal => "bar".normal(),
                };
                line.push_str(&format!(
                    "  {} {:<4} {}",
                    label,
                    bar_index + 1,
                    pattern.render_colored(Some(*position))
                ));
            }
            if *cue {
                line.push_str(&format!("  {}", "◆ fill!".bright_yellow().bold()));
            }
            Some(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fillbeat_core::PatternString;

    fn plain(s: Option<String>) -> String {
        s.unwrap_or_default()
    }

    #[test]
    fn test_idle_renders_nothing() {
        assert_eq!(render_decision(&PatternDecision::Idle, true), None);
    }

    #[test]
    fn test_count_in_line() {
        colored::control::set_override(false);
        let line = render_decision(
            &PatternDecision::CountIn {
                pattern: PatternString::count_in(),
                position: BeatPosition::ONE,
                beats_remaining: 4,
            },
            false,
        );
        let line = plain(line);
        assert!(line.starts_with("■ □ □ □"));
        assert!(line.contains("Get ready! 4"));
    }

    #[test]
    fn test_fill_bar_line() {
        colored::control::set_override(false);
        let pattern: PatternString = "2222222222222222".parse().unwrap();
        let line = plain(render_decision(
            &PatternDecision::Bar {
                pattern,
                position: BeatPosition::ONE,
                bar_index: 4,
                kind: BarKind::Fill,
                bar_start: true,
                cue: true,
            },
            false,
        ));
        assert!(line.contains("FILL 5"));
        assert!(line.contains("2222 2222 2222 2222"));
        assert!(line.contains("fill!"));
    }

    #[test]
    fn test_mid_bar_line_is_short() {
        colored::control::set_override(false);
        let pattern: PatternString = "2000200020002000".parse().unwrap();
        let line = plain(render_decision(
            &PatternDecision::Bar {
                pattern,
                position: BeatPosition::new(3).unwrap(),
                bar_index: 1,
                kind: BarKind::Normal,
                bar_start: false,
                cue: false,
            },
            false,
        ));
        assert_eq!(line, "□ □ ■ □");
    }
}
