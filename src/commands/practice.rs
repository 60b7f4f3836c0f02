//! Playback and pattern settings commands

use crate::commands::{CommandContext, CommandResult};
use crate::settings::{parse_count, parse_switch};
use colored::*;
use fillbeat_core::{CounterPhase, FillKind, FillStart, NoteDivision};

/// Handle `start`
pub fn cmd_start(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.start_playback();
    let settings = ctx.session.counter_settings();
    let intro = if settings.count_in_bars > 0 {
        format!("Counting in {} bar(s)...", settings.count_in_bars)
    } else {
        "Playing.".to_string()
    };
    CommandResult::Message(format!(
        "▶ {} Fill every {} bars at {:.1} BPM",
        intro,
        settings.fill_every,
        ctx.clock.get_bpm()
    ))
}

/// Handle `stop`
pub fn cmd_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !ctx.session.is_playing() {
        return CommandResult::Message("Not playing".dimmed().to_string());
    }
    ctx.stop_playback();
    CommandResult::Success
}

/// Handle `division [name]`
pub fn cmd_division(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Division: {} (one of {})",
            ctx.session.generator().note_division.to_string().cyan(),
            NoteDivision::ALL.map(|d| d.name()).join(", ")
        ));
    }
    let result = NoteDivision::from_name(args).and_then(|d| ctx.session.set_division(d));
    settings_result(result, ctx, || format!("Division set to {}", args.trim()))
}

/// Handle `fill [kind]`
pub fn cmd_fill(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Fill: {} (one of {})",
            ctx.session.generator().fill_kind.to_string().cyan(),
            FillKind::ALL.map(|k| k.name()).join(", ")
        ));
    }
    let result = FillKind::from_name(args).and_then(|k| ctx.session.set_fill_kind(k));
    settings_result(result, ctx, || format!("Fill set to {}", args.trim()))
}

/// Handle `fill-start [beat]`
pub fn cmd_fill_start(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Fills start on {}",
            ctx.session.generator().fill_start
        ));
    }
    let result = args
        .parse::<FillStart>()
        .and_then(|s| ctx.session.set_fill_start(s));
    settings_result(result, ctx, || format!("Fills start on beat {}", args.trim()))
}

/// Handle `every [bars]`
pub fn cmd_every(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Fill every {} bars",
            ctx.session.counter_settings().fill_every
        ));
    }
    let bars = match parse_count(args) {
        Ok(bars) => bars,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let result = ctx.session.set_fill_every(bars);
    settings_result(result, ctx, || format!("Fill every {} bars", bars))
}

/// Handle `countin [bars]`
pub fn cmd_count_in(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Count-in: {} bar(s)",
            ctx.session.counter_settings().count_in_bars
        ));
    }
    match parse_count(args) {
        Ok(bars) => {
            ctx.session.set_count_in(bars);
            CommandResult::Message(format!("Count-in set to {} bar(s) from the next start", bars))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `cue [on|off]`
pub fn cmd_cue(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let state = if ctx.session.counter_settings().helper_cue {
            "on"
        } else {
            "off"
        };
        return CommandResult::Message(format!("Helper cue is {}", state));
    }
    let enabled = match parse_switch(args) {
        Ok(enabled) => enabled,
        Err(e) => return CommandResult::Error(e.to_string()),
    };
    let result = ctx.session.set_helper_cue(enabled);
    settings_result(result, ctx, || {
        format!("Helper cue {}", if enabled { "on" } else { "off" })
    })
}

/// Handle `pattern` - show both bars for the current settings
pub fn cmd_pattern(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let (normal, fill) = ctx.session.preview();
    CommandResult::Message(format!(
        "{}  {}\n{}  {}",
        "normal".bold(),
        normal.render_colored(None),
        "fill  ".bold(),
        fill.render_colored(None)
    ))
}

/// Handle `status`
pub fn cmd_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let generator = ctx.session.generator();
    let counter = ctx.session.counter_settings();
    let phase = match ctx.session.phase() {
        CounterPhase::Idle => "stopped".to_string(),
        CounterPhase::CountingIn => "counting in".to_string(),
        CounterPhase::Running => match ctx.session.bar_index() {
            Some(bar) => format!("playing bar {}", bar + 1),
            None => "waiting for the downbeat".to_string(),
        },
    };
    CommandResult::Message(format!(
        "{} at {:.1} BPM\n  division {}, fill {} from {}, every {} bars, count-in {}, cue {}",
        phase.bright_cyan(),
        ctx.clock.get_bpm(),
        generator.note_division,
        generator.fill_kind,
        generator.fill_start,
        counter.fill_every,
        counter.count_in_bars,
        if counter.helper_cue { "on" } else { "off" }
    ))
}

fn settings_result<E: std::fmt::Display>(
    result: Result<(), E>,
    ctx: &CommandContext,
    message: impl FnOnce() -> String,
) -> CommandResult {
    match result {
        Ok(()) => {
            let mut text = message().bright_green().to_string();
            if ctx.session.is_playing() {
                text.push_str(&" (from the next bar)".dimmed().to_string());
            }
            CommandResult::Message(text)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
