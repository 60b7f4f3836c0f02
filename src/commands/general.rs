//! General prompt commands (help, quit, tempo)

use crate::commands::{CommandContext, CommandResult};
use crate::settings::parse_bpm;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.stop_playback();
    CommandResult::Exit
}

/// Handle `tempo [bpm]` command
pub fn cmd_tempo(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current tempo: {:.1} BPM", ctx.clock.get_bpm()));
    }

    match parse_bpm(args) {
        Ok(bpm) => {
            ctx.clock.set_bpm(bpm);
            CommandResult::Message(
                format!("Tempo set to {:.1} BPM", bpm)
                    .bright_green()
                    .to_string(),
            )
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Print help information
fn print_help() {
    println!("{}", "fillbeat help".bold());
    println!("{}", "=============".bold());
    println!();
    println!("{}", "Playback:".green());
    println!("  {}              - Count in and start clicking", "start".cyan());
    println!("  {}               - Stop; the next start begins at bar 1", "stop".cyan());
    println!("  {}        - Show or set the tempo", "tempo [bpm]".cyan());
    println!();
    println!("{}", "Pattern:".green());
    println!(
        "  {}  - quarter, eighth, triplet, sixteenth, swing",
        "division [name]".cyan()
    );
    println!("  {}      - none, accented, sixteenth", "fill [kind]".cyan());
    println!("  {}  - Beat (1-4) where the fill takes over", "fill-start [n]".cyan());
    println!("  {}        - Play a fill every n bars", "every [n]".cyan());
    println!("  {}      - Bars of count-in (0 to skip)", "countin [n]".cyan());
    println!("  {}     - Helper cue at the start of each fill", "cue [on|off]".cyan());
    println!("  {}            - Show the normal and fill patterns", "pattern".cyan());
    println!("  {}             - Show session state", "status".cyan());
    println!();
    println!(
        "Changes made while playing are heard from the next bar. Pattern slots: {} strong, {} weak, {} silent.",
        "2".red(),
        "1".yellow(),
        "0".dimmed()
    );
    println!();
    println!("  {} / {}        - Leave", "quit".cyan(), "exit".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn test_tempo_show_and_set() {
        let mut ctx = context();
        assert_eq!(
            cmd_tempo("", &mut ctx),
            CommandResult::Message("Current tempo: 90.0 BPM".to_string())
        );
        assert!(matches!(cmd_tempo("132", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.clock.get_bpm(), 132.0);
    }

    #[test]
    fn test_tempo_rejects_bad_values() {
        let mut ctx = context();
        assert!(matches!(cmd_tempo("0", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_tempo("allegro", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.clock.get_bpm(), 90.0);
    }
}
