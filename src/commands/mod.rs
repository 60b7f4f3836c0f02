//! Command registry for the practice prompt
//!
//! Each command is a plain function registered under a prefix; the longest
//! matching prefix wins.

pub mod general;
pub mod practice;

use crate::playback::{BeatClock, PracticeSession, QuarterNote};
use crossbeam_channel::Receiver;
use log::debug;
use std::sync::Arc;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the prompt
    Exit,
    /// Input did not match any command
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: PracticeSession,
    pub clock: Arc<BeatClock>,
    /// Beat notifications from `clock`
    pub beats: Receiver<QuarterNote>,
    /// Clock run the session is listening to
    run: Option<u64>,
}

impl CommandContext {
    pub fn new(session: PracticeSession, clock: Arc<BeatClock>) -> Self {
        let beats = clock.subscribe();
        Self {
            session,
            clock,
            beats,
            run: None,
        }
    }

    /// Start the clock and a fresh session on a downbeat
    pub fn start_playback(&mut self) {
        self.clock.stop();
        for _ in self.beats.try_iter() {}
        self.session.start();
        self.run = Some(self.clock.restart());
    }

    pub fn stop_playback(&mut self) {
        self.clock.stop();
        self.run = None;
        self.session.stop();
    }

    /// Feed one clock beat into the session. Beats from an earlier run of
    /// the clock are dropped.
    pub fn on_beat(&mut self, beat: &QuarterNote) {
        if self.run != Some(beat.run) {
            debug!("dropping beat {} from clock run {}", beat.beat_number, beat.run);
            return;
        }
        self.session.handle_beat(beat.position.get());
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Playback
    registry.register("start", practice::cmd_start);
    registry.register("stop", practice::cmd_stop);

    // Pattern settings
    registry.register("division", practice::cmd_division);
    registry.register("fill", practice::cmd_fill);
    registry.register("fill-start", practice::cmd_fill_start);
    registry.register("every", practice::cmd_every);
    registry.register("countin", practice::cmd_count_in);
    registry.register("cue", practice::cmd_cue);
    registry.register("pattern", practice::cmd_pattern);
    registry.register("status", practice::cmd_status);

    // General commands
    registry.register("tempo", general::cmd_tempo);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::playback::ClickSink;
    use crate::settings::PracticeSettings;
    use fillbeat_core::PatternDecision;

    struct Silent;

    impl ClickSink for Silent {
        fn on_decision(&mut self, _decision: &PatternDecision) {}
    }

    /// Context with a silent sink and a stopped clock
    pub fn context() -> CommandContext {
        let settings = PracticeSettings::default();
        let session = PracticeSession::new(&settings, Box::new(Silent));
        CommandContext::new(session, Arc::new(BeatClock::new(settings.bpm)))
    }
}
