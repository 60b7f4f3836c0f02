//! Interactive practice prompt
//!
//! Input is read on its own thread so the main loop can keep feeding clock
//! beats into the session while the user types.

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::playback::{BeatClock, PracticeSession, TerminalSink};
use crate::settings::PracticeSettings;
use anyhow::{anyhow, Result};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use std::thread;

/// Types of events the prompt loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

pub struct Repl {
    editor: Option<DefaultEditor>,
    registry: CommandRegistry,
    ctx: CommandContext,

    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
}

impl Repl {
    pub fn new(settings: &PracticeSettings) -> Result<Self> {
        let editor = DefaultEditor::new()?;
        let clock = Arc::new(BeatClock::new(settings.bpm));
        let session = PracticeSession::new(settings, Box::new(TerminalSink::new()));
        let (tx_input, rx_input) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            registry: create_registry(),
            ctx: CommandContext::new(session, clock),
            tx_input,
            rx_input,
        })
    }

    /// Run until the user quits or input closes
    pub fn run(&mut self) -> Result<()> {
        println!("{}", "fillbeat - fill practice metronome".bright_cyan().bold());
        println!(
            "Type '{}' to play, '{}' for commands, '{}' or {} to exit.\n",
            "start".bright_green(),
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow!("prompt is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "fillbeat>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let rx_input = self.rx_input.clone();
        let beats = self.ctx.beats.clone();
        loop {
            crossbeam_channel::select! {
                recv(rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if line.is_empty() {
                            continue;
                        }
                        if !self.handle_line(&line) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted)))
                    | Ok(ReplEvent::Input(Err(ReadlineError::Eof))) => {
                        self.ctx.stop_playback();
                        println!("{}", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                    }
                    Err(_) => break,
                },

                recv(beats) -> msg => match msg {
                    Ok(beat) => self.ctx.on_beat(&beat),
                    Err(_) => break,
                }
            }
        }

        Ok(())
    }

    /// Returns false when the prompt should exit
    fn handle_line(&mut self, line: &str) -> bool {
        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{}", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::NotACommand => {
                debug!("unrecognised input: {}", line);
                println!(
                    "{} unknown command '{}', try '{}'",
                    "?".yellow(),
                    line,
                    "help".bright_green()
                );
            }
        }
        true
    }
}

/// Convenience function to start the prompt
pub fn start(settings: &PracticeSettings) -> Result<()> {
    let mut repl =
        Repl::new(settings).map_err(|e| anyhow!("Failed to initialize prompt: {}", e))?;
    repl.run()
}
