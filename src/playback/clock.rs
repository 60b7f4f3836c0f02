//! Beat clock for the practice session
//!
//! Runs in its own thread and broadcasts one [`QuarterNote`] per beat to every
//! subscriber at the current tempo. The clock knows nothing about bars or
//! fills; it only counts beats since the last reset.
//!
//! Every reset opens a new run. Beats carry the run they belong to, so a
//! subscriber can tell a late beat from before the reset apart from the
//! current run's beats.

use crossbeam_channel::{unbounded, Receiver, Sender};
use fillbeat_core::BeatPosition;
use log::{debug, trace};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Slowest tempo the clock accepts
pub const MIN_BPM: f32 = 20.0;
/// Fastest tempo the clock accepts
pub const MAX_BPM: f32 = 400.0;

/// A single beat notification
#[derive(Clone, Debug)]
pub struct QuarterNote {
    /// Run this beat belongs to, as returned by [`BeatClock::reset`]
    pub run: u64,
    /// Beats since the clock was last reset (0-indexed)
    pub beat_number: u64,
    /// Position of this beat within its 4/4 bar
    pub position: BeatPosition,
    /// When the beat was emitted
    pub timestamp: Instant,
}

/// Commands that can be sent to the clock thread
#[derive(Debug)]
enum ClockCommand {
    Start,
    Stop,
    Reset(u64),
    SetBpm(f32),
    AddSubscriber(Sender<QuarterNote>),
    Shutdown,
}

/// Quarter-note clock running in its own thread
pub struct BeatClock {
    /// BPM stored as bits for atomic operations
    bpm: Arc<AtomicU32>,
    running: Arc<AtomicBool>,
    /// Last run handed out by `reset`
    run: AtomicU64,
    command_tx: Sender<ClockCommand>,
    thread: Option<JoinHandle<()>>,
}

impl BeatClock {
    /// Create a stopped clock at the given tempo
    pub fn new(bpm: f32) -> Self {
        let bpm_atomic = Arc::new(AtomicU32::new(clamp_bpm(bpm).to_bits()));
        let running = Arc::new(AtomicBool::new(false));
        let (command_tx, command_rx) = crossbeam_channel::bounded(64);

        let bpm_clone = bpm_atomic.clone();
        let running_clone = running.clone();

        let thread = thread::spawn(move || {
            ClockThread::new(bpm_clone, running_clone, command_rx).run();
        });

        BeatClock {
            bpm: bpm_atomic,
            running,
            run: AtomicU64::new(0),
            command_tx,
            thread: Some(thread),
        }
    }

    /// New receiver for beat notifications
    pub fn subscribe(&self) -> Receiver<QuarterNote> {
        let (tx, rx) = unbounded();
        let _ = self.command_tx.send(ClockCommand::AddSubscriber(tx));
        rx
    }

    pub fn start(&self) {
        let _ = self.command_tx.send(ClockCommand::Start);
    }

    pub fn stop(&self) {
        let _ = self.command_tx.send(ClockCommand::Stop);
    }

    /// Reset the beat counter so the next beat is position 1.
    /// Returns the run every beat after the reset is stamped with.
    pub fn reset(&self) -> u64 {
        let run = self.run.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = self.command_tx.send(ClockCommand::Reset(run));
        run
    }

    /// Reset and start, so playback always opens on a downbeat
    pub fn restart(&self) -> u64 {
        let run = self.reset();
        self.start();
        run
    }

    /// Set the tempo, clamped to [`MIN_BPM`]..=[`MAX_BPM`]
    pub fn set_bpm(&self, bpm: f32) {
        let bpm = clamp_bpm(bpm);
        self.bpm.store(bpm.to_bits(), Ordering::Relaxed);
        let _ = self.command_tx.send(ClockCommand::SetBpm(bpm));
    }

    pub fn get_bpm(&self) -> f32 {
        f32::from_bits(self.bpm.load(Ordering::Relaxed))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Duration of a single beat in milliseconds at the current tempo
    pub fn beat_duration_ms(&self) -> u64 {
        (60000.0 / self.get_bpm()) as u64
    }
}

impl Drop for BeatClock {
    fn drop(&mut self) {
        let _ = self.command_tx.send(ClockCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn clamp_bpm(bpm: f32) -> f32 {
    if bpm.is_finite() {
        bpm.clamp(MIN_BPM, MAX_BPM)
    } else {
        MIN_BPM
    }
}

/// Internal clock thread that generates beats
struct ClockThread {
    bpm: Arc<AtomicU32>,
    running: Arc<AtomicBool>,
    command_rx: Receiver<ClockCommand>,
    subscribers: Vec<Sender<QuarterNote>>,
    run: u64,
    beat_number: u64,
}

impl ClockThread {
    fn new(bpm: Arc<AtomicU32>, running: Arc<AtomicBool>, command_rx: Receiver<ClockCommand>) -> Self {
        Self {
            bpm,
            running,
            command_rx,
            subscribers: Vec::new(),
            run: 0,
            beat_number: 0,
        }
    }

    fn beat_duration(&self) -> Duration {
        let bpm = f32::from_bits(self.bpm.load(Ordering::Relaxed));
        Duration::from_secs_f64(60.0 / bpm as f64)
    }

    fn run(&mut self) {
        let mut next_beat: Option<Instant> = None;

        loop {
            if self.running.load(Ordering::Relaxed) {
                // Non-blocking check for commands while running
                if let Ok(cmd) = self.command_rx.try_recv() {
                    if self.handle_command(cmd) {
                        break;
                    }
                }
                if !self.running.load(Ordering::Relaxed) {
                    next_beat = None;
                    continue;
                }

                let now = Instant::now();
                match next_beat {
                    None => {
                        // Just started, first beat goes out immediately
                        self.emit_beat();
                        next_beat = Some(now + self.beat_duration());
                    }
                    Some(target) if now >= target => {
                        self.emit_beat();
                        next_beat = Some(target + self.beat_duration());
                    }
                    Some(target) => {
                        // Sleep in small steps, spin for the last half millisecond
                        if target - now > Duration::from_micros(500) {
                            thread::sleep(Duration::from_micros(100));
                        } else {
                            std::hint::spin_loop();
                        }
                    }
                }
            } else {
                // Blocking wait for commands when stopped
                match self.command_rx.recv() {
                    Ok(cmd) => {
                        if self.handle_command(cmd) {
                            break;
                        }
                        next_beat = None;
                    }
                    Err(_) => break, // Channel closed
                }
            }
        }
    }

    /// Returns true when the thread should exit
    fn handle_command(&mut self, cmd: ClockCommand) -> bool {
        match cmd {
            ClockCommand::Start => {
                debug!("clock start at beat {}", self.beat_number);
                self.running.store(true, Ordering::Relaxed);
            }
            ClockCommand::Stop => {
                debug!("clock stop");
                self.running.store(false, Ordering::Relaxed);
            }
            ClockCommand::Reset(run) => {
                debug!("clock reset, run {}", run);
                self.run = run;
                self.beat_number = 0;
            }
            ClockCommand::SetBpm(bpm) => {
                // Stored atomically already; the next beat_duration() picks it up
                debug!("clock tempo {:.1} BPM", bpm);
            }
            ClockCommand::AddSubscriber(tx) => {
                self.subscribers.push(tx);
            }
            ClockCommand::Shutdown => {
                self.running.store(false, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    fn emit_beat(&mut self) {
        let beat = QuarterNote {
            run: self.run,
            beat_number: self.beat_number,
            position: BeatPosition::from_beat_number(self.beat_number),
            timestamp: Instant::now(),
        };
        trace!("beat {} (position {})", beat.beat_number, beat.position);
        // Broadcast to all subscribers, dropping disconnected ones
        self.subscribers.retain(|tx| tx.send(beat.clone()).is_ok());
        self.beat_number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = BeatClock::new(120.0);
        assert_eq!(clock.get_bpm(), 120.0);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_bpm_change_and_clamp() {
        let clock = BeatClock::new(120.0);
        clock.set_bpm(90.0);
        assert_eq!(clock.get_bpm(), 90.0);

        clock.set_bpm(1000.0);
        assert_eq!(clock.get_bpm(), MAX_BPM);
        clock.set_bpm(f32::NAN);
        assert_eq!(clock.get_bpm(), MIN_BPM);
    }

    #[test]
    fn test_beat_duration() {
        let clock = BeatClock::new(120.0);
        // At 120 BPM, one beat = 500ms
        assert_eq!(clock.beat_duration_ms(), 500);

        clock.set_bpm(60.0);
        assert_eq!(clock.beat_duration_ms(), 1000);
    }

    #[test]
    fn test_each_reset_opens_a_new_run() {
        let clock = BeatClock::new(120.0);
        let first = clock.reset();
        let second = clock.restart();
        assert!(second > first);
        clock.stop();
    }

    #[test]
    fn test_beats_start_on_downbeat() {
        let clock = BeatClock::new(400.0);
        let beats = clock.subscribe();
        let run = clock.restart();

        let received: Vec<QuarterNote> = (0..5)
            .map(|_| beats.recv_timeout(Duration::from_secs(2)).unwrap())
            .collect();
        let positions: Vec<u8> = received.iter().map(|b| b.position.get()).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 1]);
        assert!(received.iter().all(|b| b.run == run));
        clock.stop();
    }

    #[test]
    fn test_clock_start_stop() {
        let clock = BeatClock::new(120.0);

        assert!(!clock.is_running());
        clock.start();
        thread::sleep(Duration::from_millis(50));
        assert!(clock.is_running());

        clock.stop();
        thread::sleep(Duration::from_millis(50));
        assert!(!clock.is_running());
    }
}
