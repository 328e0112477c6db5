//! Fixed-step runner
//!
//! Drives a `Session` against a presentation adapter: poll input, run as many
//! fixed ticks as the elapsed time allows, forward events and the frame, then
//! sleep. Restarting is just another transition of the session, so the loop
//! never recurses.

use std::time::{Duration, Instant};

use crate::audio::{AudioManager, SoundSink};
use crate::session::{Frame, Phase, Session, SessionEvent, SessionInput};
use crate::settings::Settings;
use crate::sim::{Autopilot, GameEvent, Snapshot};

/// Longest frame the accumulator will take in one go
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// Converts elapsed wall time into whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step: step.max(Duration::from_micros(1)),
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Add `elapsed` and return how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    pub fn leftover(&self) -> Duration {
        self.accumulator
    }
}

/// Where session input comes from (keyboard, network replay, autopilot...)
pub trait InputSource {
    fn poll(&mut self, session: &Session) -> SessionInput;
}

/// Receives everything the core produces for display
pub trait Presenter {
    fn present(&mut self, frame: &Frame);

    fn on_game_event(&mut self, _event: &GameEvent) {}

    fn on_session_event(&mut self, _event: &SessionEvent) {}
}

/// Plays the game by itself: starts, flies the autopilot, then restarts
/// until `games` runs are done or the frame budget is spent, and quits.
#[derive(Debug, Clone)]
pub struct AutopilotInput {
    pilot: Autopilot,
    games: u32,
    frame_budget: Option<u64>,
    frames: u64,
}

impl AutopilotInput {
    pub fn new(games: u32, frame_budget: Option<u64>) -> Self {
        Self {
            pilot: Autopilot::default(),
            games,
            frame_budget,
            frames: 0,
        }
    }
}

impl InputSource for AutopilotInput {
    fn poll(&mut self, session: &Session) -> SessionInput {
        self.frames += 1;
        if self.frame_budget.is_some_and(|budget| self.frames > budget) {
            return SessionInput {
                quit: true,
                ..Default::default()
            };
        }

        match session.phase() {
            Phase::Start => {
                self.pilot.reset();
                SessionInput {
                    start: true,
                    ..Default::default()
                }
            }
            Phase::Playing => match session.game() {
                Some(game) => {
                    let t = self.pilot.input(game);
                    SessionInput {
                        up: t.up,
                        down: t.down,
                        left: t.left,
                        right: t.right,
                        fire: t.fire,
                        ..Default::default()
                    }
                }
                None => SessionInput::default(),
            },
            Phase::GameOver => SessionInput {
                restart: session.games_played() < self.games,
                quit: session.games_played() >= self.games,
                ..Default::default()
            },
            Phase::Terminated => SessionInput::default(),
        }
    }
}

/// Presenter for headless runs: logs lifecycle and a periodic status line
#[derive(Debug)]
pub struct LogPresenter {
    frames: u64,
    status_every: u64,
}

impl LogPresenter {
    pub fn new(status_every: u64) -> Self {
        Self {
            frames: 0,
            status_every: status_every.max(1),
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        if self.frames % self.status_every != 0 {
            return;
        }
        if let Some(game) = &frame.game {
            log::info!(
                "t={} ({:.2}s) hp={} enemy_hp={} shots={} score={}",
                game.time_ticks,
                game.elapsed,
                game.player_health,
                game.enemy_health,
                game.projectiles.len(),
                game.score
            );
        }
    }

    fn on_game_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyKilled { score } => log::info!("Enemy destroyed, score {}", score),
            GameEvent::GameOver { final_score } => log::info!("GAME OVER, final score {}", final_score),
            other => log::debug!("{:?}", other),
        }
    }

    fn on_session_event(&mut self, event: &SessionEvent) {
        log::info!("{:?}", event);
    }
}

/// Owns the session and its collaborators for the lifetime of the program
pub struct Runner<I: InputSource, P: Presenter, S: SoundSink> {
    session: Session,
    input: I,
    presenter: P,
    audio: AudioManager<S>,
    clock: FixedStep,
    tick_interval: Duration,
    /// Input waiting for the next tick (triggers latched until consumed)
    pending: SessionInput,
    /// Last world view of the current or most recent game
    last_snapshot: Option<Snapshot>,
}

impl<I: InputSource, P: Presenter, S: SoundSink> Runner<I, P, S> {
    pub fn new(settings: &Settings, seed: u64, input: I, presenter: P, sink: S) -> Self {
        Self {
            session: Session::new(settings.arena, seed),
            input,
            presenter,
            audio: AudioManager::from_settings(sink, settings),
            clock: FixedStep::new(settings.tick_interval(), settings.max_substeps),
            tick_interval: settings.tick_interval(),
            pending: SessionInput::default(),
            last_snapshot: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Process one rendered frame covering `elapsed` wall time.
    /// Returns the number of ticks run.
    pub fn frame(&mut self, elapsed: Duration) -> u32 {
        let polled = self.input.poll(&self.session);
        self.pending.latch(&polled);

        let mut due = self.clock.advance(elapsed);
        // Quit is honoured even on a frame with no tick due
        if self.pending.quit {
            due = due.max(1);
        }

        let mut ran = 0;
        while ran < due && !self.session.is_terminated() {
            let out = self.session.step(&self.pending);
            ran += 1;

            for event in &out.game_events {
                self.audio.on_game_event(event);
                self.presenter.on_game_event(event);
            }
            for event in &out.session_events {
                self.audio.on_session_event(event);
                self.presenter.on_session_event(event);
            }

            if let Some(snapshot) = self.session.snapshot() {
                self.last_snapshot = Some(snapshot);
            }

            // One-shot inputs only apply to the first substep
            self.pending.clear_triggers();
        }

        self.presenter.present(&self.session.frame());
        ran
    }

    /// Real-time loop: run until the session terminates, sleeping a fixed
    /// interval between frames. Returns the final frame.
    pub fn run(&mut self) -> Frame {
        log::info!("Runner started (tick {:?})", self.tick_interval);
        let mut last = Instant::now();
        while !self.session.is_terminated() {
            let now = Instant::now();
            self.frame(now - last);
            last = now;
            std::thread::sleep(self.tick_interval);
        }
        log::info!(
            "Runner stopped after {} games, best score {}",
            self.session.games_played(),
            self.session.best_score()
        );
        self.session.frame()
    }
}
