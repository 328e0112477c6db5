//! Session state machine
//!
//! Sequences Start → Playing → GameOver and back again as a plain loop of
//! transitions. The session owns the `GameState` only while a game is being
//! played; the game-over screen keeps the final score and the last world
//! snapshot, taken on the tick the player died.

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::sim::{Arena, GameEvent, GameState, Snapshot, TickInput, tick};

/// Public view of where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, waiting for the start trigger
    Start,
    /// Simulation running
    Playing,
    /// Run ended, waiting for restart or quit
    GameOver,
    /// Quit requested; no further ticks
    Terminated,
}

/// Everything the adapter can send in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Edge-triggered shot
    pub fire: bool,
    /// Leave the title screen
    pub start: bool,
    /// Restart button on the game-over screen
    pub restart: bool,
    /// Quit button or window close
    pub quit: bool,
}

impl SessionInput {
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            fire: self.fire,
        }
    }

    /// Take held directions from `newer`, accumulate its triggers until consumed
    pub fn latch(&mut self, newer: &SessionInput) {
        self.up = newer.up;
        self.down = newer.down;
        self.left = newer.left;
        self.right = newer.right;
        self.fire |= newer.fire;
        self.start |= newer.start;
        self.restart |= newer.restart;
        self.quit |= newer.quit;
    }

    /// Drop the one-shot triggers, keeping held directions
    pub fn clear_triggers(&mut self) {
        self.fire = false;
        self.start = false;
        self.restart = false;
    }
}

/// Lifecycle notifications raised by the session itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new game began (fresh entities, score 0)
    GameStarted { game: u32, seed: u64 },
    /// The session is shutting down
    Terminated,
}

/// Render feed: a read-only frame for the presentation adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub phase: Phase,
    /// World contents while playing, frozen at the fatal tick on game over
    pub game: Option<Snapshot>,
    /// Score of the most recent finished game
    pub final_score: Option<u64>,
    /// Best score seen this process run
    pub best_score: u64,
}

/// What happened during one session step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutput {
    pub game_events: Vec<GameEvent>,
    pub session_events: Vec<SessionEvent>,
}

#[derive(Debug, Clone)]
enum Stage {
    Start,
    Playing(Box<GameState>),
    GameOver { final_score: u64, last: Snapshot },
    Terminated,
}

/// Owns the lifecycle of consecutive games
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    arena: Arena,
    base_seed: u64,
    games_played: u32,
    best_score: u64,
}

impl Session {
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self {
            stage: Stage::Start,
            arena,
            base_seed: seed,
            games_played: 0,
            best_score: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Start => Phase::Start,
            Stage::Playing(_) => Phase::Playing,
            Stage::GameOver { .. } => Phase::GameOver,
            Stage::Terminated => Phase::Terminated,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.stage, Stage::Terminated)
    }

    /// The live game, if one is being played
    pub fn game(&self) -> Option<&GameState> {
        match &self.stage {
            Stage::Playing(state) => Some(&**state),
            _ => None,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// World view for rendering: live while playing, the fatal tick on game over
    pub fn snapshot(&self) -> Option<Snapshot> {
        match &self.stage {
            Stage::Playing(state) => Some(state.snapshot()),
            Stage::GameOver { last, .. } => Some(last.clone()),
            _ => None,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame {
            phase: self.phase(),
            game: self.snapshot(),
            final_score: match self.stage {
                Stage::GameOver { final_score, .. } => Some(final_score),
                _ => None,
            },
            best_score: self.best_score,
        }
    }

    /// Seed for the next game; distinct per game, reproducible per session
    fn next_seed(&self) -> u64 {
        self.base_seed
            .wrapping_add((self.games_played as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn begin_game(&mut self, out: &mut StepOutput) {
        let seed = self.next_seed();
        self.games_played += 1;
        self.stage = Stage::Playing(Box::new(GameState::new(seed, self.arena)));
        log::info!("Game {} started (seed {})", self.games_played, seed);
        out.session_events.push(SessionEvent::GameStarted {
            game: self.games_played,
            seed,
        });
    }

    /// Advance the session by one tick
    pub fn step(&mut self, input: &SessionInput) -> StepOutput {
        let mut out = StepOutput::default();

        if self.is_terminated() {
            return out;
        }
        if input.quit {
            log::info!("Quit requested during {:?}", self.phase());
            self.stage = Stage::Terminated;
            out.session_events.push(SessionEvent::Terminated);
            return out;
        }

        match &mut self.stage {
            Stage::Start => {
                if input.start {
                    self.begin_game(&mut out);
                }
            }
            Stage::Playing(state) => {
                tick(state, &input.tick_input(), SIM_DT);
                out.game_events = state.drain_events();
                if state.over {
                    let final_score = state.score;
                    let last = state.snapshot();
                    self.best_score = self.best_score.max(final_score);
                    self.stage = Stage::GameOver { final_score, last };
                    log::info!(
                        "Game {} over: score {}, best {}",
                        self.games_played,
                        final_score,
                        self.best_score
                    );
                }
            }
            Stage::GameOver { .. } => {
                if input.restart {
                    log::info!("Restart requested, back to title");
                    self.stage = Stage::Start;
                }
            }
            Stage::Terminated => {}
        }

        out
    }
}
