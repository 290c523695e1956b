use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, error, info};

use super::timer::TickTimer;
use crate::audio::SoundBoard;
use crate::game::{Direction, GameConfig, GameEngine, GameState, SpeedPreset, StepResult};
use crate::storage::HighScoreStore;

/// Where a game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Board reset, waiting for `start`
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Everything the renderer shows besides the board itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub phase: Phase,
    pub high_score: u32,
    pub speed: SpeedPreset,
    pub muted: bool,
    /// The game that just ended beat the previous best
    pub new_high_score: bool,
}

/// Single owner of the game: board, lifecycle, tick timer and collaborators.
///
/// Every mutation goes through `&mut self`, so the event loop that owns the
/// controller is the only writer.
pub struct GameController<R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    phase: Phase,
    high_score: u32,
    new_high_score: bool,
    speed: SpeedPreset,
    timer: TickTimer,
    store: Box<dyn HighScoreStore>,
    sound: SoundBoard,
}

impl GameController<ThreadRng> {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>, sound: SoundBoard) -> Self {
        Self::with_engine(GameEngine::new(config), store, sound)
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_engine(
        mut engine: GameEngine<R>,
        store: Box<dyn HighScoreStore>,
        sound: SoundBoard,
    ) -> Self {
        let state = engine.reset();
        let speed = engine.config().speed;
        let high_score = store.load_high_score();

        Self {
            engine,
            state,
            phase: Phase::Idle,
            high_score,
            new_high_score: false,
            speed,
            timer: TickTimer::new(),
            store,
            sound,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn speed(&self) -> SpeedPreset {
        self.speed
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.phase,
            high_score: self.high_score,
            speed: self.speed,
            muted: self.sound.is_muted(),
            new_high_score: self.new_high_score,
        }
    }

    /// Idle -> Running. Returns false if the game was not idle.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }

        self.phase = Phase::Running;
        self.sound.on_start();
        self.state.snake.seed_direction();
        self.timer.start(self.speed.interval());
        info!(speed = self.speed.label(), high_score = self.high_score, "game started");
        true
    }

    /// Running <-> Paused; ignored in any other phase
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.timer.cancel();
                debug!(score = self.state.score, "game paused");
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.timer.start(self.speed.interval());
                debug!("game resumed");
            }
            Phase::Idle | Phase::GameOver => {}
        }
    }

    /// Back to a fresh idle board from any phase
    pub fn restart(&mut self) {
        self.timer.cancel();
        self.state = self.engine.reset();
        self.phase = Phase::Idle;
        self.new_high_score = false;
        debug!("game reset");
    }

    /// Switch tick interval; a running game picks it up immediately
    pub fn change_speed(&mut self, speed: SpeedPreset) {
        self.speed = speed;
        if self.phase == Phase::Running {
            self.timer.reschedule(speed.interval());
        }
        debug!(speed = speed.label(), "speed changed");
    }

    /// Buffer a heading for the next tick. Returns false when input is ignored.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.state.snake.steer(direction);
        true
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.sound.toggle_mute()
    }

    /// Run one update step. Does nothing unless the game is running.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.phase != Phase::Running {
            return None;
        }

        let result = self.engine.step(&mut self.state);

        if result.terminated {
            self.game_over();
        } else if result.info.ate_food {
            self.sound.on_eat();
        } else {
            self.sound.on_move(self.engine.rng_mut());
        }

        Some(result)
    }

    /// Wait for the timer; pends forever unless the game is running
    pub async fn next_tick(&mut self) {
        self.timer.tick().await;
    }

    fn game_over(&mut self) {
        self.timer.cancel();
        self.phase = Phase::GameOver;
        self.sound.on_game_over();

        let score = self.state.score;
        if score > self.high_score {
            self.high_score = score;
            self.new_high_score = true;
            if let Err(err) = self.store.save_high_score(score) {
                error!(error = %err, score, "failed to persist high score");
            }
        }

        info!(
            score,
            high_score = self.high_score,
            length = self.state.snake.len(),
            steps = self.state.steps,
            "game over"
        );
    }
}
