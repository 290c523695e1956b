use rand::Rng;
use std::io::Write;
use tracing::trace;

use crate::game::MOVE_CUE_PROBABILITY;

/// Moments in a game that can make a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    Eat,
    Move,
    GameOver,
}

/// Something that can play a cue
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell. Move cues are too frequent for a bell and are skipped.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if cue == Cue::Move {
            return;
        }

        let mut stderr = std::io::stderr();
        if let Err(err) = stderr.write_all(b"\x07").and_then(|_| stderr.flush()) {
            trace!(?err, ?cue, "failed to ring terminal bell");
        }
    }
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: Cue) {}
}

/// Gatekeeper between the game and a [`CueSink`], applying the mute switch
pub struct SoundBoard {
    sink: Box<dyn CueSink>,
    muted: bool,
}

impl SoundBoard {
    pub fn new(sink: Box<dyn CueSink>, muted: bool) -> Self {
        Self { sink, muted }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSink), true)
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute switch and return the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn on_start(&mut self) {
        self.emit(Cue::Start);
    }

    pub fn on_eat(&mut self) {
        self.emit(Cue::Eat);
    }

    pub fn on_game_over(&mut self) {
        self.emit(Cue::GameOver);
    }

    /// Plays the move cue on roughly [`MOVE_CUE_PROBABILITY`] of calls
    pub fn on_move<R: Rng>(&mut self, rng: &mut R) {
        if self.muted {
            return;
        }
        if rng.gen_bool(MOVE_CUE_PROBABILITY) {
            self.sink.play(Cue::Move);
        }
    }

    fn emit(&mut self, cue: Cue) {
        if !self.muted {
            self.sink.play(cue);
        }
    }
}
