//! Fire-and-forget sound cues
//!
//! The game never waits on audio and never reads anything back from it.

pub mod sound;

pub use sound::{Cue, CueSink, SilentSink, SoundBoard, TerminalBell};
