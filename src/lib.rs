//! Grid Snake - a terminal snake game on a fixed grid
//!
//! This library provides:
//! - Core game logic: grid, snake, food placement, the update step (game module)
//! - The game lifecycle and its cancellable tick timer (session module)
//! - Terminal rendering, key mapping and sound cues (render, input, audio modules)
//! - Best-score persistence (storage module)
//! - The interactive terminal loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod session;
pub mod storage;
