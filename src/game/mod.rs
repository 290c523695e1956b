//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The controller drives it tick by tick; tests drive it directly.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{
    FOOD_REWARD, GRID_COUNT, GameConfig, MAX_GRID_SIDE, MOVE_CUE_PROBABILITY, SpeedPreset,
};
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Position, Snake};
