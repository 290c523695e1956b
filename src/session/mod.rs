//! Game lifecycle: the controller that owns a game and its tick timer

pub mod controller;
pub mod timer;

pub use controller::{GameController, Hud, Phase};
pub use timer::TickTimer;
