//! Core game logic module for Snake
//!
//! Everything in here is pure and host-agnostic: no I/O, no rendering, no
//! ambient engine state. The host passes in the frame delta, the sampled
//! input and the live viewport size, and gets state transitions back.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, InputSnapshot};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, UpdateResult};
pub use state::{CollisionType, GameState, PlayArea, Position, Snake, Viewport};
