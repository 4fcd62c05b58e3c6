//! Berry Snake - a terminal snake game with a speed ramp
//!
//! This library provides:
//! - Core game logic (game module): grid movement, collisions, scoring
//! - Renderer-agnostic scene production and a ratatui backend (render module)
//! - Keyboard input mapping (input module)
//! - Session metrics (metrics module)
//! - The interactive execution mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
