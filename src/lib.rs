//! Hailstorm - a bullet-dodging survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (systems, content registry, screen FSM)
//! - `engine`: Orchestration, snapshots, and the render seam
//! - `game_loop`: Fixed-timestep accumulator
//! - `input`: Key state sampling
//! - `persistence`: Best-score storage
//! - `config`: Tuning data and validation

pub mod config;
pub mod engine;
pub mod game_loop;
pub mod input;
pub mod persistence;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, GameSnapshot, Renderer};
pub use game_loop::FixedStepLoop;
pub use input::{InputSnapshot, InputState};
pub use persistence::ScoreStore;
