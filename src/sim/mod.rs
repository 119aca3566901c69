//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Entities allocated in id order, iterated in insertion order
//! - No rendering or platform dependencies

pub mod content;
pub mod difficulty;
pub mod rng;
pub mod screen;
pub mod state;
pub mod systems;

pub use difficulty::{DifficultyTier, pick_difficulty_tier};
pub use rng::GameRng;
pub use screen::{PauseTransition, ScreenState, toggle_pause_state};
pub use state::{
    Barrier, Bullet, BulletBehavior, EngineState, EquipmentState, EquipmentType, Item, ItemKind,
    Player, UltimateFx,
};
