//! Per-tick simulation systems
//!
//! Free functions over `EngineState`, called by the engine in a fixed order
//! each tick. Systems never talk to each other directly; everything flows
//! through the state.

pub mod burst;
pub mod collision;
pub mod equipment;
pub mod item;
pub mod movement;
pub mod spawn;
pub mod ultimate;
