//! Simulation module
//!
//! Entities and the per-frame physics step. This module must stay free of
//! rendering and platform dependencies:
//! - One step per displayed frame, no delta time
//! - Paddle is only moved by input, never by physics
//! - Collisions are axis-aligned reflections only

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{hits_ceiling, hits_floor, hits_paddle, hits_side_wall};
pub use state::{Ball, Bounds, GameState, Paddle, Score};
pub use tick::{ReflectMode, StepOutcome, step};
