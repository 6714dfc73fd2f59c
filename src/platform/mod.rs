//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer and touch input (normalized to `PointerSample`)
//! - Frame scheduling via requestAnimationFrame (web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{PointerSample, SurfaceRect, move_paddle};
