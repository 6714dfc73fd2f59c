//! Paddle Bounce - A single-screen ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Entities and per-frame physics (reflection, paddle hits, floor)
//! - `game_loop`: Frame scheduling state machine
//! - `session`: Owns all game state, handles restart
//! - `renderer`: 2D surface abstraction plus canvas and WebGPU backends
//! - `platform`: Pointer/touch input mapping and browser glue
//! - `config`: Data-driven game constants
//! - `ui`: Score and game-over display

pub mod config;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod ui;

pub use config::{ConfigError, GameConfig};
pub use game_loop::{FrameHandle, FrameScheduler, GameLoop, LoopState, QueuedFrames};
pub use session::Session;

use sim::Bounds;

/// Game configuration constants
pub mod consts {
    /// Horizontal space left free around the surface
    pub const VIEWPORT_MARGIN: f32 = 40.0;
    /// Surface dimensions
    pub const MAX_SURFACE_WIDTH: f32 = 480.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Ball starts this far above the bottom edge
    pub const BALL_START_OFFSET: f32 = 50.0;
    /// Pixels per frame
    pub const BALL_START_DX: f32 = 2.0;
    pub const BALL_START_DY: f32 = -2.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Paddle top edge sits this far above the bottom edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 20.0;
    /// Reserved for keyboard control, input is absolute
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Colors
    pub const BALL_COLOR: &str = "#ff69b4";
    pub const PADDLE_COLOR: &str = "#333";
    pub const BACKGROUND_COLOR: &str = "#ffffff";
}

/// Surface size for a given viewport width.
///
/// Width is `viewport - margin` capped at `max_width`, never negative.
#[inline]
pub fn surface_size(viewport_width: f32, config: &GameConfig) -> Bounds {
    let width = (viewport_width - config.viewport_margin)
        .min(config.max_surface_width)
        .max(0.0);
    Bounds::new(width, config.surface_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_size_caps_width() {
        let config = GameConfig::default();
        assert_eq!(surface_size(1920.0, &config), Bounds::new(480.0, 400.0));
        assert_eq!(surface_size(360.0, &config), Bounds::new(320.0, 400.0));
    }

    #[test]
    fn test_surface_size_tiny_viewport() {
        let config = GameConfig::default();
        assert_eq!(surface_size(10.0, &config).width, 0.0);
    }
}
