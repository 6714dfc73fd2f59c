//! Game entities
//!
//! Plain data: the ball, the paddle, the score and the surface bounds. The
//! physics step and the input mapper mutate these; nothing here has behavior
//! beyond construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Size of the drawing surface in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Ball at its starting spot: centered horizontally, near the bottom
    pub fn spawn(config: &GameConfig, bounds: Bounds) -> Self {
        Self::new(
            Vec2::new(bounds.width / 2.0, bounds.height - config.ball_start_offset),
            config.ball_velocity,
            config.ball_radius,
        )
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Unused while input is absolute
    pub speed: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, width: f32, height: f32, speed: f32) -> Self {
        Self {
            pos,
            width,
            height,
            speed,
        }
    }

    /// Paddle centered horizontally at its fixed height above the bottom edge.
    ///
    /// Held inside `[0, width - paddle_width]` like pointer moves; on a surface
    /// narrower than the paddle it pins to 0.
    pub fn spawn(config: &GameConfig, bounds: Bounds) -> Self {
        let x = ((bounds.width - config.paddle_width) / 2.0)
            .min(bounds.width - config.paddle_width)
            .max(0.0);
        Self::new(
            Vec2::new(x, bounds.height - config.paddle_bottom_offset),
            config.paddle_width,
            config.paddle_height,
            config.paddle_speed,
        )
    }

    /// Right edge x
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }
}

/// Paddle hit counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

/// Everything the physics step and renderer touch during one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub bounds: Bounds,
    pub ball: Ball,
    pub paddle: Paddle,
    pub score: Score,
}

impl GameState {
    /// Fresh entities for a new session
    pub fn new(config: &GameConfig, bounds: Bounds) -> Self {
        Self {
            bounds,
            ball: Ball::spawn(config, bounds),
            paddle: Paddle::spawn(config, bounds),
            score: Score::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_positions() {
        let config = GameConfig::default();
        let state = GameState::new(&config, Bounds::new(480.0, 400.0));

        assert_eq!(state.ball.pos, Vec2::new(240.0, 350.0));
        assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));
        assert_eq!(state.ball.radius, 10.0);

        assert_eq!(state.paddle.pos, Vec2::new(200.0, 380.0));
        assert_eq!(state.paddle.width, 80.0);
        assert_eq!(state.paddle.height, 10.0);
        assert_eq!(state.paddle.speed, 8.0);
        assert_eq!(state.paddle.right(), 280.0);

        assert_eq!(state.score.value(), 0);
    }

    #[test]
    fn test_narrow_surface_paddle_starts_in_bounds() {
        let config = GameConfig::default();
        let bounds = crate::surface_size(100.0, &config);
        assert_eq!(bounds.width, 60.0);

        let state = GameState::new(&config, bounds);
        assert_eq!(state.paddle.pos, Vec2::new(0.0, 380.0));

        let empty = GameState::new(&config, crate::surface_size(10.0, &config));
        assert_eq!(empty.paddle.pos.x, 0.0);
    }

    #[test]
    fn test_score_increment() {
        let mut score = Score::default();
        score.increment();
        score.increment();
        assert_eq!(score.value(), 2);
    }
}
