//! Per-frame physics step
//!
//! One call advances the ball by one frame of travel (velocity is in pixels
//! per frame, there is no delta time) and resolves collisions in a fixed
//! order: side walls, top wall, paddle, floor.

use serde::{Deserialize, Serialize};

use super::collision::{hits_ceiling, hits_floor, hits_paddle, hits_side_wall};
use super::state::{Ball, Bounds, GameState, Paddle, Score};

/// What happens to the ball's position when it reflects off a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReflectMode {
    /// Only the velocity flips. The ball may sit up to one frame of travel
    /// past the wall before it moves back.
    #[default]
    Pass,
    /// Velocity flips and the center is pulled back inside the wall
    Clamp,
}

/// Events produced by one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Reflected off a side wall or the top wall
    pub wall_bounce: bool,
    /// Reflected off the paddle (score went up by one)
    pub paddle_hit: bool,
    /// Ball crossed the bottom edge; the round is over
    pub game_over: bool,
}

/// Advance the ball one frame.
///
/// The paddle is only read. The score goes up by exactly one on a paddle hit;
/// nothing prevents consecutive frames from hitting again while the ball is
/// still over the paddle.
pub fn step(
    ball: &mut Ball,
    paddle: &Paddle,
    score: &mut Score,
    bounds: Bounds,
    mode: ReflectMode,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    ball.pos += ball.vel;

    if hits_side_wall(ball, bounds) {
        ball.vel.x = -ball.vel.x;
        outcome.wall_bounce = true;
        if mode == ReflectMode::Clamp {
            let max_x = (bounds.width - ball.radius).max(ball.radius);
            ball.pos.x = ball.pos.x.clamp(ball.radius, max_x);
        }
    }

    if hits_ceiling(ball) {
        ball.vel.y = -ball.vel.y;
        outcome.wall_bounce = true;
        if mode == ReflectMode::Clamp {
            ball.pos.y = ball.radius;
        }
    }

    if hits_paddle(ball, paddle) {
        ball.vel.y = -ball.vel.y;
        score.increment();
        outcome.paddle_hit = true;
        log::debug!("Paddle hit at x={:.1}, score {}", ball.pos.x, score.value());
    }

    if hits_floor(ball, bounds) {
        outcome.game_over = true;
    }

    outcome
}

impl GameState {
    /// Run [`step`] on this state's entities
    pub fn step(&mut self, mode: ReflectMode) -> StepOutcome {
        step(
            &mut self.ball,
            &self.paddle,
            &mut self.score,
            self.bounds,
            mode,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds::new(480.0, 400.0);

    fn state(ball: Ball, paddle: Paddle) -> GameState {
        GameState {
            bounds: BOUNDS,
            ball,
            paddle,
            score: Score::default(),
        }
    }

    #[test]
    fn test_first_step_no_paddle_contact() {
        let mut s = state(
            Ball::new(Vec2::new(100.0, 380.0), Vec2::new(2.0, -2.0), 10.0),
            Paddle::new(Vec2::new(60.0, 390.0), 80.0, 10.0, 8.0),
        );

        let outcome = s.step(ReflectMode::Pass);

        assert_eq!(s.ball.pos, Vec2::new(102.0, 378.0));
        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(s.score.value(), 0);
        assert_eq!(s.ball.vel, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_ball_returns_to_paddle_and_scores() {
        let mut s = state(
            Ball::new(Vec2::new(100.0, 380.0), Vec2::new(2.0, -2.0), 10.0),
            Paddle::new(Vec2::new(60.0, 390.0), 80.0, 10.0, 8.0),
        );

        let mut frames = 0;
        loop {
            // Keep the paddle centered under the ball, as a player would
            s.paddle.pos.x = (s.ball.pos.x - 40.0).clamp(0.0, BOUNDS.width - 80.0);
            let dy_before = s.ball.vel.y;
            let outcome = s.step(ReflectMode::Pass);
            frames += 1;
            assert!(!outcome.game_over, "ball fell through at frame {}", frames);

            if outcome.paddle_hit {
                assert!(dy_before > 0.0);
                assert!(s.ball.vel.y < 0.0);
                assert!(s.ball.pos.y + 10.0 > 390.0);
                break;
            }
            assert!(frames < 1000, "ball never came back");
        }

        assert_eq!(s.score.value(), 1);
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut s = state(
            Ball::new(Vec2::new(200.0, 11.0), Vec2::new(2.0, -2.0), 10.0),
            Paddle::new(Vec2::new(0.0, 380.0), 80.0, 10.0, 8.0),
        );
        let outcome = s.step(ReflectMode::Pass);
        assert!(outcome.wall_bounce);
        assert_eq!(s.ball.vel.y, 2.0);
        // Pass mode leaves the ball past the wall
        assert_eq!(s.ball.pos.y, 9.0);
    }

    #[test]
    fn test_clamp_mode_pulls_ball_inside() {
        let mut s = state(
            Ball::new(Vec2::new(469.0, 11.0), Vec2::new(2.0, -2.0), 10.0),
            Paddle::new(Vec2::new(0.0, 380.0), 80.0, 10.0, 8.0),
        );
        let outcome = s.step(ReflectMode::Clamp);
        assert!(outcome.wall_bounce);
        assert_eq!(s.ball.vel, Vec2::new(-2.0, 2.0));
        assert_eq!(s.ball.pos, Vec2::new(470.0, 10.0));
    }

    #[test]
    fn test_floor_ends_round() {
        let mut s = state(
            Ball::new(Vec2::new(240.0, 389.0), Vec2::new(2.0, 2.0), 10.0),
            Paddle::new(Vec2::new(0.0, 380.0), 80.0, 10.0, 8.0),
        );
        let outcome = s.step(ReflectMode::Pass);
        assert!(outcome.game_over);
        assert!(!outcome.paddle_hit);
        assert_eq!(s.score.value(), 0);
    }

    #[test]
    fn test_grazing_ball_scores_on_consecutive_frames() {
        // Known quirk: no cooldown, so a ball that stays over the paddle
        // keeps reflecting and scoring.
        let mut s = state(
            Ball::new(Vec2::new(140.0, 372.0), Vec2::new(0.0, 2.0), 10.0),
            Paddle::new(Vec2::new(100.0, 380.0), 80.0, 10.0, 8.0),
        );

        assert!(s.step(ReflectMode::Pass).paddle_hit);
        assert_eq!(s.ball.vel.y, -2.0);
        assert!(s.step(ReflectMode::Pass).paddle_hit);
        assert_eq!(s.ball.vel.y, 2.0);
        assert_eq!(s.score.value(), 2);
    }

    #[test]
    fn test_step_never_moves_paddle() {
        let paddle = Paddle::new(Vec2::new(100.0, 380.0), 80.0, 10.0, 8.0);
        let mut s = state(
            Ball::new(Vec2::new(140.0, 372.0), Vec2::new(3.0, 2.0), 10.0),
            paddle.clone(),
        );
        for _ in 0..50 {
            s.step(ReflectMode::Pass);
        }
        assert_eq!(s.paddle, paddle);
    }

    proptest! {
        #[test]
        fn prop_side_wall_flips_dx_at_most_once(
            x in -20.0f32..500.0,
            y in 50.0f32..300.0,
            dx in -6.0f32..6.0,
            dy in -6.0f32..6.0,
        ) {
            let mut s = state(
                Ball::new(Vec2::new(x, y), Vec2::new(dx, dy), 10.0),
                Paddle::new(Vec2::new(0.0, 380.0), 80.0, 10.0, 8.0),
            );
            let moved = Ball::new(Vec2::new(x + dx, y + dy), Vec2::new(dx, dy), 10.0);
            let crossing = hits_side_wall(&moved, BOUNDS);

            s.step(ReflectMode::Pass);

            if crossing {
                prop_assert_eq!(s.ball.vel.x, -dx);
            } else {
                prop_assert_eq!(s.ball.vel.x, dx);
            }
        }

        #[test]
        fn prop_score_never_decreases(
            x in 20.0f32..460.0,
            dx in -4.0f32..4.0,
            paddle_x in 0.0f32..400.0,
        ) {
            let mut s = state(
                Ball::new(Vec2::new(x, 350.0), Vec2::new(dx, 2.0), 10.0),
                Paddle::new(Vec2::new(paddle_x, 380.0), 80.0, 10.0, 8.0),
            );
            let mut last = s.score;
            for _ in 0..200 {
                let outcome = s.step(ReflectMode::Pass);
                prop_assert!(s.score >= last);
                prop_assert!(s.score.value() - last.value() <= 1);
                last = s.score;
                if outcome.game_over {
                    break;
                }
            }
        }
    }
}
