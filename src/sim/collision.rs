//! Collision tests for the ball against the walls, the paddle and the floor
//!
//! All tests are axis-aligned and use strict inequalities. Nothing here
//! mutates state; the tick decides what to do with a hit.

use super::state::{Ball, Bounds, Paddle};

/// Ball edge is past the left or right wall
#[inline]
pub fn hits_side_wall(ball: &Ball, bounds: Bounds) -> bool {
    ball.pos.x + ball.radius > bounds.width || ball.pos.x - ball.radius < 0.0
}

/// Ball edge is above the top wall
#[inline]
pub fn hits_ceiling(ball: &Ball) -> bool {
    ball.pos.y - ball.radius < 0.0
}

/// Ball bottom is below the paddle's top edge and its center is within the
/// paddle's horizontal span.
///
/// Only the center x is compared against the span, so a ball whose edge
/// overlaps the paddle corner but whose center is outside does not count.
/// The paddle's thickness is ignored: once past the top edge, the ball keeps
/// hitting on every frame it stays over the paddle.
#[inline]
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.y + ball.radius > paddle.pos.y
        && ball.pos.x > paddle.pos.x
        && ball.pos.x < paddle.right()
}

/// Ball bottom is past the bottom edge
#[inline]
pub fn hits_floor(ball: &Ball, bounds: Bounds) -> bool {
    ball.pos.y + ball.radius > bounds.height
}
