//! Pointer input mapping
//!
//! Mouse and touch events both reduce to a [`PointerSample`] in page
//! coordinates. [`move_paddle`] recenters the paddle under the sample's x.

use glam::Vec2;

use crate::sim::Paddle;

/// A pointer position in page (client) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Sample from a mouse event's client coordinates
    pub fn from_mouse(client_x: f64, client_y: f64) -> Self {
        Self::new(client_x as f32, client_y as f32)
    }

    /// Sample from the first of a touch event's contact points
    pub fn from_touches<I>(touches: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        touches
            .into_iter()
            .next()
            .map(|(x, y)| Self::from_mouse(x, y))
    }
}

/// The surface's bounding box in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    /// Convert a page-space sample to surface-local coordinates
    #[inline]
    pub fn to_local(&self, sample: PointerSample) -> Vec2 {
        Vec2::new(sample.x - self.left, sample.y - self.top)
    }
}

/// Center the paddle under the pointer, clamped to `[0, surface_width - width]`.
///
/// Only x changes. When the surface is narrower than the paddle the paddle
/// pins to 0.
pub fn move_paddle(
    paddle: &mut Paddle,
    rect: &SurfaceRect,
    sample: PointerSample,
    surface_width: f32,
) {
    let local = rect.to_local(sample);
    let x = local.x - paddle.width / 2.0;
    paddle.pos.x = x.min(surface_width - paddle.width).max(0.0);
}
