//! Shape tessellation for the GPU backend
//!
//! [`ShapeBatch`] implements [`Surface2d`] by turning every fill into
//! triangles. Positions stay in surface pixels; the pipeline maps them to
//! clip space when it uploads the batch.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use super::{Color, Surface2d};

/// Segments used to approximate a circle
pub const CIRCLE_SEGMENTS: usize = 32;

/// One frame's worth of triangles
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    /// Surface size passed to the last `clear`
    size: Vec2,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Surface2d for ShapeBatch {
    fn clear(&mut self, width: f32, height: f32) {
        self.vertices.clear();
        self.size = Vec2::new(width, height);
    }

    /// Triangle fan around the center, emitted as a triangle list
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let rgba = color.to_rgba();
        self.vertices.reserve(CIRCLE_SEGMENTS * 3);

        for i in 0..CIRCLE_SEGMENTS {
            let a1 = (i as f32 / CIRCLE_SEGMENTS as f32) * TAU;
            let a2 = ((i + 1) as f32 / CIRCLE_SEGMENTS as f32) * TAU;

            let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
            let p2 = center + Vec2::new(a2.cos(), a2.sin()) * radius;

            self.vertices.push(Vertex::new(center.x, center.y, rgba));
            self.vertices.push(Vertex::new(p1.x, p1.y, rgba));
            self.vertices.push(Vertex::new(p2.x, p2.y, rgba));
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let rgba = color.to_rgba();
        let max = origin + size;

        // Two triangles
        self.vertices.push(Vertex::new(origin.x, origin.y, rgba));
        self.vertices.push(Vertex::new(max.x, origin.y, rgba));
        self.vertices.push(Vertex::new(max.x, max.y, rgba));

        self.vertices.push(Vertex::new(origin.x, origin.y, rgba));
        self.vertices.push(Vertex::new(max.x, max.y, rgba));
        self.vertices.push(Vertex::new(origin.x, max.y, rgba));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_batch() {
        let mut batch = ShapeBatch::new();
        batch.fill_rect(Vec2::ZERO, Vec2::ONE, Color::rgb(0, 0, 0));
        assert!(!batch.is_empty());

        batch.clear(480.0, 400.0);
        assert!(batch.is_empty());
        assert_eq!(batch.size(), Vec2::new(480.0, 400.0));
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut batch = ShapeBatch::new();
        let center = Vec2::new(100.0, 50.0);
        batch.fill_circle(center, 10.0, Color::rgb(255, 105, 180));

        assert_eq!(batch.vertices().len(), CIRCLE_SEGMENTS * 3);
        for v in batch.vertices() {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 10.0 + 1e-4);
            assert_eq!(v.color, Color::rgb(255, 105, 180).to_rgba());
        }
    }

    #[test]
    fn test_rect_corners() {
        let mut batch = ShapeBatch::new();
        batch.fill_rect(Vec2::new(200.0, 380.0), Vec2::new(80.0, 10.0), Color::rgb(0x33, 0x33, 0x33));

        let verts = batch.vertices();
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 200.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 280.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 380.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 390.0);
    }
}
