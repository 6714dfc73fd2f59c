//! Rendering module
//!
//! The game draws through [`Surface2d`], a minimal 2D context: clear the
//! whole surface, fill a circle, fill a rectangle. Backends:
//! - `shapes::ShapeBatch` tessellates into vertices for the WebGPU pipeline
//! - `canvas` forwards to the browser's canvas 2D context (WASM only)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use shapes::ShapeBatch;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BACKGROUND_COLOR, BALL_COLOR, PADDLE_COLOR};
use crate::sim::{Ball, Paddle};

/// Drawing surface the game renders into
pub trait Surface2d {
    /// Clear the full `width` x `height` surface
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Fill an axis-aligned rectangle given its top-left corner
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
}

/// 8-bit sRGB color, written as `#rgb` or `#rrggbb` in configs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Rejected color string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected #rgb or #rrggbb color, got {:?}", self.0)
    }
}

impl std::error::Error for InvalidColor {}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16);
        match hex.len() {
            // #rgb expands each digit: #f80 == #ff8800
            3 => {
                let r = channel(0, 1).map_err(|_| invalid())?;
                let g = channel(1, 1).map_err(|_| invalid())?;
                let b = channel(2, 1).map_err(|_| invalid())?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = channel(0, 2).map_err(|_| invalid())?;
                let g = channel(2, 2).map_err(|_| invalid())?;
                let b = channel(4, 2).map_err(|_| invalid())?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid()),
        }
    }

    /// CSS form, always `#rrggbb`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Normalized RGBA for the GPU, fully opaque
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_css()
    }
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub ball: Color,
    pub paddle: Color,
    /// Clear color for backends that cannot be transparent
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        // Constants are known-good
        let parse = |s| Color::parse(s).unwrap_or(Color::rgb(0, 0, 0));
        Self {
            ball: parse(BALL_COLOR),
            paddle: parse(PADDLE_COLOR),
            background: parse(BACKGROUND_COLOR),
        }
    }
}

pub fn draw_ball<S: Surface2d + ?Sized>(surface: &mut S, ball: &Ball, color: Color) {
    surface.fill_circle(ball.pos, ball.radius, color);
}

pub fn draw_paddle<S: Surface2d + ?Sized>(surface: &mut S, paddle: &Paddle, color: Color) {
    surface.fill_rect(paddle.pos, Vec2::new(paddle.width, paddle.height), color);
}
