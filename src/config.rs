//! Game configuration
//!
//! Every tunable constant lives here so a page can override them with a JSON
//! blob. Missing fields fall back to the defaults in [`crate::consts`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::Palette;
use crate::sim::ReflectMode;

/// Which drawing backend the browser build uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderBackend {
    /// WebGPU when the browser exposes it, canvas 2D otherwise
    #[default]
    Gpu,
    /// Always use the canvas 2D context
    Canvas,
}

/// Errors produced while loading a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong type
    Parse(serde_json::Error),
    /// A value outside its allowed range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Invalid { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Surface ===
    /// Subtracted from the viewport width
    pub viewport_margin: f32,
    pub max_surface_width: f32,
    pub surface_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Distance of the start position above the bottom edge
    pub ball_start_offset: f32,
    /// Starting velocity in pixels per frame
    pub ball_velocity: Vec2,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance of the paddle's top edge above the bottom edge
    pub paddle_bottom_offset: f32,
    /// Carried on the paddle but not used by pointer input
    pub paddle_speed: f32,

    // === Physics ===
    pub reflect_mode: ReflectMode,

    // === Presentation ===
    pub palette: Palette,
    pub backend: RenderBackend,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_margin: VIEWPORT_MARGIN,
            max_surface_width: MAX_SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_start_offset: BALL_START_OFFSET,
            ball_velocity: Vec2::new(BALL_START_DX, BALL_START_DY),

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_speed: PADDLE_SPEED,

            reflect_mode: ReflectMode::default(),

            palette: Palette::default(),
            backend: RenderBackend::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Unknown fields are ignored, missing
    /// ones take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the ranges the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("ball_radius", self.ball_radius)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("surface_height", self.surface_height)?;
        positive("max_surface_width", self.max_surface_width)?;

        if !(self.viewport_margin >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "viewport_margin",
                reason: "must not be negative",
            });
        }
        finite("ball_start_offset", self.ball_start_offset)?;
        finite("paddle_bottom_offset", self.paddle_bottom_offset)?;
        finite("paddle_speed", self.paddle_speed)?;
        if !self.ball_velocity.is_finite() {
            return Err(ConfigError::Invalid {
                field: "ball_velocity",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Load the page-provided config (WASM only).
    ///
    /// Reads the JSON text of `<script id="game-config">`. Falls back to
    /// defaults when the element is missing or the config is rejected.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from #{}", Self::ELEMENT_ID);
                    return config;
                }
                Err(e) => log::warn!("Ignoring game config: {}", e),
            }
        }

        log::info!("Using default game config");
        Self::default()
    }

    /// Config element id
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "game-config";

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be a positive number",
        })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be finite",
        })
    }
}
