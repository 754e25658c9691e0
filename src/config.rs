//! Validated render configuration and presets.
//!
//! A `RenderConfig` is the one explicit, serializable record describing a
//! full animation setup. Validation happens here, at construction time:
//! anything the kernels and controllers treat as an invariant (positive
//! iteration counts, non-degenerate bounds, sane zoom ratios) is rejected
//! before any render state exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::complex::Complex;
use crate::compositor::KickState;
use crate::engine::{AnimationContext, ConstantDrift};
use crate::gradients;
use crate::kernel::{FamilyParams, FractalParams};
use crate::palette::{ColorTable, PaletteMorphState};
use crate::viewport::{Viewport, ViewportController};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_iterations must be positive")]
    InvalidIterations,
    #[error("frame dimensions must be positive")]
    InvalidDimensions,
    #[error("target frame rate must be positive")]
    InvalidFrameRate,
    #[error("viewport bounds are degenerate")]
    DegenerateViewport,
    #[error("zoom factor must lie in (0, 2)")]
    InvalidZoomFactor,
    #[error("zoom duration must be positive")]
    InvalidZoomDuration,
    #[error("kick duration must be positive")]
    InvalidKickDuration,
    #[error("palette morph steps must be positive")]
    InvalidMorphSteps,
    #[error("gradient cycle must not be empty")]
    EmptyGradientCycle,
    #[error("unknown gradient `{0}`")]
    UnknownGradient(String),
}

/// Per-family configuration, one explicit record per fractal family.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum FamilyConfig {
    Mandelbrot,
    Julia {
        constant_re: f64,
        constant_im: f64,
        /// Per-zoom-tick drift applied to the constant.
        drift_re: f64,
        drift_im: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
    pub max_iterations: u32,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub zoom_factor: f64,
    pub zoom_position_x: f64,
    pub zoom_position_y: f64,
    pub zoom_duration: u32,
    pub rotation_degrees: f64,
    pub rotation_speed: f64,
    pub kick_max: u32,
    pub morph_steps: u32,
    pub gradient_cycle: Vec<String>,
    pub family: FamilyConfig,
}

impl RenderConfig {
    /// The classic animated Julia setup.
    pub fn julia() -> Self {
        Self {
            width: 960,
            height: 540,
            fps: 60,
            max_iterations: 500,
            x_min: -2.0,
            x_max: 2.0,
            y_min: -2.0,
            y_max: 2.0,
            zoom_factor: 0.985,
            zoom_position_x: 0.0,
            zoom_position_y: 0.0,
            zoom_duration: 600,
            rotation_degrees: 0.0,
            rotation_speed: 0.3,
            kick_max: 3,
            morph_steps: 100,
            gradient_cycle: gradients::builtin_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            family: FamilyConfig::Julia {
                constant_re: -0.8,
                constant_im: 0.156,
                drift_re: 0.00003,
                drift_im: -0.00001,
            },
        }
    }

    /// A slow dive toward Seahorse Valley.
    pub fn mandelbrot() -> Self {
        Self {
            width: 600,
            height: 600,
            fps: 60,
            max_iterations: 200,
            x_min: -2.0,
            x_max: 1.0,
            y_min: -1.5,
            y_max: 1.5,
            zoom_factor: 0.97,
            zoom_position_x: -0.7462,
            zoom_position_y: -0.1495,
            zoom_duration: 900,
            rotation_degrees: 0.0,
            rotation_speed: 0.0,
            kick_max: 3,
            morph_steps: 100,
            gradient_cycle: gradients::builtin_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            family: FamilyConfig::Mandelbrot,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.fps == 0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if self.x_max <= self.x_min || self.y_max <= self.y_min {
            return Err(ConfigError::DegenerateViewport);
        }
        if self.zoom_factor <= 0.0 || self.zoom_factor >= 2.0 {
            return Err(ConfigError::InvalidZoomFactor);
        }
        if self.zoom_duration == 0 {
            return Err(ConfigError::InvalidZoomDuration);
        }
        if self.kick_max == 0 {
            return Err(ConfigError::InvalidKickDuration);
        }
        if self.morph_steps == 0 {
            return Err(ConfigError::InvalidMorphSteps);
        }
        if self.gradient_cycle.is_empty() {
            return Err(ConfigError::EmptyGradientCycle);
        }
        for name in &self.gradient_cycle {
            if gradients::control_points(name).is_none() {
                return Err(ConfigError::UnknownGradient(name.clone()));
            }
        }
        Ok(())
    }

    /// Validate and build a ready animation context.
    pub fn build(&self) -> Result<AnimationContext, ConfigError> {
        self.validate()?;

        let tables: Vec<ColorTable> = self
            .gradient_cycle
            .iter()
            .map(|name| {
                let points = gradients::control_points(name)
                    .ok_or_else(|| ConfigError::UnknownGradient(name.clone()))?;
                Ok(ColorTable::from_control_points(
                    &points,
                    self.max_iterations as usize,
                ))
            })
            .collect::<Result<_, ConfigError>>()?;

        let viewport = ViewportController::new(
            Viewport::new(self.x_min, self.x_max, self.y_min, self.y_max),
            self.zoom_factor,
            (self.zoom_position_x, self.zoom_position_y),
            self.zoom_duration,
        );

        let (family, julia_motion) = match self.family {
            FamilyConfig::Mandelbrot => (FamilyParams::Mandelbrot, None),
            FamilyConfig::Julia {
                constant_re,
                constant_im,
                drift_re,
                drift_im,
            } => {
                let base = Complex::new(constant_re, constant_im);
                (
                    FamilyParams::Julia { constant: base },
                    Some(ConstantDrift {
                        base,
                        per_tick: Complex::new(drift_re, drift_im),
                    }),
                )
            }
        };

        let params = FractalParams {
            max_iterations: self.max_iterations,
            rotation_degrees: self.rotation_degrees,
            rotation_speed: self.rotation_speed,
            family,
        };

        Ok(AnimationContext::new(
            self.width,
            self.height,
            viewport,
            params,
            PaletteMorphState::new(tables, self.morph_steps),
            KickState::new(self.kick_max),
            julia_motion,
        ))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
