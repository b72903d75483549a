//! Round tuning
//!
//! Fixed at process start and handed to the engine by value. Missing JSON
//! fields fall back to the reference defaults in [`crate::consts`].

use std::error::Error;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Aim limits in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleLimits {
    pub min: f64,
    pub max: f64,
    /// Angle of the very first round
    pub default: f64,
    /// Size of one rotate input
    pub step: f64,
}

impl Default for AngleLimits {
    fn default() -> Self {
        Self {
            min: ANGLE_MIN,
            max: ANGLE_MAX,
            default: ANGLE_DEFAULT,
            step: ANGLE_STEP,
        }
    }
}

impl AngleLimits {
    #[inline]
    pub fn clamp(&self, angle: f64) -> f64 {
        angle.clamp(self.min, self.max)
    }
}

/// Everything the engine needs to run a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub angle: AngleLimits,

    // === Scenario ranges (sampled every round) ===
    pub origin_x: Span,
    pub target_x: Span,
    /// Target depth range (negative = below surface)
    pub target_y: Span,
    pub target_radius: Span,

    // === Section bounds ===
    pub surface_y: f64,
    /// Attempt ends once the tip reaches this depth
    pub max_depth: f64,
    /// Attempt ends once the tip leaves this x range
    pub lateral: Span,

    // === Drill ===
    /// Advance speed in world units per second
    pub advance_speed: f64,
    pub cost_per_unit: f64,
    pub starting_tries: u32,
    /// Reporting only, never gates play
    pub budget: f64,
    pub handle_length: f64,
    /// Keep the player's last angle when a new round starts
    pub keep_angle_between_rounds: bool,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            angle: AngleLimits::default(),

            origin_x: Span::new(ORIGIN_X_MIN, ORIGIN_X_MAX),
            target_x: Span::new(TARGET_X_MIN, TARGET_X_MAX),
            target_y: Span::new(TARGET_Y_MIN, TARGET_Y_MAX),
            target_radius: Span::new(TARGET_RADIUS_MIN, TARGET_RADIUS_MAX),

            surface_y: SURFACE_Y,
            max_depth: MAX_DEPTH,
            lateral: Span::new(LATERAL_MIN, LATERAL_MAX),

            advance_speed: DRILL_SPEED,
            cost_per_unit: DRILL_COST_PER_METER,
            starting_tries: STARTING_TRIES,
            budget: DRILL_COST_BUDGET,
            handle_length: HANDLE_LENGTH,
            keep_angle_between_rounds: true,
        }
    }
}

impl DrillConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded drill config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let spans = [
            ("origin_x", self.origin_x),
            ("target_x", self.target_x),
            ("target_y", self.target_y),
            ("target_radius", self.target_radius),
            ("lateral", self.lateral),
            ("angle", Span::new(self.angle.min, self.angle.max)),
        ];
        for (name, span) in spans {
            if !span.is_valid() {
                return Err(ConfigError::InvalidSpan {
                    name,
                    min: span.min,
                    max: span.max,
                });
            }
        }

        let positives = [
            ("target_radius.min", self.target_radius.min),
            ("advance_speed", self.advance_speed),
            ("angle.step", self.angle.step),
        ];
        for (name, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        let non_negatives = [
            ("cost_per_unit", self.cost_per_unit),
            ("budget", self.budget),
            ("handle_length", self.handle_length),
        ];
        for (name, value) in non_negatives {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if !self.surface_y.is_finite() || !self.max_depth.is_finite() {
            return Err(ConfigError::NonFinite { name: "section bounds" });
        }
        if self.angle.min < ANGLE_MIN || self.angle.max > ANGLE_MAX {
            return Err(ConfigError::AngleAboveHorizon {
                min: self.angle.min,
                max: self.angle.max,
            });
        }
        if self.starting_tries == 0 {
            return Err(ConfigError::NoTries);
        }
        if !Span::new(self.angle.min, self.angle.max).contains(self.angle.default) {
            return Err(ConfigError::DefaultAngleOutOfRange {
                default: self.angle.default,
                min: self.angle.min,
                max: self.angle.max,
            });
        }

        Ok(())
    }
}

/// Why a config could not be used
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// `min > max` or a non-finite bound
    InvalidSpan { name: &'static str, min: f64, max: f64 },
    NotPositive { name: &'static str, value: f64 },
    Negative { name: &'static str, value: f64 },
    NonFinite { name: &'static str },
    NoTries,
    /// Angle limits outside [-180, 0] would let the drill point upward
    AngleAboveHorizon { min: f64, max: f64 },
    DefaultAngleOutOfRange { default: f64, min: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read config: {e}"),
            Self::Parse(e) => write!(f, "could not parse config: {e}"),
            Self::InvalidSpan { name, min, max } => {
                write!(f, "range '{name}' is invalid: [{min}, {max}]")
            }
            Self::NotPositive { name, value } => write!(f, "'{name}' must be > 0, got {value}"),
            Self::Negative { name, value } => write!(f, "'{name}' must be >= 0, got {value}"),
            Self::NonFinite { name } => write!(f, "{name} must be finite"),
            Self::NoTries => write!(f, "'starting_tries' must be at least 1"),
            Self::AngleAboveHorizon { min, max } => write!(
                f,
                "angle limits [{min}, {max}] must stay within [{ANGLE_MIN}, {ANGLE_MAX}]"
            ),
            Self::DefaultAngleOutOfRange { default, min, max } => {
                write!(f, "default angle {default} is outside [{min}, {max}]")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}
