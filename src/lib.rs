//! Guess the Angle - a single-round drilling game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ray geometry, round state machine)
//! - `config`: Round tuning loaded from JSON
//! - `budget`: Drilling spend against the round budget
//! - `report`: Read-only attempt summaries for the presentation layer

pub mod budget;
pub mod config;
pub mod report;
pub mod sim;

pub use budget::BudgetStatus;
pub use config::{AngleLimits, ConfigError, DrillConfig, Span};
pub use report::AttemptReport;
pub use sim::{Command, EngineSnapshot, Phase, SimulationEngine};

use glam::DVec2;

/// Game configuration defaults
pub mod consts {
    /// Frame timestep used by the native driver (60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;

    /// Surface level (world y). Depth is negative.
    pub const SURFACE_Y: f64 = 0.0;
    /// Drilling stops here if nothing was hit
    pub const MAX_DEPTH: f64 = -900.0;
    /// Horizontal limits of the section; leaving them ends the attempt
    pub const LATERAL_MIN: f64 = -100.0;
    pub const LATERAL_MAX: f64 = 1100.0;

    /// Drill collar (origin) x range
    pub const ORIGIN_X_MIN: f64 = 100.0;
    pub const ORIGIN_X_MAX: f64 = 900.0;

    /// Orebody placement
    pub const TARGET_X_MIN: f64 = 250.0;
    pub const TARGET_X_MAX: f64 = 900.0;
    pub const TARGET_Y_MIN: f64 = MAX_DEPTH;
    pub const TARGET_Y_MAX: f64 = -500.0;
    pub const TARGET_RADIUS_MIN: f64 = 5.0;
    pub const TARGET_RADIUS_MAX: f64 = 20.0;

    /// Angle limits (degrees). -90 = straight down, 0 = right, -180 = left
    pub const ANGLE_MIN: f64 = -180.0;
    pub const ANGLE_MAX: f64 = 0.0;
    pub const ANGLE_DEFAULT: f64 = -90.0;
    /// One rotate input
    pub const ANGLE_STEP: f64 = 1.0;

    /// Drill advance speed (m/s of animation, purely visual)
    pub const DRILL_SPEED: f64 = 900.0;
    /// Cost per meter drilled ($/m)
    pub const DRILL_COST_PER_METER: f64 = 300.0;
    /// Total drilling budget for a round ($)
    pub const DRILL_COST_BUDGET: f64 = 500_000.0;
    /// Attempts per round
    pub const STARTING_TRIES: u32 = 3;

    /// Length of the surface handle that shows the current angle
    pub const HANDLE_LENGTH: f64 = 20.0;
}

/// Unit direction for an angle in degrees (0 = +x, -90 = straight down)
#[inline]
pub fn direction_from_degrees(angle_deg: f64) -> DVec2 {
    let theta = angle_deg.to_radians();
    DVec2::new(theta.cos(), theta.sin())
}

/// Point at `distance` from `origin` along `angle_deg`
#[inline]
pub fn point_along(origin: DVec2, angle_deg: f64, distance: f64) -> DVec2 {
    origin + direction_from_degrees(angle_deg) * distance
}
