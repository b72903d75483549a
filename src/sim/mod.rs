//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through explicit `tick(dt)` calls
//! - Randomness only through an injected, seedable RNG
//! - No rendering or platform dependencies

pub mod engine;
pub mod geometry;
pub mod state;
pub mod tick;

pub use engine::{Command, SimulationEngine};
pub use geometry::{SegmentHit, miss_delta, one_degree_offset, segment_circle_intersection};
pub use state::{AimState, AttemptOutcome, DrillState, EngineSnapshot, Phase, RoundParameters};
pub use tick::advance;
