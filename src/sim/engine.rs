//! Round state machine
//!
//! `Aiming -> Advancing -> {Hit | Missed}`. A miss with tries left can go back
//! to `Aiming` through [`SimulationEngine::reattempt`]; `new_round` is always
//! legal. Commands issued in the wrong phase are ignored so the input layer
//! never has to check the phase first.

use glam::DVec2;
use rand::Rng;

use super::state::{
    AimState, AttemptOutcome, DrillState, EngineSnapshot, Phase, RoundParameters,
};
use super::tick::advance;
use crate::budget::BudgetStatus;
use crate::config::DrillConfig;
use crate::point_along;

/// Discrete commands from the input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Rotate by this many degrees (negative = toward -180)
    Rotate(f64),
    Fire,
    Reattempt,
    NewRound,
    /// Single drill key: fires while aiming, re-arms after a miss with
    /// tries left
    Primary,
}

/// Owns one round and the attempt in progress
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: DrillConfig,
    round: RoundParameters,
    aim: AimState,
    drill: DrillState,
    /// 1-based round counter
    round_index: u32,
}

impl SimulationEngine {
    /// Start the first round with a random scenario
    pub fn new<R: Rng + ?Sized>(config: DrillConfig, rng: &mut R) -> Self {
        let round = RoundParameters::sample(&config, rng);
        Self::with_round(config, round)
    }

    /// Start the first round with a fixed scenario
    pub fn with_round(config: DrillConfig, round: RoundParameters) -> Self {
        let aim = AimState {
            angle_degrees: config.angle.clamp(config.angle.default),
        };
        let drill = DrillState::new(round.origin, config.starting_tries);
        let engine = Self {
            config,
            round,
            aim,
            drill,
            round_index: 1,
        };
        engine.log_round_start();
        engine
    }

    /// Replace the scenario and reset the drill. Always legal.
    pub fn new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let round = RoundParameters::sample(&self.config, rng);
        self.replace_round(round);
    }

    /// Like [`Self::new_round`] with a fixed scenario
    pub fn replace_round(&mut self, round: RoundParameters) {
        let angle = if self.config.keep_angle_between_rounds {
            self.aim.angle_degrees
        } else {
            self.config.angle.default
        };
        self.aim = AimState {
            angle_degrees: self.config.angle.clamp(angle),
        };
        self.round = round;
        self.drill = DrillState::new(round.origin, self.config.starting_tries);
        self.round_index = self.round_index.saturating_add(1);
        self.log_round_start();
    }

    fn log_round_start(&self) {
        log::info!(
            "Round {}: collar x={:.1}, target ({:.1}, {:.1}) r={:.1}",
            self.round_index,
            self.round.origin.x,
            self.round.target_center.x,
            self.round.target_center.y,
            self.round.target_radius
        );
    }

    /// Rotate the drill while aiming. Returns whether the command applied.
    pub fn rotate(&mut self, delta_degrees: f64) -> bool {
        if self.drill.phase != Phase::Aiming || !delta_degrees.is_finite() {
            log::debug!("Ignoring rotate({delta_degrees}) in {}", self.drill.phase.as_str());
            return false;
        }
        self.aim.angle_degrees = self
            .config
            .angle
            .clamp(self.aim.angle_degrees + delta_degrees);
        true
    }

    /// One step toward -180 (left)
    pub fn rotate_left(&mut self) -> bool {
        self.rotate(-self.config.angle.step)
    }

    /// One step toward 0 (right)
    pub fn rotate_right(&mut self) -> bool {
        self.rotate(self.config.angle.step)
    }

    /// Start drilling from the collar
    pub fn fire(&mut self) -> bool {
        if self.drill.phase != Phase::Aiming {
            log::debug!("Ignoring fire in {}", self.drill.phase.as_str());
            return false;
        }
        self.drill.begin_attempt(self.round.origin);
        log::info!("Drilling at {:.1}°", self.aim.angle_degrees);
        true
    }

    /// Go back to aiming after a miss, keeping the angle and the target
    pub fn reattempt(&mut self) -> bool {
        if self.drill.phase != Phase::Missed || self.drill.tries_remaining == 0 {
            log::debug!(
                "Ignoring reattempt in {} with {} tries left",
                self.drill.phase.as_str(),
                self.drill.tries_remaining
            );
            return false;
        }
        self.drill.phase = Phase::Aiming;
        true
    }

    /// Advance the drill by `dt` seconds. Returns the outcome when this tick
    /// resolves the attempt.
    pub fn tick(&mut self, dt: f64) -> Option<AttemptOutcome> {
        let outcome = advance(
            &mut self.drill,
            &self.round,
            &self.config,
            self.aim.angle_degrees,
            dt,
        )?;

        match outcome {
            AttemptOutcome::Hit { point } => log::info!(
                "HIT at ({:.2}, {:.2}) after {:.2} m, cost ${:.2}",
                point.x,
                point.y,
                self.drill.path_length,
                self.drill.attempt_cost
            ),
            AttemptOutcome::Missed { tries_remaining } => log::info!(
                "MISS after {:.2} m, cost ${:.2}, {} tries left",
                self.drill.path_length,
                self.drill.attempt_cost,
                tries_remaining
            ),
        }
        Some(outcome)
    }

    /// Dispatch an input command. Returns whether it applied.
    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> bool {
        match command {
            Command::Rotate(delta) => self.rotate(delta),
            Command::Fire => self.fire(),
            Command::Reattempt => self.reattempt(),
            Command::NewRound => {
                self.new_round(rng);
                true
            }
            Command::Primary => match self.drill.phase {
                Phase::Aiming => self.fire(),
                Phase::Missed => self.reattempt(),
                Phase::Advancing | Phase::Hit => false,
            },
        }
    }

    // === Read-only accessors ===

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn round(&self) -> &RoundParameters {
        &self.round
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn drill(&self) -> &DrillState {
        &self.drill
    }

    pub fn phase(&self) -> Phase {
        self.drill.phase
    }

    pub fn angle(&self) -> f64 {
        self.aim.angle_degrees
    }

    pub fn tip(&self) -> DVec2 {
        self.drill.tip
    }

    pub fn path_length(&self) -> f64 {
        self.drill.path_length
    }

    pub fn attempt_cost(&self) -> f64 {
        self.drill.attempt_cost
    }

    pub fn accumulated_cost(&self) -> f64 {
        self.drill.accumulated_cost
    }

    pub fn tries_remaining(&self) -> u32 {
        self.drill.tries_remaining
    }

    pub fn result_point(&self) -> Option<DVec2> {
        self.drill.result_point
    }

    /// Far end of the short surface handle showing the current angle
    pub fn aim_handle(&self) -> DVec2 {
        point_along(
            self.round.origin,
            self.aim.angle_degrees,
            self.config.handle_length,
        )
    }

    /// Round spend against the configured budget
    pub fn budget_status(&self) -> BudgetStatus {
        BudgetStatus::new(self.config.budget, self.drill.accumulated_cost)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            round: self.round_index,
            phase: self.drill.phase,
            angle_degrees: self.aim.angle_degrees,
            origin: self.round.origin,
            aim_handle: self.aim_handle(),
            tip: self.drill.tip,
            path_length: self.drill.path_length,
            attempt_cost: self.drill.attempt_cost,
            accumulated_cost: self.drill.accumulated_cost,
            tries_remaining: self.drill.tries_remaining,
            target_center: self.round.target_center,
            target_radius: self.round.target_radius,
            result_point: self.drill.result_point,
        }
    }
}
