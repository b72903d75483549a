//! Attempt summaries for the presentation layer
//!
//! Derived from a finished engine, never fed back into it.

use std::fmt;

use serde::Serialize;

use crate::budget::{BudgetStatus, format_money};
use crate::sim::{Phase, SimulationEngine, miss_delta, one_degree_offset};

/// What the result panel shows after an attempt resolves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptReport {
    pub round: u32,
    pub hit: bool,
    pub angle_degrees: f64,
    pub path_length: f64,
    pub attempt_cost: f64,
    pub accumulated_cost: f64,
    pub cost_per_unit: f64,
    pub tries_remaining: u32,
    /// Offset from the target center, misses only
    pub miss_delta: Option<f64>,
    /// Error one degree of aim makes at the target depth
    pub one_degree_offset: f64,
    pub budget: f64,
    pub budget_status: BudgetStatus,
}

impl AttemptReport {
    /// Summarize the last attempt. `None` until an attempt has resolved.
    pub fn from_engine(engine: &SimulationEngine) -> Option<Self> {
        let phase = engine.phase();
        if !phase.is_finished() {
            return None;
        }

        let round = engine.round();
        let config = engine.config();
        let hit = phase == Phase::Hit;
        let delta = (!hit).then(|| miss_delta(round.origin, engine.angle(), round.target_center));

        Some(Self {
            round: engine.round_index(),
            hit,
            angle_degrees: engine.angle(),
            path_length: engine.path_length(),
            attempt_cost: engine.attempt_cost(),
            accumulated_cost: engine.accumulated_cost(),
            cost_per_unit: config.cost_per_unit,
            tries_remaining: engine.tries_remaining(),
            miss_delta: delta,
            one_degree_offset: one_degree_offset(round.target_depth()),
            budget: config.budget,
            budget_status: engine.budget_status(),
        })
    }

    /// No tries left and nothing hit
    pub fn round_lost(&self) -> bool {
        !self.hit && self.tries_remaining == 0
    }
}

impl fmt::Display for AttemptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hit {
            writeln!(f, "Result: HIT!")?;
        } else {
            writeln!(f, "Result: MISS")?;
            if self.tries_remaining > 0 {
                writeln!(f, "Tries left: {}", self.tries_remaining)?;
            } else {
                writeln!(f, "No tries left")?;
            }
        }
        if let Some(delta) = self.miss_delta {
            writeln!(f, "Δ miss: {delta:.2} m")?;
        }
        writeln!(f, "Angle: {:.1}°", self.angle_degrees)?;
        writeln!(f, "Path length: {:.2} m", self.path_length)?;
        writeln!(
            f,
            "This attempt: {} ({}/m)",
            format_money(self.attempt_cost),
            format_money(self.cost_per_unit)
        )?;
        writeln!(f, "Accumulated: {}", format_money(self.accumulated_cost))?;
        writeln!(f, "Budget: {}", format_money(self.budget))?;
        match self.budget_status {
            BudgetStatus::Under { remaining } => {
                write!(f, "Under budget: {}", format_money(remaining))
            }
            BudgetStatus::Over { overrun } => {
                writeln!(f, "Over budget: {}", format_money(overrun))?;
                write!(f, "Team is losing money!")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrillConfig;
    use crate::sim::RoundParameters;
    use glam::DVec2;

    fn engine() -> SimulationEngine {
        SimulationEngine::with_round(
            DrillConfig::default(),
            RoundParameters {
                origin: DVec2::new(500.0, 0.0),
                target_center: DVec2::new(500.0, -500.0),
                target_radius: 20.0,
            },
        )
    }

    fn finish(engine: &mut SimulationEngine) {
        engine.fire();
        while engine.tick(1.0 / 60.0).is_none() {}
    }

    #[test]
    fn test_no_report_while_unresolved() {
        let mut engine = engine();
        assert!(AttemptReport::from_engine(&engine).is_none());
        engine.fire();
        assert!(AttemptReport::from_engine(&engine).is_none());
    }

    #[test]
    fn test_hit_report() {
        let mut engine = engine();
        finish(&mut engine);
        let report = AttemptReport::from_engine(&engine).unwrap();
        assert!(report.hit);
        assert!(report.miss_delta.is_none());
        assert!((report.path_length - 480.0).abs() < 1e-6);
        assert!(!report.budget_status.is_over());
        assert!(!report.round_lost());

        let text = report.to_string();
        assert!(text.starts_with("Result: HIT!"));
        assert!(text.contains("This attempt: $144,000.00 ($300.00/m)"));
        assert!(text.contains("Under budget: $356,000.00"));
    }

    #[test]
    fn test_miss_report_and_budget_overrun() {
        let mut engine = engine();
        engine.rotate(-30.0);
        for _ in 0..3 {
            finish(&mut engine);
            engine.reattempt();
        }
        let report = AttemptReport::from_engine(&engine).unwrap();
        assert!(!report.hit);
        assert!(report.round_lost());
        assert!(report.miss_delta.is_some());
        assert!(report.budget_status.is_over());

        let text = report.to_string();
        assert!(text.contains("No tries left"));
        assert!(text.ends_with("Team is losing money!"));
    }
}
