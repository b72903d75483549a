//! Per-frame drill advancement
//!
//! One call per rendered frame. The orebody test runs on the step segment
//! before the tip is committed, so a step that would both touch the orebody
//! and cross the depth limit reports a hit.

use super::geometry::segment_circle_intersection;
use super::state::{AttemptOutcome, DrillState, Phase, RoundParameters};
use crate::config::DrillConfig;
use crate::direction_from_degrees;

/// Advance the drill tip by `dt` seconds along `angle_deg`.
///
/// Returns the outcome when this step resolves the attempt. Does nothing
/// unless the drill is advancing and `dt` is positive.
pub fn advance(
    drill: &mut DrillState,
    round: &RoundParameters,
    config: &DrillConfig,
    angle_deg: f64,
    dt: f64,
) -> Option<AttemptOutcome> {
    if drill.phase != Phase::Advancing {
        return None;
    }
    if !(dt.is_finite() && dt > 0.0) {
        return None;
    }

    let step = config.advance_speed * dt;
    if !(step > 0.0) {
        return None;
    }
    let next = drill.tip + direction_from_degrees(angle_deg) * step;

    if let Some(hit) =
        segment_circle_intersection(drill.tip, next, round.target_center, round.target_radius)
    {
        // Only the partial step up to contact is drilled
        drill.path_length += drill.tip.distance(hit.point);
        drill.tip = hit.point;
        drill.result_point = Some(hit.point);
        drill.phase = Phase::Hit;
        drill.settle_cost(config.cost_per_unit);
        return Some(AttemptOutcome::Hit { point: hit.point });
    }

    drill.path_length += drill.tip.distance(next);
    drill.tip = next;

    let out_of_section = drill.tip.y <= config.max_depth
        || drill.tip.y > config.surface_y
        || !config.lateral.contains(drill.tip.x);
    if out_of_section {
        drill.phase = Phase::Missed;
        drill.result_point = None;
        drill.settle_cost(config.cost_per_unit);
        drill.tries_remaining = drill.tries_remaining.saturating_sub(1);
        return Some(AttemptOutcome::Missed {
            tries_remaining: drill.tries_remaining,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    const FRAME: f64 = 1.0 / 60.0;

    fn round() -> RoundParameters {
        RoundParameters {
            origin: DVec2::new(500.0, 0.0),
            target_center: DVec2::new(500.0, -500.0),
            target_radius: 20.0,
        }
    }

    fn advancing(round: &RoundParameters) -> DrillState {
        let mut drill = DrillState::new(round.origin, 3);
        drill.begin_attempt(round.origin);
        drill
    }

    #[test]
    fn test_idle_when_not_advancing() {
        let round = round();
        let config = DrillConfig::default();
        let mut drill = DrillState::new(round.origin, 3);
        assert!(advance(&mut drill, &round, &config, -90.0, 0.1).is_none());
        assert_eq!(drill.tip, round.origin);
        assert_eq!(drill.phase, Phase::Aiming);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let round = round();
        let config = DrillConfig::default();
        let mut drill = advancing(&round);
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(advance(&mut drill, &round, &config, -90.0, dt).is_none());
        }
        assert_eq!(drill.tip, round.origin);
        assert_eq!(drill.path_length, 0.0);
    }

    #[test]
    fn test_partial_step_on_hit() {
        let round = round();
        let config = DrillConfig::default();
        let mut drill = advancing(&round);

        // One big step overshoots the whole circle and the depth limit
        let outcome = advance(&mut drill, &round, &config, -90.0, 2.0);
        assert!(matches!(outcome, Some(AttemptOutcome::Hit { .. })));
        assert_eq!(drill.phase, Phase::Hit);
        let point = drill.result_point.unwrap();
        assert!((point.y + 480.0).abs() < 1e-9);
        assert!((drill.path_length - 480.0).abs() < 1e-9);
        assert_eq!(drill.tries_remaining, 3);
        assert!((drill.attempt_cost - 480.0 * config.cost_per_unit).abs() < 1e-6);
    }

    #[test]
    fn test_depth_limit_misses() {
        let mut round = round();
        round.target_center.x = 800.0;
        let config = DrillConfig::default();
        let mut drill = advancing(&round);

        let outcome = advance(&mut drill, &round, &config, -90.0, 1.0);
        assert_eq!(outcome, Some(AttemptOutcome::Missed { tries_remaining: 2 }));
        assert_eq!(drill.phase, Phase::Missed);
        assert!(drill.result_point.is_none());
        assert!((drill.path_length - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_climbing_above_surface_misses() {
        // Only reachable with angle limits that were never validated
        let round = round();
        let config = DrillConfig::default();
        let mut drill = advancing(&round);

        let outcome = advance(&mut drill, &round, &config, 90.0, FRAME);
        assert_eq!(outcome, Some(AttemptOutcome::Missed { tries_remaining: 2 }));
        assert!(drill.tip.y > config.surface_y);
        assert!((drill.path_length - config.advance_speed * FRAME).abs() < 1e-9);
    }

    #[test]
    fn test_lateral_limit_misses_both_sides() {
        let round = round();
        let config = DrillConfig::default();

        for angle in [0.0, -180.0] {
            let mut drill = advancing(&round);
            let mut outcome = None;
            for _ in 0..1000 {
                outcome = advance(&mut drill, &round, &config, angle, 1.0 / 60.0);
                if outcome.is_some() {
                    break;
                }
            }
            assert_eq!(outcome, Some(AttemptOutcome::Missed { tries_remaining: 2 }));
            assert!(!config.lateral.contains(drill.tip.x));
        }
    }
}
