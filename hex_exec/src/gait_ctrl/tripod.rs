//! Tripod gait foot target law

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use super::{Params, TripodGroup};
use crate::vector::Vector3;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The role of a leg during one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LegPhase {
    /// Foot lifted and moving with the body.
    Swing,
    /// Foot on the ground and pushing against the body's motion.
    Stance,
    /// Gait stopped, the leg holds its last command.
    Hold,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Height of a swinging foot above the ground for the given body travel.
///
/// Peaks at the middle of the stride and falls off linearly towards the travel bounds.
///
/// Units: meters
pub fn lift_height(params: &Params, body_travel_m: f64) -> f64 {
    (params.swing_lift_apex_m - body_travel_m.abs()) / params.swing_lift_divisor
}

/// Phase of a leg given the walking direction along the travel axis.
///
/// While travelling in the negative direction tripod A swings, in the positive direction
/// tripod B swings.
pub fn leg_phase(direction_negative: bool, group: TripodGroup) -> LegPhase {
    match (direction_negative, group) {
        (true, TripodGroup::A) | (false, TripodGroup::B) => LegPhase::Swing,
        (true, TripodGroup::B) | (false, TripodGroup::A) => LegPhase::Stance,
    }
}

/// Foot target relative to the neutral stance for one leg.
///
/// Tripod A follows the body displacement and tripod B mirrors it, both rotated into the leg's
/// mounting frame. Swinging feet are raised by `lift_m` along the vertical axis.
pub fn leg_target(
    params: &Params,
    body_pos_m: Vector3,
    mount_angle_rad: f64,
    group: TripodGroup,
    phase: LegPhase,
    lift_m: f64,
) -> Vector3 {
    let body = match group {
        TripodGroup::A => body_pos_m,
        TripodGroup::B => -body_pos_m,
    };

    let mut target = body.rotated(mount_angle_rad, params.vertical_axis) + params.mount_offset_m;

    if phase == LegPhase::Swing {
        let mut lift = [0.0; 3];
        lift[params.vertical_axis.index()] = lift_m;
        target = target + Vector3::from(lift);
    }

    target
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_lift_height() {
        let params = Params::default();

        assert_abs_diff_eq!(lift_height(&params, 0.0), 0.2);
        assert_abs_diff_eq!(lift_height(&params, -0.3), 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(lift_height(&params, 0.3), 0.08, epsilon = 1e-12);
        assert_abs_diff_eq!(lift_height(&params, 0.5), 0.0);
    }

    #[test]
    fn test_phase_truth_table() {
        assert_eq!(leg_phase(true, TripodGroup::A), LegPhase::Swing);
        assert_eq!(leg_phase(true, TripodGroup::B), LegPhase::Stance);
        assert_eq!(leg_phase(false, TripodGroup::A), LegPhase::Stance);
        assert_eq!(leg_phase(false, TripodGroup::B), LegPhase::Swing);
    }

    #[test]
    fn test_leg_targets() {
        let params = Params::default();
        let body = Vector3::new(0.0, 0.0, -0.3);

        // Swinging tripod A leg with no mount rotation
        let t = leg_target(&params, body, 0.0, TripodGroup::A, LegPhase::Swing, 0.08);
        assert!(t.is_close(&Vector3::new(0.1, 0.08, -0.3), 1e-12));

        // Grounded tripod B leg mirrors the body
        let t = leg_target(&params, body, 0.0, TripodGroup::B, LegPhase::Stance, 0.08);
        assert!(t.is_close(&Vector3::new(0.1, 0.0, 0.3), 1e-12));

        // Mounted facing backwards the displacement is reversed
        let t = leg_target(&params, body, PI, TripodGroup::A, LegPhase::Stance, 0.08);
        assert!(t.is_close(&Vector3::new(0.1, 0.0, 0.3), 1e-12));

        // Mount rotation follows the (x, z) rotation convention
        let t = leg_target(&params, body, PI / 2.0, TripodGroup::A, LegPhase::Stance, 0.0);
        assert!(t.is_close(&Vector3::new(0.4, 0.0, 0.0), 1e-12));
    }
}
