//! Parameters structure for GaitCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};

use super::NUM_LEGS;
use crate::{
    kinematics::LegGeometry,
    vector::{Axis, Vector3},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Gait control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// Kinematic chain shared by all legs.
    pub leg_geometry: LegGeometry,

    /// Rotation of each leg about the vertical axis relative to the body, in leg order
    /// (fl, fr, ml, mr, bl, br).
    ///
    /// Units: radians
    pub mount_angles_rad: [f64; NUM_LEGS],

    /// Offset added to every foot target, moving the feet out from the neutral stance.
    ///
    /// Units: meters
    pub mount_offset_m: Vector3,

    /// The axis pointing up out of the body.
    pub vertical_axis: Axis,

    // ---- GAIT ----
    /// The axis the body travels along.
    pub travel_axis: Axis,

    /// Distance the body moves along the travel axis each cycle. The sign gives the initial
    /// walking direction.
    ///
    /// Units: meters
    pub step_m: f64,

    /// Once the body is this far from the centre of the stride the walking direction flips.
    ///
    /// Units: meters
    pub travel_bound_m: f64,

    /// Swing lift is `(swing_lift_apex_m - |body travel|) / swing_lift_divisor`.
    ///
    /// Units: meters
    pub swing_lift_apex_m: f64,

    /// See `swing_lift_apex_m`.
    pub swing_lift_divisor: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    /// The parameters of the reference hexapod.
    fn default() -> Self {
        Self {
            leg_geometry: LegGeometry::reference(),
            mount_angles_rad: [
                -FRAC_PI_4,
                -FRAC_PI_4 * 3.0,
                0.0,
                PI,
                FRAC_PI_4,
                FRAC_PI_4 * 3.0,
            ],
            mount_offset_m: Vector3::new(0.1, 0.0, 0.0),
            vertical_axis: Axis::Y,
            travel_axis: Axis::Z,
            step_m: -0.15,
            travel_bound_m: 0.4,
            swing_lift_apex_m: 0.5,
            swing_lift_divisor: 2.5,
        }
    }
}

impl Params {
    /// Direction (and per-cycle distance) the body initially travels in.
    pub fn initial_direction_m(&self) -> Vector3 {
        let mut dir = [0.0; 3];
        dir[self.travel_axis.index()] = self.step_m;
        Vector3::from(dir)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_file_matches_reference() {
        let params: Params =
            util::params::from_str(include_str!("../../../params/gait_ctrl.toml")).unwrap();

        assert_eq!(params.leg_geometry, LegGeometry::reference());
        assert_eq!(params.mount_offset_m, Vector3::new(0.1, 0.0, 0.0));
        assert_eq!(params.initial_direction_m(), Vector3::new(0.0, 0.0, -0.15));
        for (a, b) in params
            .mount_angles_rad
            .iter()
            .zip(Params::default().mount_angles_rad.iter())
        {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
