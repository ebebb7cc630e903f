//! Forward and inverse kinematics for a leg

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector2};

use super::{JointAngles, KinematicsError, LegGeometry, NUM_JOINTS};
use crate::vector::{Axis, Vector3};
use util::maths::{get_ang_dist, wrap_pi};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Tolerance applied to the law of cosines before a target is declared unreachable, absorbs
/// rounding for targets exactly on the workspace boundary.
const COS_TOLERANCE: f64 = 1e-9;

/// Below this horizontal distance from the yaw axis the yaw angle is undetermined.
///
/// Units: meters
const YAW_SINGULARITY_M: f64 = 1e-12;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematics solver for one leg.
#[derive(Debug, Clone)]
pub struct LegKinematics {
    geometry: LegGeometry,

    /// Axes spanning the plane the pitch joints move in, in right-handed order about the pitch
    /// axis.
    pitch_plane: (Axis, Axis),

    /// Axes spanning the plane the yaw joint rotates, in right-handed order about the yaw axis.
    yaw_plane: (Axis, Axis),

    /// The axis which is neither the yaw nor the pitch axis, the leg's reach direction.
    reach_axis: Axis,

    /// Link offsets projected into the pitch plane.
    links_2d: [Vector2<f64>; NUM_JOINTS],

    /// Foot position with all joints at zero.
    default_ee: Vector3,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LegKinematics {
    /// Build a new solver for the given geometry.
    pub fn new(geometry: LegGeometry) -> Result<Self, KinematicsError> {
        geometry.validate()?;

        let yaw = geometry.yaw_axis();
        let pitch = geometry.pitch_axis();

        let pitch_plane = (pitch.next(), pitch.next().next());
        let yaw_plane = (yaw.next(), yaw.next().next());
        let reach_axis = if yaw.next() == pitch {
            yaw.next().next()
        } else {
            yaw.next()
        };

        let project =
            |v: &Vector3| Vector2::new(v.component(pitch_plane.0), v.component(pitch_plane.1));
        let links_2d = [
            project(&geometry.link_offsets_m[0]),
            project(&geometry.link_offsets_m[1]),
            project(&geometry.link_offsets_m[2]),
        ];

        let mut kin = Self {
            geometry,
            pitch_plane,
            yaw_plane,
            reach_axis,
            links_2d,
            default_ee: Vector3::ZERO,
        };
        kin.default_ee = kin.forward(&[0.0; NUM_JOINTS]);

        Ok(kin)
    }

    /// Foot position with all joints at zero, the leg's neutral stance.
    pub fn default_ee(&self) -> Vector3 {
        self.default_ee
    }

    /// Maximum distance of any reachable point from the chain origin.
    pub fn reach(&self) -> f64 {
        self.geometry.link_offsets_m.iter().map(|o| o.length()).sum()
    }

    /// Compute the foot position for the given joint angles.
    pub fn forward(&self, angles: &JointAngles) -> Vector3 {
        let mut pose = Isometry3::identity();

        for ((axis, offset), angle) in self
            .geometry
            .joint_axes
            .iter()
            .zip(self.geometry.link_offsets_m.iter())
            .zip(angles.iter())
        {
            pose *= Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(&axis.unit(), *angle),
            );
            pose *= Translation3::from(nalgebra::Vector3::from(*offset));
        }

        Vector3::from((pose * Point3::origin()).coords)
    }

    /// Compute joint angles placing the foot at `target`, preferring the solution closest to
    /// all joints at zero.
    pub fn inverse(&self, target: Vector3) -> Result<JointAngles, KinematicsError> {
        self.inverse_near(target, &[0.0; NUM_JOINTS])
    }

    /// Compute joint angles placing the foot at `target`.
    ///
    /// Up to four solutions exist (yaw forward or backward, elbow up or down). The one with the
    /// smallest total angular distance from `seed` is returned so that consecutive solutions
    /// stay on the same branch. All angles are wrapped into (-pi, pi].
    ///
    /// Reach is limited by the distance from the joint 2 origin, not from the hip. Targets with a
    /// non-finite component are unreachable.
    pub fn inverse_near(
        &self,
        target: Vector3,
        seed: &JointAngles,
    ) -> Result<JointAngles, KinematicsError> {
        if !(target.x.is_finite() && target.y.is_finite() && target.z.is_finite()) {
            return Err(KinematicsError::Unreachable { target });
        }

        let yaw = self.geometry.yaw_axis();
        let target_na = nalgebra::Vector3::from(target);

        let horiz = Vector2::new(
            target.component(self.yaw_plane.0),
            target.component(self.yaw_plane.1),
        );
        let horiz_dist_m = horiz.norm();

        // Yaw angle candidates, each with the target expressed in the frame after the yaw joint.
        let mut yaw_candidates: Vec<(f64, Vector3)> = Vec::with_capacity(2);

        if horiz_dist_m < YAW_SINGULARITY_M {
            // Target on the yaw axis, any yaw works so keep the current one
            let rot = UnitQuaternion::from_axis_angle(&yaw.unit(), -seed[0]);
            yaw_candidates.push((seed[0], Vector3::from(rot * target_na)));
        } else {
            for sign in [1.0, -1.0].iter() {
                let mut local = [0.0; 3];
                local[yaw.index()] = target.component(yaw);
                local[self.reach_axis.index()] = sign * horiz_dist_m;
                let local = Vector3::from(local);

                let local_angle = local
                    .component(self.yaw_plane.1)
                    .atan2(local.component(self.yaw_plane.0));
                let theta_1 = horiz.y.atan2(horiz.x) - local_angle;

                yaw_candidates.push((theta_1, local));
            }
        }

        let [_, link_2, link_3] = self.links_2d;
        let len_2 = link_2.norm();
        let len_3 = link_3.norm();
        let link_2_angle = link_2.y.atan2(link_2.x);
        let link_3_angle = link_3.y.atan2(link_3.x);

        let mut best: Option<(f64, JointAngles)> = None;

        for (theta_1, local) in yaw_candidates {
            // Vector from joint 2 to the foot in the pitch plane
            let r = Vector2::new(
                local.component(self.pitch_plane.0),
                local.component(self.pitch_plane.1),
            ) - self.links_2d[0];

            let cos_elbow =
                (r.norm_squared() - len_2.powi(2) - len_3.powi(2)) / (2.0 * len_2 * len_3);
            if cos_elbow.abs() > 1.0 + COS_TOLERANCE {
                continue;
            }
            let elbow = cos_elbow.max(-1.0).min(1.0).acos();

            for bend in [elbow, -elbow].iter() {
                let theta_3 = link_2_angle - link_3_angle + bend;

                let (s, c) = theta_3.sin_cos();
                let w = link_2
                    + Vector2::new(c * link_3.x - s * link_3.y, s * link_3.x + c * link_3.y);
                let theta_2 = r.y.atan2(r.x) - w.y.atan2(w.x);

                let angles = [wrap_pi(theta_1), wrap_pi(theta_2), wrap_pi(theta_3)];
                let cost: f64 = angles
                    .iter()
                    .zip(seed.iter())
                    .map(|(a, s)| get_ang_dist(*s, *a).abs())
                    .sum();

                if !cost.is_finite() {
                    continue;
                }
                if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                    best = Some((cost, angles));
                }
            }
        }

        match best {
            Some((cost, angles)) => {
                trace!(
                    "IK solution for {}: {:?} (distance from seed {:.4} rad)",
                    target,
                    angles,
                    cost
                );
                Ok(angles)
            }
            None => Err(KinematicsError::Unreachable { target }),
        }
    }
}
