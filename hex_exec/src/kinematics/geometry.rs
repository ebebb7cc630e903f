//! Leg chain geometry

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{KinematicsError, NUM_JOINTS};
use crate::vector::{Axis, Vector3};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geometry of a leg's kinematic chain.
///
/// The chain is: joint 1 -> offset 1 -> joint 2 -> offset 2 -> joint 3 -> offset 3 -> foot, with
/// every offset expressed in the frame of the joint before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegGeometry {
    /// Rotation axis of each joint. Joint 1 is the yaw joint, joints 2 and 3 must share a
    /// different (pitch) axis.
    pub joint_axes: [Axis; NUM_JOINTS],

    /// Fixed link offsets following each joint.
    ///
    /// Units: meters
    pub link_offsets_m: [Vector3; NUM_JOINTS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LegGeometry {
    /// The geometry of the legs on the reference hexapod model.
    pub fn reference() -> Self {
        Self {
            joint_axes: [Axis::Y, Axis::Z, Axis::Z],
            link_offsets_m: [
                Vector3::new(-0.3706, 0.0, 0.0),
                Vector3::new(-0.511, 0.36, 0.0),
                Vector3::new(-0.3204, -1.05, 0.0),
            ],
        }
    }

    pub fn yaw_axis(&self) -> Axis {
        self.joint_axes[0]
    }

    pub fn pitch_axis(&self) -> Axis {
        self.joint_axes[1]
    }

    /// Check that the closed form solver can be applied to this geometry.
    pub fn validate(&self) -> Result<(), KinematicsError> {
        let [yaw, pitch, lower] = self.joint_axes;

        if pitch != lower {
            return Err(KinematicsError::InvalidGeometry(format!(
                "joints 2 and 3 must share an axis, found {} and {}",
                pitch, lower
            )));
        }
        if yaw == pitch {
            return Err(KinematicsError::InvalidGeometry(format!(
                "joint 1 must not rotate about the pitch axis {}",
                pitch
            )));
        }

        for (i, offset) in self.link_offsets_m.iter().enumerate() {
            if offset.component(pitch) != 0.0 {
                return Err(KinematicsError::InvalidGeometry(format!(
                    "offset {} = {} leaves the plane normal to the pitch axis {}",
                    i + 1,
                    offset,
                    pitch
                )));
            }
        }

        for i in 1..NUM_JOINTS {
            if self.link_offsets_m[i].length() == 0.0 {
                return Err(KinematicsError::InvalidGeometry(format!(
                    "offset {} must have a non-zero length",
                    i + 1
                )));
            }
        }

        Ok(())
    }
}

impl Default for LegGeometry {
    fn default() -> Self {
        Self::reference()
    }
}
