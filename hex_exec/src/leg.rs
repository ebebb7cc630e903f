//! # Leg
//!
//! Binds a kinematics solver to one physical leg. Positions are set and read in the leg's local
//! Cartesian frame and converted to joint demands for the mechanisms.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::mech::{LegId, MechDems, MechSensData};

use crate::{
    gait_ctrl::TripodGroup,
    kinematics::{JointAngles, KinematicsError, LegKinematics, NUM_JOINTS},
    vector::Vector3,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single leg of the hexapod.
#[derive(Debug, Clone)]
pub struct Leg {
    id: LegId,

    group: TripodGroup,

    kin: LegKinematics,

    /// Last commanded joint angles.
    ///
    /// Units: radians
    angles: JointAngles,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Leg {
    /// Create a new leg, initially commanded to its neutral stance (all joints at zero).
    pub fn new(id: LegId, group: TripodGroup, kin: LegKinematics) -> Self {
        Self {
            id,
            group,
            kin,
            angles: [0.0; NUM_JOINTS],
        }
    }

    pub fn id(&self) -> LegId {
        self.id
    }

    pub fn group(&self) -> TripodGroup {
        self.group
    }

    pub fn kinematics(&self) -> &LegKinematics {
        &self.kin
    }

    /// The last commanded joint angles.
    pub fn angles(&self) -> JointAngles {
        self.angles
    }

    /// The neutral stance foot position.
    pub fn default_ee(&self) -> Vector3 {
        self.kin.default_ee()
    }

    /// Command the foot to `target` in the leg frame, returning the commanded joint angles.
    ///
    /// If the target is unreachable the previous command is kept.
    pub fn set_position(&mut self, target: Vector3) -> Result<JointAngles, KinematicsError> {
        self.angles = self.kin.inverse_near(target, &self.angles)?;
        Ok(self.angles)
    }

    /// Foot position of the last command.
    ///
    /// This is computed from the commanded angles, not from sensor readback, see
    /// [`Leg::sensed_position`].
    pub fn position(&self) -> Vector3 {
        self.kin.forward(&self.angles)
    }

    /// Foot position computed from the joint angles measured by the mechanisms.
    ///
    /// Returns `None` if readback is missing for any of the leg's joints.
    pub fn sensed_position(&self, sens: &MechSensData) -> Option<Vector3> {
        let mut angles = [0.0; NUM_JOINTS];

        for (angle, act_id) in angles.iter_mut().zip(self.id.act_ids().iter()) {
            *angle = *sens.pos_rad.get(act_id)?;
        }

        Some(self.kin.forward(&angles))
    }

    /// Command the foot to an offset from the neutral stance.
    pub fn set_relative_position(
        &mut self,
        offset: Vector3,
    ) -> Result<JointAngles, KinematicsError> {
        self.set_position(self.kin.default_ee() + offset)
    }

    /// Offset of the last commanded foot position from the neutral stance.
    pub fn relative_position(&self) -> Vector3 {
        self.position() - self.kin.default_ee()
    }

    /// Write this leg's joint demands into `dems`.
    pub fn write_dems(&self, dems: &mut MechDems) {
        for (act_id, angle) in self.id.act_ids().iter().zip(self.angles.iter()) {
            dems.pos_rad.insert(*act_id, *angle);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kinematics::LegGeometry;
    use approx::assert_abs_diff_eq;
    use comms_if::eqpt::mech::ActId;

    fn leg() -> Leg {
        Leg::new(
            LegId::FrontLeft,
            TripodGroup::A,
            LegKinematics::new(LegGeometry::reference()).unwrap(),
        )
    }

    #[test]
    fn test_zero_offset_is_neutral_stance() {
        let mut leg = leg();

        assert_eq!(leg.default_ee(), leg.kinematics().forward(&[0.0; 3]));

        let angles = leg.set_relative_position(Vector3::ZERO).unwrap();
        for a in angles.iter() {
            assert_abs_diff_eq!(*a, 0.0, epsilon = 1e-9);
        }
        assert!(leg.relative_position().is_close(&Vector3::ZERO, 1e-9));
    }

    #[test]
    fn test_relative_position_round_trip() {
        let mut leg = leg();
        let offset = Vector3::new(0.1, 0.05, -0.12);

        leg.set_relative_position(offset).unwrap();

        assert!(leg.relative_position().is_close(&offset, 1e-9));
        assert!(leg.position().is_close(&(leg.default_ee() + offset), 1e-9));
    }

    #[test]
    fn test_unreachable_holds_previous_angles() {
        let mut leg = leg();

        let held = leg.set_relative_position(Vector3::new(0.05, 0.1, 0.0)).unwrap();

        assert!(matches!(
            leg.set_position(Vector3::new(0.0, 2.0, 0.0)),
            Err(KinematicsError::Unreachable { .. })
        ));
        assert_eq!(leg.angles(), held);

        // A NaN offset never reaches the joints
        assert!(leg
            .set_relative_position(Vector3::new(f64::NAN, 0.0, 0.0))
            .is_err());
        assert_eq!(leg.angles(), held);
    }

    #[test]
    fn test_dems_and_readback() {
        let mut leg = leg();
        leg.set_relative_position(Vector3::new(0.0, 0.1, 0.1)).unwrap();

        let mut dems = MechDems::default();
        leg.write_dems(&mut dems);
        for (i, act_id) in LegId::FrontLeft.act_ids().iter().enumerate() {
            assert_eq!(dems.pos_rad[act_id], leg.angles()[i]);
        }

        // No readback enabled
        assert_eq!(leg.sensed_position(&MechSensData::default()), None);

        // Readback agreeing with the command gives the commanded position
        let sens = MechSensData {
            pos_rad: dems.pos_rad.clone(),
        };
        assert_eq!(leg.sensed_position(&sens), Some(leg.position()));

        // Partial readback is not enough
        let mut partial = sens;
        partial.pos_rad.remove(&ActId {
            leg: LegId::FrontLeft,
            motor: 3,
        });
        assert_eq!(leg.sensed_position(&partial), None);
    }
}
