//! # Mechanisms Equipment Interface
//!
//! Joint identifiers and the demand/sensing structures exchanged between the gait controller and
//! whatever drives the leg servos (the simulator or real hardware).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of legs on the hexapod.
pub const NUM_LEGS: usize = 6;

/// Number of actuated joints on each leg.
pub const NUM_LEG_JOINTS: usize = 3;

/// All legs in their fixed processing order.
pub const LEG_IDS: [LegId; NUM_LEGS] = [
    LegId::FrontLeft,
    LegId::FrontRight,
    LegId::MidLeft,
    LegId::MidRight,
    LegId::BackLeft,
    LegId::BackRight,
];

/// Prefix of the motor part of a device name, `{leg}_motor_{n}`.
const MOTOR_PREFIX: &str = "motor_";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Identifies a single joint actuator: which leg and which motor along the leg.
///
/// Motors are numbered from 1 (the hip yaw joint, closest to the body) to 3 (the lower joint,
/// closest to the foot).
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub struct ActId {
    pub leg: LegId,
    pub motor: u8,
}

/// Demands that are sent to the mechanisms.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MechDems {
    /// The demanded position of an actuator in radians.
    pub pos_rad: HashMap<ActId, f64>,
}

/// Sensor data returned by the mechanisms.
///
/// An actuator is missing from the map if its position sensor is not enabled.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MechSensData {
    /// The measured position of an actuator in radians.
    pub pos_rad: HashMap<ActId, f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The six legs of the hexapod.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum LegId {
    FrontLeft,
    FrontRight,
    MidLeft,
    MidRight,
    BackLeft,
    BackRight,
}

/// Errors which can occur when parsing a device name into an [`ActId`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ActIdParseError {
    #[error("Device name {0:?} is not of the form {{leg}}_motor_{{n}}")]
    InvalidDeviceName(String),

    #[error("Unknown leg name {0:?}")]
    UnknownLeg(String),

    #[error("Motor index must be between 1 and {max}, found {0}", max = NUM_LEG_JOINTS)]
    InvalidMotorIndex(u8),
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl LegId {
    /// Name of the leg as used in device names.
    pub fn name(&self) -> &'static str {
        match self {
            LegId::FrontLeft => "leg_fl",
            LegId::FrontRight => "leg_fr",
            LegId::MidLeft => "leg_ml",
            LegId::MidRight => "leg_mr",
            LegId::BackLeft => "leg_bl",
            LegId::BackRight => "leg_br",
        }
    }

    /// Position of the leg in [`LEG_IDS`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The three actuators of this leg, hip first.
    pub fn act_ids(&self) -> [ActId; NUM_LEG_JOINTS] {
        [
            ActId { leg: *self, motor: 1 },
            ActId { leg: *self, motor: 2 },
            ActId { leg: *self, motor: 3 },
        ]
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LegId {
    type Err = ActIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEG_IDS
            .iter()
            .find(|l| l.name() == s)
            .copied()
            .ok_or_else(|| ActIdParseError::UnknownLeg(s.to_string()))
    }
}

impl ActId {
    /// Every actuator of the hexapod, leg by leg.
    pub fn all() -> impl Iterator<Item = ActId> {
        IntoIterator::into_iter(LEG_IDS).flat_map(|l| IntoIterator::into_iter(l.act_ids()))
    }

    /// Name of the device driving this actuator, `{leg}_motor_{n}`.
    pub fn device_name(&self) -> String {
        format!("{}_{}{}", self.leg.name(), MOTOR_PREFIX, self.motor)
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.device_name())
    }
}

impl FromStr for ActId {
    type Err = ActIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ActIdParseError::InvalidDeviceName(s.to_string());

        let (leg_name, motor_part) = s
            .rsplit_once(&format!("_{}", MOTOR_PREFIX))
            .ok_or_else(invalid)?;

        let motor: u8 = motor_part.parse().map_err(|_| invalid())?;
        if motor == 0 || motor as usize > NUM_LEG_JOINTS {
            return Err(ActIdParseError::InvalidMotorIndex(motor));
        }

        Ok(ActId {
            leg: leg_name.parse()?,
            motor,
        })
    }
}

impl Default for MechDems {
    fn default() -> Self {
        Self {
            pos_rad: ActId::all().map(|id| (id, 0.0)).collect(),
        }
    }
}
