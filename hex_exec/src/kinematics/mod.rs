//! Leg kinematics module
//!
//! Forward and inverse kinematics for a three joint leg made of a yaw joint followed by two
//! parallel pitch joints.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod geometry;
mod solver;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use geometry::*;
pub use solver::*;

use crate::vector::Vector3;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of revolute joints in a leg.
pub const NUM_JOINTS: usize = comms_if::eqpt::mech::NUM_LEG_JOINTS;

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// Angles of the joints along a leg, hip first.
///
/// Units: radians
pub type JointAngles = [f64; NUM_JOINTS];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during kinematics calculations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum KinematicsError {
    #[error("Target {target} is outside the leg's workspace")]
    Unreachable { target: Vector3 },

    #[error("Invalid leg geometry: {0}")]
    InvalidGeometry(String),
}
