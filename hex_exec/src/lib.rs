//! # Hexapod library.
//!
//! This library allows other crates in the workspace (and the integration tests) to access items
//! defined inside the hexapod crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - all state owned by the executable's control loop
pub mod data_store;

/// Gait control module - generates the tripod gait and commands every leg
pub mod gait_ctrl;

/// Kinematics - forward and inverse kinematics of a single 3 joint leg
pub mod kinematics;

/// A single leg, binding a kinematics solver to the leg's joints
pub mod leg;

/// Mechanisms interface - joint drivers and tick sources, plus a simulated implementation
pub mod mech;

/// 3D vector maths
pub mod vector;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Period of one control cycle, which is also the joint readback sampling period.
pub const CYCLE_PERIOD_MS: u64 = 32;
