//! Gait control module
//!
//! Generates a tripod walking gait. Each cycle the body is advanced along the travel axis, a
//! foot target is computed for every leg and the legs are solved into joint demands.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
mod tripod;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
pub use params::*;
pub use state::*;
pub use tripod::*;

use crate::kinematics::KinematicsError;
use comms_if::eqpt::mech::LegId;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of legs driven by GaitCtrl.
pub const NUM_LEGS: usize = comms_if::eqpt::mech::NUM_LEGS;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The two groups of three legs which alternate between swing and stance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TripodGroup {
    /// Front left, middle right and back left.
    A,
    /// Front right, middle left and back right.
    B,
}

/// Commands accepted by GaitCtrl.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GaitCmd {
    /// Walk, advancing the gait every cycle.
    Walk,
    /// Hold the current pose without advancing the gait.
    Stop,
}

/// Possible errors that can occur during GaitCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum GaitCtrlInitError {
    #[error("Could not load GaitCtrl parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Could not build the leg kinematics: {0}")]
    KinematicsError(#[from] KinematicsError),
}

/// Possible errors that can occur during GaitCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum GaitCtrlError {
    #[error("GaitCtrl has not been initialised")]
    NotInitialised,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TripodGroup {
    /// The tripod a leg belongs to.
    pub fn for_leg(leg: LegId) -> Self {
        match leg {
            LegId::FrontLeft | LegId::MidRight | LegId::BackLeft => TripodGroup::A,
            LegId::FrontRight | LegId::MidLeft | LegId::BackRight => TripodGroup::B,
        }
    }
}
