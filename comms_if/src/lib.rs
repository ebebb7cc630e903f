//! # Communications interface crate.
//!
//! Provides the interfaces shared between the gait software and the leg equipment.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Demand and sensing definitions for equipment (like the leg mechanisms)
pub mod eqpt;
