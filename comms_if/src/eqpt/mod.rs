//! # Equipment Interface
//!
//! This module defines the interface structures which are exchanged with the leg equipment.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod mech;
