//! # Mechanisms Interface
//!
//! The interface between the gait controller and whatever actuates the leg joints. A driver
//! accepts position demands for individual joints and, once readback is enabled, reports the
//! measured joint angles. A tick source advances the host (a simulation or a real time loop) by
//! one control cycle.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Simulated joints for running without hardware.
mod sim_mech;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::mech::{ActId, MechDems, MechSensData};

pub use sim_mech::*;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for commanding leg joints.
pub trait JointDriver {
    /// Demand a joint moves to `angle_rad`.
    ///
    /// Demands are fire and forget, the driver has no way to reject them.
    fn set_target_angle(&mut self, act_id: ActId, angle_rad: f64);

    /// Get the measured angle of a joint, or `None` if readback is not enabled.
    fn read_angle(&self, act_id: ActId) -> Option<f64>;

    /// Enable position readback on every joint, sampled every `period_ms`.
    fn enable_readback(&mut self, period_ms: u64);

    /// Forward every demand in `dems` to the joints.
    fn apply(&mut self, dems: &MechDems) {
        for (act_id, angle_rad) in dems.pos_rad.iter() {
            self.set_target_angle(*act_id, *angle_rad);
        }
    }

    /// Collect readback for every joint which has it.
    fn sens_data(&self) -> MechSensData {
        MechSensData {
            pos_rad: ActId::all()
                .filter_map(|id| self.read_angle(id).map(|a| (id, a)))
                .collect(),
        }
    }
}

/// Source of control cycles.
pub trait TickSource {
    /// Advance by one cycle of `timestep_ms`, returning `false` if the control loop must stop.
    fn step(&mut self, timestep_ms: u64) -> bool;
}
