//! # Data Store

use comms_if::eqpt::mech::{MechDems, MechSensData};
use log::warn;

use crate::gait_ctrl;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the hexapod has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    /// Too many consecutive cycles had legs unable to reach their targets
    UnreachableTargets,

    /// The tick source asked the control loop to stop
    Shutdown,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time
    pub sim_time_s: f64,

    // Safe mode variables
    /// Determines if the hexapod is in safe mode.
    pub safe: bool,

    /// Gives the reason for the hexapod being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // GaitCtrl
    pub gait_ctrl: gait_ctrl::GaitCtrl,
    pub gait_ctrl_input: gait_ctrl::InputData,
    pub gait_ctrl_output: MechDems,
    pub gait_ctrl_status_rpt: gait_ctrl::StatusReport,

    // Mechanisms
    pub mech_sens_data: MechSensData,

    // Monitoring Counters
    /// Number of consecutive cycles in which at least one leg was unreachable
    pub num_consec_unreachable_cycles: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Puts the hexapod into safe mode with the given cause.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);
            self.safe = true;
            self.safe_cause = Some(cause);

            self.gait_ctrl.make_safe();
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz.round().max(1.0) as u128) == 0;

        self.gait_ctrl_input = gait_ctrl::InputData::default();
        self.gait_ctrl_output = MechDems::default();
        self.gait_ctrl_status_rpt = gait_ctrl::StatusReport::default();

        self.sim_time_s = util::session::get_elapsed_seconds();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_make_safe_keeps_first_cause() {
        let mut ds = DataStore::default();

        ds.make_safe(SafeModeCause::UnreachableTargets);
        assert!(ds.safe);

        // A second cause does not replace the first
        ds.make_safe(SafeModeCause::Shutdown);
        assert_eq!(ds.safe_cause, Some(SafeModeCause::UnreachableTargets));
    }

    #[test]
    fn test_1_hz_flag() {
        let mut ds = DataStore::default();

        ds.cycle_start(31.25);
        assert!(ds.is_1_hz_cycle);

        ds.num_cycles = 1;
        ds.cycle_start(31.25);
        assert!(!ds.is_1_hz_cycle);

        ds.num_cycles = 31;
        ds.cycle_start(31.25);
        assert!(ds.is_1_hz_cycle);
    }
}
