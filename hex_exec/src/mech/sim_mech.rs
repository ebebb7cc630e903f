//! Simulated leg joints

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;

use super::{JointDriver, TickSource};
use comms_if::eqpt::mech::ActId;
use util::{maths::slew, time::millis_to_seconds};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the simulated mechanisms.
#[derive(Debug, Clone, Deserialize)]
pub struct SimMechParams {
    /// Maximum rate at which a joint moves towards its target.
    ///
    /// Units: radians/second
    pub max_rate_rads: f64,

    /// Number of cycles after which the simulation ends, 0 runs forever.
    pub max_ticks: u64,
}

/// In-process simulation of the 18 leg joints.
///
/// Each joint slews towards its demanded angle at a limited rate every time the simulation is
/// stepped.
pub struct SimMech {
    params: SimMechParams,

    joints: HashMap<ActId, SimJoint>,

    /// Readback sampling period, `None` until readback is enabled.
    ///
    /// Units: milliseconds
    readback_period_ms: Option<u64>,

    /// Sampled joint angles.
    sensed_rad: HashMap<ActId, f64>,

    elapsed_ms: u64,
    last_sample_ms: u64,
    num_ticks: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct SimJoint {
    angle_rad: f64,
    target_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimMech {
    /// Create a new simulation with every joint at zero.
    pub fn new(params: SimMechParams) -> Self {
        info!(
            "SimMech created, max rate {} rad/s, {}",
            params.max_rate_rads,
            match params.max_ticks {
                0 => "running forever".to_string(),
                n => format!("stopping after {} ticks", n),
            }
        );

        Self {
            params,
            joints: ActId::all().map(|id| (id, SimJoint::default())).collect(),
            readback_period_ms: None,
            sensed_rad: HashMap::new(),
            elapsed_ms: 0,
            last_sample_ms: 0,
            num_ticks: 0,
        }
    }

    /// The true (not sampled) angle of a joint.
    pub fn true_angle(&self, act_id: ActId) -> f64 {
        self.joints.get(&act_id).map_or(0.0, |j| j.angle_rad)
    }

    /// Number of ticks simulated so far.
    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    fn sample(&mut self) {
        self.sensed_rad = self
            .joints
            .iter()
            .map(|(id, j)| (*id, j.angle_rad))
            .collect();
        self.last_sample_ms = self.elapsed_ms;
    }
}

impl JointDriver for SimMech {
    fn set_target_angle(&mut self, act_id: ActId, angle_rad: f64) {
        if let Some(joint) = self.joints.get_mut(&act_id) {
            joint.target_rad = angle_rad;
        }
    }

    fn read_angle(&self, act_id: ActId) -> Option<f64> {
        self.readback_period_ms?;
        self.sensed_rad.get(&act_id).copied()
    }

    fn enable_readback(&mut self, period_ms: u64) {
        debug!("SimMech readback enabled every {} ms", period_ms);
        self.readback_period_ms = Some(period_ms);
        self.sample();
    }
}

impl TickSource for SimMech {
    fn step(&mut self, timestep_ms: u64) -> bool {
        if self.params.max_ticks != 0 && self.num_ticks >= self.params.max_ticks {
            return false;
        }

        let max_step_rad = self.params.max_rate_rads * millis_to_seconds(timestep_ms);
        for joint in self.joints.values_mut() {
            joint.angle_rad = slew(joint.angle_rad, joint.target_rad, max_step_rad);
        }

        self.elapsed_ms += timestep_ms;
        self.num_ticks += 1;

        if let Some(period_ms) = self.readback_period_ms {
            if self.elapsed_ms - self.last_sample_ms >= period_ms {
                self.sample();
            }
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use comms_if::eqpt::mech::{LegId, MechDems};

    const HIP: ActId = ActId {
        leg: LegId::BackRight,
        motor: 1,
    };

    fn sim(max_ticks: u64) -> SimMech {
        SimMech::new(SimMechParams {
            max_rate_rads: 5.0,
            max_ticks,
        })
    }

    #[test]
    fn test_slew_to_target() {
        let mut sim = sim(0);
        sim.set_target_angle(HIP, 0.3);

        // 5 rad/s over 32 ms is 0.16 rad per tick
        assert!(sim.step(32));
        assert_abs_diff_eq!(sim.true_angle(HIP), 0.16, epsilon = 1e-12);
        assert!(sim.step(32));
        assert_abs_diff_eq!(sim.true_angle(HIP), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_readback() {
        let mut sim = sim(0);
        let mut dems = MechDems::default();
        dems.pos_rad.insert(HIP, -0.1);
        sim.apply(&dems);
        sim.step(32);

        // Nothing until readback is enabled
        assert_eq!(sim.read_angle(HIP), None);
        assert!(sim.sens_data().pos_rad.is_empty());

        sim.enable_readback(64);
        assert_abs_diff_eq!(sim.read_angle(HIP).unwrap(), -0.1, epsilon = 1e-12);

        // Samples are only refreshed once per period
        sim.set_target_angle(HIP, 0.0);
        sim.step(32);
        assert_abs_diff_eq!(sim.read_angle(HIP).unwrap(), -0.1, epsilon = 1e-12);
        sim.step(32);
        assert_abs_diff_eq!(sim.read_angle(HIP).unwrap(), 0.0, epsilon = 1e-12);

        assert_eq!(sim.sens_data().pos_rad.len(), 18);
    }

    #[test]
    fn test_tick_limit() {
        let mut sim = sim(3);

        assert!(sim.step(32));
        assert!(sim.step(32));
        assert!(sim.step(32));
        assert!(!sim.step(32));
        assert_eq!(sim.num_ticks(), 3);
    }
}
