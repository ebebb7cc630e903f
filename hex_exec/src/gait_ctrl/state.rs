//! Implementations for the GaitCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;

// Internal
use super::{
    leg_phase, leg_target, lift_height, GaitCmd, GaitCtrlError, GaitCtrlInitError, LegPhase,
    Params, TripodGroup, NUM_LEGS,
};
use crate::{kinematics::LegKinematics, leg::Leg, vector::Vector3};
use comms_if::eqpt::mech::{MechDems, LEG_IDS};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gait control module state
#[derive(Default)]
pub struct GaitCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    pub(crate) current_cmd: Option<GaitCmd>,

    /// Legs in `LEG_IDS` order, empty until initialised.
    legs: Vec<Leg>,

    /// Accumulated displacement of the body along the travel axis.
    ///
    /// Units: meters
    body_pos_m: Vector3,

    /// Displacement applied to the body each walking cycle.
    ///
    /// Units: meters
    direction_m: Vector3,
}

/// Input data to Gait Control.
#[derive(Default)]
pub struct InputData {
    /// The gait command to be executed, or `None` if there is no new
    /// command on this cycle.
    pub cmd: Option<GaitCmd>,
}

/// Output of GaitCtrl which must be sent to the mechanisms.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OutputData {
    /// Joint position demands for every leg.
    pub dems: MechDems,

    /// Foot target requested for each leg relative to its neutral stance. Legs which could not
    /// reach their target keep their previous pose.
    ///
    /// Units: meters
    pub foot_targets_m: [Vector3; NUM_LEGS],
}

/// Status report for GaitCtrl processing.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatusReport {
    /// Phase of each leg this cycle.
    pub phases: [LegPhase; NUM_LEGS],

    /// Raised for each leg whose target was outside its workspace.
    pub unreachable: [bool; NUM_LEGS],

    /// True while the body travels in the negative direction.
    pub direction_negative: bool,

    /// Body displacement along the travel axis after this cycle.
    ///
    /// Units: meters
    pub body_travel_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            phases: [LegPhase::Hold; NUM_LEGS],
            unreachable: [false; NUM_LEGS],
            direction_negative: false,
            body_travel_m: 0.0,
        }
    }
}

impl StatusReport {
    /// Number of legs which could not reach their target this cycle.
    pub fn num_unreachable(&self) -> usize {
        self.unreachable.iter().filter(|u| **u).count()
    }
}

impl State for GaitCtrl {
    type InitData = &'static str;
    type InitError = GaitCtrlInitError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = GaitCtrlError;

    /// Initialise the GaitCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(
        &mut self,
        init_data: Self::InitData,
        _session: &Session,
    ) -> Result<(), Self::InitError> {
        let params = params::load(init_data)?;

        *self = Self::from_params(params)?;

        Ok(())
    }

    /// Perform cyclic processing of Gait Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        if self.legs.len() != NUM_LEGS {
            return Err(GaitCtrlError::NotInitialised);
        }

        // Clear the status report
        self.report = StatusReport::default();

        // Check to see if there's a new command
        if let Some(cmd) = input_data.cmd {
            if self.current_cmd != Some(cmd) {
                debug!("New GaitCtrl GaitCmd::{:?}", cmd);
            }
            self.current_cmd = Some(cmd);
        }

        let mut output = OutputData::default();

        match self.current_cmd {
            Some(GaitCmd::Walk) => self.calc_walk(&mut output),
            Some(GaitCmd::Stop) | None => self.calc_hold(&mut output),
        }

        for leg in self.legs.iter() {
            leg.write_dems(&mut output.dems);
        }

        trace!(
            "GaitCtrl output: body {}, phases {:?}",
            self.body_pos_m,
            self.report.phases
        );

        Ok((output, self.report))
    }
}

impl GaitCtrl {
    /// Build the module directly from a set of parameters.
    ///
    /// The gait starts walking immediately.
    pub fn from_params(params: Params) -> Result<Self, GaitCtrlInitError> {
        let kin = LegKinematics::new(params.leg_geometry.clone())?;

        let legs = LEG_IDS
            .iter()
            .map(|id| Leg::new(*id, TripodGroup::for_leg(*id), kin.clone()))
            .collect();

        info!(
            "GaitCtrl initialised, leg reach {:.3} m, neutral stance {}",
            kin.reach(),
            kin.default_ee()
        );

        Ok(Self {
            direction_m: params.initial_direction_m(),
            params,
            report: StatusReport::default(),
            current_cmd: Some(GaitCmd::Walk),
            legs,
            body_pos_m: Vector3::ZERO,
        })
    }

    /// Function called when entering safe mode.
    ///
    /// Must result in no motion of the legs.
    pub fn make_safe(&mut self) {
        self.current_cmd = Some(GaitCmd::Stop);
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn body_position(&self) -> Vector3 {
        self.body_pos_m
    }

    pub fn direction(&self) -> Vector3 {
        self.direction_m
    }

    /// Advance the gait by one cycle and command every leg.
    fn calc_walk(&mut self, output: &mut OutputData) {
        let travel = self.params.travel_axis;

        // Turn around at the end of the stride
        if self.body_pos_m.component(travel).abs() >= self.params.travel_bound_m {
            self.direction_m = -self.direction_m;
            debug!("GaitCtrl direction flipped to {}", self.direction_m);
        }

        self.body_pos_m = self.body_pos_m + self.direction_m;

        let body_travel_m = self.body_pos_m.component(travel);
        let direction_negative = self.direction_m.component(travel) < 0.0;
        let lift_m = lift_height(&self.params, body_travel_m);

        self.report.direction_negative = direction_negative;
        self.report.body_travel_m = body_travel_m;

        for leg in self.legs.iter_mut() {
            let i = leg.id().index();
            let phase = leg_phase(direction_negative, leg.group());
            let target = leg_target(
                &self.params,
                self.body_pos_m,
                self.params.mount_angles_rad[i],
                leg.group(),
                phase,
                lift_m,
            );

            self.report.phases[i] = phase;
            output.foot_targets_m[i] = target;

            // An unreachable leg holds its pose, the rest of the legs are still commanded
            if let Err(e) = leg.set_relative_position(target) {
                warn!("{} holding previous pose: {}", leg.id(), e);
                self.report.unreachable[i] = true;
            }
        }
    }

    /// Keep every leg at its last command.
    fn calc_hold(&mut self, output: &mut OutputData) {
        self.report.direction_negative = self.direction_m.component(self.params.travel_axis) < 0.0;
        self.report.body_travel_m = self.body_pos_m.component(self.params.travel_axis);

        for (i, leg) in self.legs.iter().enumerate() {
            output.foot_targets_m[i] = leg.relative_position();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn walk() -> InputData {
        InputData {
            cmd: Some(GaitCmd::Walk),
        }
    }

    #[test]
    fn test_uninitialised() {
        let mut gait = GaitCtrl::default();
        assert!(matches!(
            gait.proc(&walk()),
            Err(GaitCtrlError::NotInitialised)
        ));
    }

    #[test]
    fn test_direction_flip() {
        let mut gait = GaitCtrl::from_params(Params::default()).unwrap();

        for i in 1..=3 {
            let (_, report) = gait.proc(&walk()).unwrap();
            assert!(report.direction_negative);
            assert_abs_diff_eq!(report.body_travel_m, -0.15 * i as f64, epsilon = 1e-12);
        }
        assert!(gait.body_position().z.abs() >= 0.4);

        // Bound reached, the next cycle turns around
        let (_, report) = gait.proc(&walk()).unwrap();
        assert!(!report.direction_negative);
        assert_eq!(gait.direction(), Vector3::new(0.0, 0.0, 0.15));
        assert_abs_diff_eq!(report.body_travel_m, -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_tripods_never_swing_together() {
        let mut gait = GaitCtrl::from_params(Params::default()).unwrap();

        for _ in 0..40 {
            let (_, report) = gait.proc(&walk()).unwrap();
            assert_eq!(report.num_unreachable(), 0);

            for group in [TripodGroup::A, TripodGroup::B].iter() {
                let phases: Vec<LegPhase> = gait
                    .legs()
                    .iter()
                    .zip(report.phases.iter())
                    .filter(|(l, _)| l.group() == *group)
                    .map(|(_, p)| *p)
                    .collect();

                // Legs of one tripod always share a phase
                assert_eq!(phases.len(), 3);
                assert!(phases.iter().all(|p| *p == phases[0]));
            }

            let a_swing = report.phases[0] == LegPhase::Swing;
            let b_swing = report.phases[1] == LegPhase::Swing;
            assert!(a_swing != b_swing);
        }
    }

    #[test]
    fn test_legs_follow_targets() {
        let mut gait = GaitCtrl::from_params(Params::default()).unwrap();

        let (output, _) = gait.proc(&walk()).unwrap();

        for (i, leg) in gait.legs().iter().enumerate() {
            assert!(leg
                .relative_position()
                .is_close(&output.foot_targets_m[i], 1e-9));

            for (j, act_id) in leg.id().act_ids().iter().enumerate() {
                assert_eq!(output.dems.pos_rad[act_id], leg.angles()[j]);
            }
        }
    }

    #[test]
    fn test_unreachable_legs_are_isolated() {
        // Lift the swinging feet far out of reach
        let params = Params {
            swing_lift_apex_m: 10.0,
            ..Params::default()
        };
        let mut gait = GaitCtrl::from_params(params).unwrap();

        let (output, report) = gait.proc(&walk()).unwrap();

        for (i, leg) in gait.legs().iter().enumerate() {
            match leg.group() {
                // Swinging, unreachable, still at the neutral stance
                TripodGroup::A => {
                    assert!(report.unreachable[i]);
                    assert_eq!(leg.angles(), [0.0; 3]);
                }
                // Grounded and moved to the target
                TripodGroup::B => {
                    assert!(!report.unreachable[i]);
                    assert!(leg
                        .relative_position()
                        .is_close(&output.foot_targets_m[i], 1e-9));
                }
            }
        }
        assert_eq!(report.num_unreachable(), 3);
    }

    #[test]
    fn test_non_finite_step_holds_every_leg() {
        let params = Params {
            step_m: f64::NAN,
            ..Params::default()
        };
        let mut gait = GaitCtrl::from_params(params).unwrap();

        let (output, report) = gait.proc(&walk()).unwrap();

        assert_eq!(report.num_unreachable(), NUM_LEGS);
        assert!(output.dems.pos_rad.values().all(|a| *a == 0.0));
        for leg in gait.legs() {
            assert_eq!(leg.angles(), [0.0; 3]);
        }
    }

    #[test]
    fn test_stop_holds_pose() {
        let mut gait = GaitCtrl::from_params(Params::default()).unwrap();

        let (walking, _) = gait.proc(&walk()).unwrap();
        let body = gait.body_position();

        gait.make_safe();
        let (held, report) = gait.proc(&InputData::default()).unwrap();

        assert_eq!(gait.body_position(), body);
        assert_eq!(held.dems, walking.dems);
        assert!(report.phases.iter().all(|p| *p == LegPhase::Hold));

        // Walking resumes from where it stopped
        let (_, report) = gait.proc(&walk()).unwrap();
        assert_abs_diff_eq!(report.body_travel_m, -0.3, epsilon = 1e-12);
    }
}
