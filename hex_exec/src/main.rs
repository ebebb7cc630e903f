//! Main hexapod executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop, once per tick of the mechanisms:
//!         - Joint readback acquisition
//!         - Gait control processing
//!         - Joint demand output
//!
//! # Modules
//!
//! All modules (e.g. `gait_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, error, info, warn};

// Internal
use hex_lib::{
    data_store::{DataStore, SafeModeCause},
    gait_ctrl::{GaitCmd, GaitCtrlError},
    mech::{JointDriver, SimMech, SimMechParams, TickSource},
    CYCLE_PERIOD_MS,
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    session::Session,
    time::millis_to_seconds,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1000.0 / CYCLE_PERIOD_MS as f64;

/// Number of consecutive cycles with unreachable legs after which safe mode will be engaged.
const MAX_CONSEC_UNREACHABLE_CYCLES: u64 = 50;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("hex_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Hexapod Executable\n");
    info!(
        "Software root: {:?}",
        host::get_hexapod_sw_root().wrap_err("Failed to get the software root")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let sim_mech_params: SimMechParams =
        util::params::load("sim_mech.toml").wrap_err("Could not load SimMech params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.gait_ctrl
        .init("gait_ctrl.toml", &session)
        .wrap_err("Failed to initialise GaitCtrl")?;
    info!("GaitCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE MECHANISMS ----

    let mut mech = SimMech::new(sim_mech_params);
    mech.enable_readback(CYCLE_PERIOD_MS);
    info!(
        "SimMech initialised, readback every {:.3} s",
        millis_to_seconds(CYCLE_PERIOD_MS)
    );

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    while mech.step(CYCLE_PERIOD_MS) {
        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        ds.mech_sens_data = mech.sens_data();

        if !ds.safe {
            ds.gait_ctrl_input.cmd = Some(GaitCmd::Walk);
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        match ds.gait_ctrl.proc(&ds.gait_ctrl_input) {
            Ok((o, r)) => {
                ds.gait_ctrl_output = o.dems;
                ds.gait_ctrl_status_rpt = r;
            }
            Err(GaitCtrlError::NotInitialised) => {
                raise_error!("GaitCtrl is not initialised, cannot command the legs")
            }
        };

        // Count cycles in which some legs could not follow the gait
        if ds.gait_ctrl_status_rpt.num_unreachable() > 0 {
            ds.num_consec_unreachable_cycles += 1;

            if ds.num_consec_unreachable_cycles > MAX_CONSEC_UNREACHABLE_CYCLES {
                if !ds.safe {
                    error!(
                        "Legs have been unreachable for more than {} consecutive cycles",
                        MAX_CONSEC_UNREACHABLE_CYCLES
                    );
                }
                ds.make_safe(SafeModeCause::UnreachableTargets);
            }
        } else {
            ds.num_consec_unreachable_cycles = 0;
        }

        // Send demands to mechanisms
        mech.apply(&ds.gait_ctrl_output);

        // ---- MONITORING ----

        if ds.is_1_hz_cycle {
            for leg in ds.gait_ctrl.legs() {
                match leg.sensed_position(&ds.mech_sens_data) {
                    Some(sensed) => debug!(
                        "{} commanded {}, sensed {}",
                        leg.id(),
                        leg.position(),
                        sensed
                    ),
                    None => warn!("{} has no joint readback", leg.id()),
                }
            }
            info!(
                "t = {:.2} s, body travel {:.3} m",
                ds.sim_time_s, ds.gait_ctrl_status_rpt.body_travel_m
            );
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    ds.make_safe(SafeModeCause::Shutdown);

    info!("End of execution after {} cycles", ds.num_cycles);

    session.exit();

    Ok(())
}
