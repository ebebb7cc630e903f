//! Logger setup for the hexapod executables
//!
//! Records go to two sinks: the terminal, with coloured level tags, and the session log file in
//! plain text. Per-leg solver output is emitted every cycle for all six legs, so the kinematics
//! module is capped below the requested level unless tracing is explicitly asked for.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info, Level};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Log target of the leg kinematics solver.
const KINEMATICS_TARGET: &str = "hex_lib::kinematics";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - `min_level` must be `Info` or more verbose, warnings from the gait must never be hidden.
/// - Kinematics solves are logged at `Trace`, they only appear when `min_level` is `Trace`.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    if min_level < Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level));
    }

    let log_file =
        fern::log_file(session.log_file_path.clone()).map_err(LoggerInitError::LogFileInitError)?;

    let terminal = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:10.6} {}] {}",
                session::get_elapsed_seconds(),
                coloured_tag(record.level()),
                with_target(record.level(), record.target(), message)
            ))
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:10.6} {}] {}",
                session::get_elapsed_seconds(),
                level_tag(record.level()),
                with_target(record.level(), record.target(), message)
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(min_level)
        .level_for(KINEMATICS_TARGET, kinematics_level(min_level))
        .chain(terminal)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!(
        "    Log level: {:?} (kinematics {:?})",
        min_level,
        kinematics_level(min_level)
    );
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Level applied to the kinematics solver for a given overall level.
fn kinematics_level(min_level: LevelFilter) -> LevelFilter {
    match min_level {
        LevelFilter::Trace => LevelFilter::Trace,
        l => l.min(LevelFilter::Info),
    }
}

/// Plain three letter tag of a log level
fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRC",
        Level::Debug => "DBG",
        Level::Info => "INF",
        Level::Warn => "WRN",
        Level::Error => "ERR",
    }
}

/// Level tag coloured for the terminal
fn coloured_tag(level: Level) -> ColoredString {
    let tag = level_tag(level);

    match level {
        Level::Trace => tag.dimmed().italic(),
        Level::Debug => tag.dimmed(),
        Level::Info => tag.normal(),
        Level::Warn => tag.yellow(),
        Level::Error => tag.red().bold(),
    }
}

/// Debug and trace records are prefixed with their target.
fn with_target(level: Level, target: &str, message: &std::fmt::Arguments) -> String {
    if level > Level::Info {
        format!("{}: {}", target, message)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_rejects_quiet_levels() {
        let session = session::Session {
            session_root: PathBuf::from("unused"),
            log_file_path: PathBuf::from("unused/unused.log"),
        };

        for level in [LevelFilter::Off, LevelFilter::Error, LevelFilter::Warn].iter() {
            assert!(matches!(
                logger_init(*level, &session),
                Err(LoggerInitError::InvalidMinLogLevel(l)) if l == *level
            ));
        }
    }

    #[test]
    fn test_kinematics_level() {
        assert_eq!(kinematics_level(LevelFilter::Trace), LevelFilter::Trace);
        assert_eq!(kinematics_level(LevelFilter::Debug), LevelFilter::Info);
        assert_eq!(kinematics_level(LevelFilter::Info), LevelFilter::Info);
    }

    #[test]
    fn test_targets_only_on_verbose_levels() {
        assert_eq!(
            with_target(Level::Debug, "hex_lib::leg", &format_args!("moved {}", 1)),
            "hex_lib::leg: moved 1"
        );
        assert_eq!(
            with_target(Level::Warn, "hex_lib::leg", &format_args!("held")),
            "held"
        );
        assert_eq!(level_tag(Level::Warn), "WRN");
    }
}
