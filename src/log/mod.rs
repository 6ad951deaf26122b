//! The `log` module is the logging backend for the cluster's named facilities. Every
//! subsystem (consensus, the REST API, the pin tracker, ...) emits its records under a
//! facility name, used as the `log` *target*:
//!
//! ```rust
//! use cluster_log::log::{debug, register_facility};
//!
//! pub fn start_consensus() {
//!     register_facility("consensus").ok();
//!     debug!(target: "consensus", "consensus is starting");
//! }
//! ```
//!
//! Each registered facility carries its own [`Level`]. Facilities start at the default
//! level (`ERROR`) and can be changed independently at runtime with [`set_log_level()`]:
//!
//! ```rust
//! use cluster_log::log::{get_log_level, register_facility, set_log_level, Level};
//!
//! pub fn chatty_consensus() {
//!     register_facility("consensus").unwrap();
//!     set_log_level("consensus", "DEBUG").unwrap();
//!     assert_eq!(get_log_level("consensus"), Some(Level::Debug));
//! }
//! ```
//!
//! The level state lives in a [`LogConfiguration`], which can be built and queried on its
//! own. The free functions in this module operate on a single process-wide configuration
//! and reinstall the global logger whenever it changes.
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

mod level;

pub use level::Level;
pub use log::{debug, error, info, trace, warn, LevelFilter};

use indexmap::IndexMap;
#[cfg(feature = "logging")]
use log4rs::Handle;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use crate::error::LogError;

/// Level given to facilities that have not been set explicitly.
pub const DEFAULT_LOG_LEVEL: Level = Level::Error;

/// Passing this as the facility name to [`set_log_level()`] sets every registered facility.
pub const ALL_FACILITIES: &str = "*";

/// A global instance of the logging backend.
static LOG_BACKEND: LazyLock<Mutex<LogBackend>> = LazyLock::new(Mutex::default);

/// The level a single facility ("target") is filtered at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityLogConfiguration {
    /// The facility this configuration applies to
    pub facility: String,
    /// The least severe level the facility emits
    pub level: Level,
}

impl From<(&str, Level)> for FacilityLogConfiguration {
    fn from((facility, level): (&str, Level)) -> Self {
        Self {
            facility: facility.to_string(),
            level,
        }
    }
}

/// Per-facility level state.
///
/// A facility must be registered before its level can be set. This mirrors subsystems
/// obtaining their logger at startup: asking to change a logger nobody created is an
/// error, and leaves every other facility untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfiguration {
    /// Level for targets that do not belong to a registered facility.
    default_level: Level,
    /// Registered facilities, in registration order.
    facility_configurations: IndexMap<String, FacilityLogConfiguration>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL)
    }
}

impl LogConfiguration {
    pub fn new(default_level: Level) -> Self {
        Self {
            default_level,
            facility_configurations: IndexMap::new(),
        }
    }

    pub fn default_level(&self) -> Level {
        self.default_level
    }

    /// Returns true if the configuration was mutated, false otherwise.
    pub fn set_default_level(&mut self, level: Level) -> bool {
        let mutated = self.default_level != level;
        self.default_level = level;
        mutated
    }

    /// Makes `facility` known to the backend at the default level. A facility that is
    /// already registered keeps its current level.
    ///
    /// Returns true if the facility was newly registered.
    ///
    /// # Errors
    /// `LogError::InvalidFacility` if `facility` cannot name a logger: it is empty, is the
    /// [`ALL_FACILITIES`] wildcard, or has an empty `::` segment. Nothing is registered.
    pub fn register_facility(&mut self, facility: &str) -> Result<bool, LogError> {
        if self.is_registered(facility) {
            return Ok(false);
        }
        if !is_valid_facility_name(facility) {
            return Err(LogError::InvalidFacility(facility.to_string()));
        }
        self.facility_configurations
            .insert(facility.to_string(), (facility, self.default_level).into());
        Ok(true)
    }

    pub fn is_registered(&self, facility: &str) -> bool {
        self.facility_configurations.contains_key(facility)
    }

    /// Sets `facility` to the level named by `level`. The facility [`ALL_FACILITIES`]
    /// sets every registered facility.
    ///
    /// Returns true if the configuration was mutated, false otherwise.
    ///
    /// # Errors
    /// - `LogError::InvalidLevel` if `level` is not a known severity. This is checked first.
    /// - `LogError::NoSuchLogger` if `facility` was never registered.
    ///
    /// On error nothing is changed.
    pub fn set_level(&mut self, facility: &str, level: &str) -> Result<bool, LogError> {
        let level = Level::parse(level)?;
        if facility == ALL_FACILITIES {
            return Ok(self.set_all_levels(level));
        }
        match self.facility_configurations.get_mut(facility) {
            None => Err(LogError::NoSuchLogger(facility.to_string())),
            Some(facility_config) if facility_config.level == level => Ok(false),
            Some(facility_config) => {
                facility_config.level = level;
                Ok(true)
            }
        }
    }

    /// Sets every registered facility to `level`. Returns true if anything changed.
    pub fn set_all_levels(&mut self, level: Level) -> bool {
        let mut mutated = false;
        for facility_config in self.facility_configurations.values_mut() {
            mutated |= facility_config.level != level;
            facility_config.level = level;
        }
        mutated
    }

    /// The current level of `facility`, or `None` if it is not registered.
    pub fn level(&self, facility: &str) -> Option<Level> {
        self.facility_configurations
            .get(facility)
            .map(|facility_config| facility_config.level)
    }

    /// Registered facilities and their levels, in registration order.
    pub fn facilities(&self) -> impl Iterator<Item = &FacilityLogConfiguration> {
        self.facility_configurations.values()
    }

    /// Whether a record at `level` with the given `target` passes the filter.
    ///
    /// This models the matching the installed `log4rs` config performs, one logger per
    /// facility under a root at the default level, so it answers the same way without
    /// going through the global logger. A target belongs to a facility if it equals the facility name or is nested under
    /// it (`consensus::raft` belongs to `consensus`). The longest match wins. Targets of
    /// no facility are filtered at the default level.
    pub fn enabled(&self, target: &str, level: log::Level) -> bool {
        let threshold = self
            .facility_configurations
            .values()
            .filter(|facility_config| target_in_facility(target, &facility_config.facility))
            .max_by_key(|facility_config| facility_config.facility.len())
            .map_or(self.default_level, |facility_config| facility_config.level);
        level <= threshold.to_level_filter()
    }
}

/// Logger names are `::`-separated paths with no empty segment.
fn is_valid_facility_name(facility: &str) -> bool {
    facility != ALL_FACILITIES && facility.split("::").all(|segment| !segment.is_empty())
}

fn target_in_facility(target: &str, facility: &str) -> bool {
    match target.strip_prefix(facility) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

/// The process-wide backend: the level state plus whatever is needed to keep the
/// installed global logger in sync with it.
#[derive(Debug, Default)]
pub(in crate::log) struct LogBackend {
    pub(in crate::log) configuration: LogConfiguration,

    #[cfg(feature = "logging")]
    /// Handle to the `log4rs` logger.
    root_handle: Option<Handle>,

    #[cfg(not(feature = "logging"))]
    installed: bool,
}

impl LogBackend {
    /// Applies `change` to a copy of the configuration and installs the copy. The stored
    /// configuration is only replaced once the installed logger agrees with it, so a
    /// failure at any step leaves every level as it was.
    fn update<F>(&mut self, change: F) -> Result<(), LogError>
    where
        F: FnOnce(&mut LogConfiguration) -> Result<bool, LogError>,
    {
        let mut candidate = self.configuration.clone();
        let mutated = change(&mut candidate)?;
        if mutated || !self.is_installed() {
            self.install(&candidate)?;
        }
        self.configuration = candidate;
        Ok(())
    }

    fn register_facilities(&mut self, facilities: &[&str]) -> Result<(), LogError> {
        self.update(|config| {
            let mut mutated = false;
            for facility in facilities {
                mutated |= config.register_facility(facility)?;
            }
            Ok(mutated)
        })
    }

    fn set_level(&mut self, facility: &str, level: &str) -> Result<(), LogError> {
        self.update(|config| config.set_level(facility, level))?;
        trace!("Set level of {} to {}", facility, level);
        Ok(())
    }

    fn set_default_level(&mut self, level: Level) -> Result<(), LogError> {
        self.update(|config| Ok(config.set_default_level(level)))
    }
}

// The public API

/// Registers every facility in `facilities` and installs the global logger if it is not
/// installed yet. Either every facility is registered or none is.
///
/// # Errors
/// `LogError::InvalidFacility` for a name that cannot be a logger, `LogError::LoggerInit`
/// if the global logger cannot be installed.
pub fn register_facilities(facilities: &[&str]) -> Result<(), LogError> {
    get_log_backend().register_facilities(facilities)
}

/// Registers a single facility. See [`register_facilities()`].
///
/// # Errors
/// `LogError::InvalidFacility` or `LogError::LoggerInit`, as for [`register_facilities()`].
pub fn register_facility(facility: &str) -> Result<(), LogError> {
    register_facilities(&[facility])
}

/// Sets the level of a registered facility, or of all of them with [`ALL_FACILITIES`].
///
/// # Errors
/// `LogError::InvalidLevel` for an unknown level token, `LogError::NoSuchLogger` for an
/// unregistered facility, `LogError::LoggerInit` if the global logger rejects the new
/// config. None of them changes any level.
pub fn set_log_level(facility: &str, level: &str) -> Result<(), LogError> {
    get_log_backend().set_level(facility, level)
}

/// Whether the installed configuration lets a record at `level` through for `target`.
pub fn log_enabled(target: &str, level: log::Level) -> bool {
    get_log_backend().configuration.enabled(target, level)
}

/// The current level of `facility`, or `None` if it is not registered.
pub fn get_log_level(facility: &str) -> Option<Level> {
    get_log_backend().configuration.level(facility)
}

/// Sets the level applied to targets outside every registered facility.
///
/// # Errors
/// Returns `LogError::LoggerInit` if the global logger cannot be reconfigured.
pub fn set_default_log_level(level: Level) -> Result<(), LogError> {
    get_log_backend().set_default_level(level)
}

pub fn default_log_level() -> Level {
    get_log_backend().configuration.default_level()
}

/// Registered facilities and their current levels, in registration order.
pub fn registered_facilities() -> Vec<FacilityLogConfiguration> {
    get_log_backend().configuration.facilities().cloned().collect()
}

/// A snapshot of the process-wide configuration.
pub fn log_configuration() -> LogConfiguration {
    get_log_backend().configuration.clone()
}

/// Fetches the global `LogBackend`. A panic while the lock was held cannot leave the level
/// map half-written, so a poisoned lock is recovered.
fn get_log_backend() -> MutexGuard<'static, LogBackend> {
    LOG_BACKEND.lock().unwrap_or_else(PoisonError::into_inner)
}
