//! The cluster's logging facilities and the operation that changes their verbosity.
//!
//! [`FACILITIES`] lists one facility per subsystem, in a stable display order. It is
//! purely informational: [`set_facility_log_level()`] hands any name straight to the
//! logging backend, which decides whether it exists.

use crate::error::LogError;

/// Facility names used by the cluster's subsystems.
pub const FACILITIES: [&str; 11] = [
    // Cluster coordination
    "cluster",
    "restapi",
    // HTTP client for the backing store
    "ipfshttp",
    // Peer monitor
    "monitor",
    "mapstate",
    "consensus",
    // Replicated log
    "raft",
    "pintracker",
    // Allocation strategy
    "ascendalloc",
    // Disk usage probe
    "diskinfo",
    "apitypes",
];

/// The facility names, in declared order.
pub fn facilities() -> &'static [&'static str] {
    &FACILITIES
}

/// Registers every facility in [`FACILITIES`] with the logging backend.
///
/// # Errors
/// Returns `LogError::LoggerInit` if the global logger cannot be installed.
pub fn register_cluster_facilities() -> Result<(), LogError> {
    crate::log::register_facilities(&FACILITIES)
}

/// Sets the log level of `facility` to `level` (one of `CRITICAL`, `ERROR`, `WARNING`,
/// `NOTICE`, `INFO`, `DEBUG`).
///
/// Both arguments are forwarded to the logging backend as given.
///
/// # Errors
/// Whatever the backend reports: `LogError::InvalidLevel`, `LogError::NoSuchLogger` or
/// `LogError::LoggerInit`.
pub fn set_facility_log_level(facility: &str, level: &str) -> Result<(), LogError> {
    crate::log::set_log_level(facility, level)
}
