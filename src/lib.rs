//! Per-facility log level control for a distributed pinning cluster.
//!
//! The cluster's diagnostic output is split into named *facilities*, one per subsystem:
//! cluster coordination, the REST API, the backing-store HTTP client, the peer monitor,
//! the state store, consensus, the replicated log, the pin tracker, the allocation
//! strategy, the disk-usage probe and the API types. Each facility has its own severity
//! threshold which can be changed at runtime:
//!
//! ```rust
//! use cluster_log::{register_cluster_facilities, set_facility_log_level};
//! use cluster_log::log::{get_log_level, Level};
//!
//! register_cluster_facilities().unwrap();
//! set_facility_log_level("consensus", "DEBUG").unwrap();
//! assert_eq!(get_log_level("consensus"), Some(Level::Debug));
//! ```
//!
//! * [`facility`] holds the facility registry and the level setter.
//! * [`log`] is the backend that stores levels and drives the installed logger.
//! * [`settings`] and [`runner`] configure levels from a JSON file or the command line.
pub mod error;
pub use error::LogError;

pub mod facility;
pub use facility::{
    facilities, register_cluster_facilities, set_facility_log_level, FACILITIES,
};

pub mod log;
pub mod prelude;
pub mod runner;
pub mod settings;
