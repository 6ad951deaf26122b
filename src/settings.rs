//! Log settings loaded from a JSON config file:
//!
//! ```json
//! {
//!     "level": "WARNING",
//!     "facilities": {
//!         "consensus": "DEBUG",
//!         "raft": "INFO"
//!     }
//! }
//! ```
//!
//! `level` applies to every registered facility and to targets outside them. Entries in
//! `facilities` are then applied one by one, in file order, through
//! [`set_facility_log_level()`](crate::facility::set_facility_log_level).
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::LogError;
use crate::facility::set_facility_log_level;
use crate::log::{set_default_log_level, set_log_level, Level, ALL_FACILITIES};

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LogSettings {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub facilities: IndexMap<String, String>,
}

impl LogSettings {
    /// Reads settings from the JSON file at `path`.
    ///
    /// # Errors
    /// Returns `LogError::IoError` if the file cannot be opened and `LogError::JsonError`
    /// if it is not a valid settings document.
    pub fn from_file(path: &Path) -> Result<Self, LogError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    /// Applies these settings to the process-wide logging backend. Stops at the first
    /// entry the backend rejects.
    ///
    /// # Errors
    /// `LogError::InvalidLevel` or `LogError::NoSuchLogger` from the backend.
    pub fn apply(&self) -> Result<(), LogError> {
        if let Some(level) = &self.level {
            set_everything(level)?;
        }
        for (facility, level) in &self.facilities {
            set_facility_log_level(facility, level)?;
        }
        Ok(())
    }
}

/// Sets the default level and every registered facility to `level`.
pub(crate) fn set_everything(level: &str) -> Result<(), LogError> {
    let parsed = Level::parse(level)?;
    set_default_log_level(parsed)?;
    set_log_level(ALL_FACILITIES, level)
}
