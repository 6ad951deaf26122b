/*!

This module provides a "logger" that does not output anything anywhere but satisfies the public API.

*/

use crate::error::LogError;
use crate::log::{LogBackend, LogConfiguration};

impl LogBackend {
    /// Sets the global max level to conform to `configuration`.
    pub(in crate::log) fn install(
        &mut self,
        configuration: &LogConfiguration,
    ) -> Result<(), LogError> {
        // No global logger. We still keep up appearances.
        let max_level = configuration
            .facilities()
            .map(|facility_config| facility_config.level)
            .chain(std::iter::once(configuration.default_level()))
            .max()
            .map_or(log::LevelFilter::Off, |level| level.to_level_filter());
        log::set_max_level(max_level);
        self.installed = true;
        Ok(())
    }

    pub(in crate::log) fn is_installed(&self) -> bool {
        self.installed
    }
}
