use log4rs::append::console::ConsoleAppender;
use log4rs::config::runtime::ConfigBuilder;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

use crate::error::LogError;
use crate::log::{FacilityLogConfiguration, LogBackend, LogConfiguration};

// Use an ISO 8601 timestamp format and color coded level tag
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

impl From<&FacilityLogConfiguration> for Logger {
    fn from(facility_config: &FacilityLogConfiguration) -> Self {
        Logger::builder().build(
            facility_config.facility.clone(),
            facility_config.level.to_level_filter(),
        )
    }
}

impl LogBackend {
    /// Builds a `log4rs` config with one logger per registered facility.
    fn build_config(configuration: &LogConfiguration) -> Result<Config, LogError> {
        let encoder = Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN));
        let stdout: ConsoleAppender = ConsoleAppender::builder().encoder(encoder).build();
        let mut config: ConfigBuilder =
            Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));

        // Add facility specific configuration
        for facility_config in configuration.facilities() {
            config = config.logger(facility_config.into());
        }

        // The `Root` covers every target outside a registered facility
        let root = Root::builder()
            .appender("stdout")
            .build(configuration.default_level().to_level_filter());
        config
            .build(root)
            .map_err(|e| LogError::LoggerInit(format!("failed to build config: {e}")))
    }

    /// Sets the global logger to conform to `configuration`.
    pub(in crate::log) fn install(
        &mut self,
        configuration: &LogConfiguration,
    ) -> Result<(), LogError> {
        let new_config = Self::build_config(configuration)?;

        match self.root_handle {
            Some(ref mut handle) => {
                // The global logger has already been initialized
                handle.set_config(new_config);
            }

            None => {
                // The global logger has not yet been initialized
                let handle = log4rs::init_config(new_config)
                    .map_err(|e| LogError::LoggerInit(e.to_string()))?;
                self.root_handle = Some(handle);
            }
        }
        Ok(())
    }

    pub(in crate::log) fn is_installed(&self) -> bool {
        self.root_handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::log::{Level, LogBackend, LogConfiguration};

    #[test]
    fn test_build_config_has_a_logger_per_facility() {
        let mut configuration = LogConfiguration::default();
        configuration.register_facility("consensus").unwrap();
        configuration.register_facility("raft").unwrap();
        configuration.set_level("consensus", "DEBUG").unwrap();
        configuration.set_default_level(Level::Warning);

        let config = LogBackend::build_config(&configuration).unwrap();
        let mut loggers: Vec<(&str, log::LevelFilter)> = config
            .loggers()
            .iter()
            .map(|logger| (logger.name(), logger.level()))
            .collect();
        loggers.sort_unstable();
        assert_eq!(
            loggers,
            [
                ("consensus", log::LevelFilter::Debug),
                ("raft", log::LevelFilter::Warn),
            ]
        );
        assert_eq!(config.root().level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_build_config_accepts_nested_facilities() {
        let mut configuration = LogConfiguration::default();
        configuration.register_facility("consensus").unwrap();
        configuration.register_facility("consensus::raft").unwrap();
        assert!(LogBackend::build_config(&configuration).is_ok());
    }
}
