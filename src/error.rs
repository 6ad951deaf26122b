use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `LogError` and maps other errors to
/// convert to a `LogError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum LogError {
    /// The backend has no logger registered under this facility name.
    NoSuchLogger(String),
    /// The name cannot be used as a logger name.
    InvalidFacility(String),
    /// The level token is not one of the known severities.
    InvalidLevel(String),
    /// The global logger could not be installed or reconfigured.
    LoggerInit(String),
    IoError(io::Error),
    JsonError(serde_json::Error),
    LogError(String),
}

impl From<io::Error> for LogError {
    fn from(error: io::Error) -> Self {
        LogError::IoError(error)
    }
}

impl From<serde_json::Error> for LogError {
    fn from(error: serde_json::Error) -> Self {
        LogError::JsonError(error)
    }
}

impl From<String> for LogError {
    fn from(error: String) -> Self {
        LogError::LogError(error)
    }
}

impl From<&str> for LogError {
    fn from(error: &str) -> Self {
        LogError::LogError(error.to_string())
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::IoError(error) => Some(error),
            LogError::JsonError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogError::NoSuchLogger(facility) => write!(f, "Error: No such logger: {facility}"),
            LogError::InvalidFacility(facility) => {
                write!(f, "Error: invalid logger name: {facility:?}")
            }
            LogError::InvalidLevel(level) => write!(f, "logger: invalid log level: {level}"),
            LogError::LoggerInit(message) => write!(f, "failed to set logger: {message}"),
            _ => write!(f, "Error: {self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogError;

    #[test]
    fn test_display_names_the_facility() {
        let error = LogError::NoSuchLogger("bogus".to_string());
        assert_eq!(error.to_string(), "Error: No such logger: bogus");
    }

    #[test]
    fn test_from_str() {
        let error: LogError = "boom".into();
        assert!(matches!(error, LogError::LogError(ref s) if s == "boom"));
    }
}
