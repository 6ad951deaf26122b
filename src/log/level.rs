//! Severity levels understood by the logging backend.

use std::str::FromStr;

use log::LevelFilter;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::LogError;

/// A severity on the scale CRITICAL > ERROR > WARNING > NOTICE > INFO > DEBUG.
///
/// Variants are declared from most to least severe, so `Level::Critical < Level::Debug`
/// in the derived ordering means "more severe". A facility set to some level emits every
/// record at that level or a more severe one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Level {
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Level {
    /// Parses a level token case-insensitively.
    ///
    /// # Errors
    /// Returns `LogError::InvalidLevel` if `token` names no known severity.
    pub fn parse(token: &str) -> Result<Self, LogError> {
        Level::from_str(token).map_err(|_| LogError::InvalidLevel(token.to_string()))
    }

    /// The `log` crate filter that enforces this level. `log` has no critical or notice
    /// severities, so those share a filter with their neighbors.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Level::Critical | Level::Error => LevelFilter::Error,
            Level::Warning => LevelFilter::Warn,
            Level::Notice | Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
        }
    }

    /// All levels, most severe first.
    pub fn all() -> impl Iterator<Item = Level> {
        Level::iter()
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        level.to_level_filter()
    }
}

#[cfg(test)]
mod tests {
    use super::Level;
    use crate::error::LogError;
    use log::LevelFilter;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Level::parse("DEBUG").unwrap(), Level::Debug);
        assert_eq!(Level::parse("debug").unwrap(), Level::Debug);
        assert_eq!(Level::parse("Warning").unwrap(), Level::Warning);
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert!(matches!(
            Level::parse("TRACE"),
            Err(LogError::InvalidLevel(ref token)) if token == "TRACE"
        ));
        assert!(Level::parse("").is_err());
        // Only case is ignored, surrounding whitespace is not.
        assert!(Level::parse(" DEBUG ").is_err());
    }

    #[test]
    fn test_display_is_upper_case() {
        let tokens: Vec<String> = Level::all().map(|level| level.to_string()).collect();
        assert_eq!(
            tokens,
            ["CRITICAL", "ERROR", "WARNING", "NOTICE", "INFO", "DEBUG"]
        );
    }

    #[test]
    fn test_ordering_runs_from_most_severe() {
        assert!(Level::Critical < Level::Error);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(Level::Critical.to_level_filter(), LevelFilter::Error);
        assert_eq!(Level::Notice.to_level_filter(), LevelFilter::Info);
        assert_eq!(LevelFilter::from(Level::Debug), LevelFilter::Debug);
    }
}
