use std::path::Path;

use clap::{ArgAction, Args, Command, FromArgMatches as _};

use crate::error::LogError;
use crate::facility::{facilities, register_cluster_facilities, set_facility_log_level};
use crate::log::{info, registered_facilities};
use crate::settings::{set_everything, LogSettings};

/// Default cli arguments for the cluster log runner
#[derive(Args, Debug, Default)]
pub struct BaseArgs {
    /// Optional path for a JSON log settings file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Log levels to apply, e.g. `INFO` or `consensus=DEBUG,raft=INFO`. A bare level
    /// applies to every facility
    #[arg(short, long, default_value = "")]
    pub log_level: String,

    /// Raise every facility's verbosity: `-v` for INFO, `-vv` for DEBUG
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the cluster's logging facilities and exit
    #[arg(long)]
    pub list_facilities: bool,
}

#[derive(Args)]
pub struct PlaceholderCustom {}

fn create_cluster_log_cli() -> Command {
    let cli = Command::new("cluster-log");
    BaseArgs::augment_args(cli)
}

/// Runs a program with custom cli arguments.
///
/// # Parameters
/// - `setup_fn`: A function that takes a `BaseArgs` struct and an `Option<A>` where A is
///   the custom cli arguments struct. It is called once logging is configured.
///
/// # Errors
/// Returns an error if argument parsing, applying the log levels or the setup function fails
pub fn run_with_custom_args<A, F>(setup_fn: F) -> Result<(), Box<dyn std::error::Error>>
where
    A: Args,
    F: Fn(BaseArgs, Option<A>) -> Result<(), LogError>,
{
    let mut cli = create_cluster_log_cli();
    cli = A::augment_args(cli);
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    let custom_matches = A::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, Some(custom_matches), setup_fn)
}

/// Runs a program with default cli arguments.
///
/// # Errors
/// Returns an error if argument parsing, applying the log levels or the setup function fails
pub fn run_with_args<F>(setup_fn: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(BaseArgs, Option<PlaceholderCustom>) -> Result<(), LogError>,
{
    let cli = create_cluster_log_cli();
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, None, setup_fn)
}

fn run_with_args_internal<A, F>(
    args: BaseArgs,
    custom_args: Option<A>,
    setup_fn: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(BaseArgs, Option<A>) -> Result<(), LogError>,
{
    if args.list_facilities {
        for facility in facilities() {
            println!("{facility}");
        }
        return Ok(());
    }

    configure_logging(&args)?;

    for facility_config in registered_facilities() {
        println!(
            "Logging enabled for {} at level {}",
            facility_config.facility, facility_config.level
        );
    }

    // Run the provided Fn
    setup_fn(args, custom_args)?;
    Ok(())
}

/// Registers the cluster facilities and applies, in order, the config file, the
/// verbosity flag and the `--log-level` list.
fn configure_logging(args: &BaseArgs) -> Result<(), LogError> {
    register_cluster_facilities()?;

    // Optionally apply log settings from a file
    if !args.config.is_empty() {
        println!("Loading log settings from: {}", args.config);
        LogSettings::from_file(Path::new(&args.config))?.apply()?;
    }

    match args.verbose {
        0 => {}
        1 => set_everything("INFO")?,
        _ => set_everything("DEBUG")?,
    }

    apply_log_level_list(&args.log_level)?;
    info!("Logging configured");
    Ok(())
}

/// Applies a comma separated list of `LEVEL` or `facility=LEVEL` items.
///
/// # Errors
/// The first error reported by the logging backend.
pub fn apply_log_level_list(list: &str) -> Result<(), LogError> {
    for item in list.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        match item.split_once('=') {
            Some((facility, level)) => set_facility_log_level(facility.trim(), level.trim())?,
            None => set_everything(item)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::tests::serial;
    use crate::log::{default_log_level, get_log_level, set_default_log_level, Level};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Args, Debug)]
    struct CustomArgs {
        #[arg(short, long, default_value = "0")]
        field: u32,
    }

    fn reset_levels() {
        apply_log_level_list("ERROR").unwrap();
        set_default_log_level(Level::Error).unwrap();
    }

    #[test]
    fn test_apply_log_level_list() {
        let _guard = serial();
        register_cluster_facilities().unwrap();
        apply_log_level_list(" consensus=DEBUG, raft = info ,").unwrap();
        assert_eq!(get_log_level("consensus"), Some(Level::Debug));
        assert_eq!(get_log_level("raft"), Some(Level::Info));
        reset_levels();
    }

    #[test]
    fn test_apply_log_level_list_bare_level() {
        let _guard = serial();
        register_cluster_facilities().unwrap();
        apply_log_level_list("WARNING,monitor=DEBUG").unwrap();
        assert_eq!(default_log_level(), Level::Warning);
        assert_eq!(get_log_level("cluster"), Some(Level::Warning));
        assert_eq!(get_log_level("monitor"), Some(Level::Debug));
        reset_levels();
    }

    #[test]
    fn test_apply_log_level_list_errors() {
        let _guard = serial();
        register_cluster_facilities().unwrap();
        assert!(matches!(
            apply_log_level_list("bogus=DEBUG"),
            Err(LogError::NoSuchLogger(_))
        ));
        assert!(matches!(
            apply_log_level_list("cluster=LOUD"),
            Err(LogError::InvalidLevel(_))
        ));
        assert!(matches!(
            apply_log_level_list("LOUD"),
            Err(LogError::InvalidLevel(_))
        ));
    }

    #[test]
    fn test_run_with_verbosity() {
        let _guard = serial();
        let test_args = BaseArgs {
            verbose: 2,
            ..BaseArgs::default()
        };
        let result = run_with_args_internal(test_args, None, |_, _: Option<()>| {
            assert_eq!(get_log_level("pintracker"), Some(Level::Debug));
            Ok(())
        });
        assert!(result.is_ok());
        reset_levels();
    }

    #[test]
    fn test_log_level_overrides_config_and_verbosity() {
        let _guard = serial();
        let mut config = NamedTempFile::new().unwrap();
        config
            .write_all(br#"{"facilities": {"diskinfo": "CRITICAL", "restapi": "NOTICE"}}"#)
            .unwrap();
        let test_args = BaseArgs {
            config: config.path().to_string_lossy().to_string(),
            log_level: "diskinfo=WARNING".to_string(),
            verbose: 1,
            list_facilities: false,
        };
        let result = run_with_args_internal(test_args, None, |_, _: Option<()>| {
            assert_eq!(get_log_level("diskinfo"), Some(Level::Warning));
            // `-v` comes after the config file.
            assert_eq!(get_log_level("restapi"), Some(Level::Info));
            Ok(())
        });
        assert!(result.is_ok());
        reset_levels();
    }

    #[test]
    fn test_run_with_bad_log_level() {
        let _guard = serial();
        let test_args = BaseArgs {
            log_level: "consensus=CHATTY".to_string(),
            ..BaseArgs::default()
        };
        let result = run_with_args_internal(test_args, None, |_, _: Option<()>| {
            panic!("setup must not run");
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_list_facilities_skips_setup() {
        let test_args = BaseArgs {
            list_facilities: true,
            ..BaseArgs::default()
        };
        let result = run_with_args_internal(test_args, None, |_, _: Option<()>| {
            panic!("setup must not run");
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_with_custom() {
        let _guard = serial();
        let custom = CustomArgs { field: 42 };
        let result = run_with_args_internal(BaseArgs::default(), Some(custom), |_, c| {
            assert_eq!(c.unwrap().field, 42);
            Ok(())
        });
        assert!(result.is_ok());
    }
}
