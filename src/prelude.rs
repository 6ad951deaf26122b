pub use crate::error::LogError;
pub use crate::facility::{
    facilities, register_cluster_facilities, set_facility_log_level, FACILITIES,
};
pub use crate::log::{
    debug, error, get_log_level, info, register_facility, trace, warn, Level, LogConfiguration,
};
pub use crate::runner::{run_with_args, run_with_custom_args, BaseArgs};
pub use crate::settings::LogSettings;
