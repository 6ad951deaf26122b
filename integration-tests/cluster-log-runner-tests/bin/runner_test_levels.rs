use cluster_log::facilities;
use cluster_log::log::{debug, error, info, warn};
use cluster_log::runner::run_with_args;

fn main() {
    let result = run_with_args(|_args, _| {
        for &facility in facilities() {
            error!(target: facility, "An ERROR message from {}", facility);
            warn!(target: facility, "A WARNING message from {}", facility);
            info!(target: facility, "An INFO message from {}", facility);
            debug!(target: facility, "A DEBUG message from {}", facility);
        }
        Ok(())
    });
    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
