use clap::Args;
use cluster_log::runner::run_with_custom_args;
use cluster_log::set_facility_log_level;

#[derive(Args, Debug)]
struct Extra {
    /// Facility to switch to DEBUG after startup
    #[arg(short, long)]
    debug_facility: Option<String>,
}

fn main() {
    run_with_custom_args(|_args, extra: Option<Extra>| {
        if let Some(facility) = extra.and_then(|extra| extra.debug_facility) {
            set_facility_log_level(&facility, "DEBUG")?;
            println!("{facility} switched to DEBUG");
        }
        Ok(())
    })
    .unwrap();
}
