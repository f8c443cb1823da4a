//! reads every GTFS dataset under a directory, indexes the first and last
//! arrival time of each trip, and writes the durations of a list of
//! requested trips to a CSV file.
use clap::Parser;
use env_logger::{Env, Target};
use trip_backfill::backfill::app::BackfillApp;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();
    let args = BackfillApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
