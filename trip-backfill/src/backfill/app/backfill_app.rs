use super::BackfillOperation;
use clap::Parser;

/// command line tool for backfilling trip durations from GTFS stop times
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct BackfillApp {
    #[command(subcommand)]
    pub op: BackfillOperation,
}
