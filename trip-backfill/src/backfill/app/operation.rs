use std::path::Path;

use clap::Subcommand;
use config::Value;
use serde::{Deserialize, Serialize};

use crate::backfill::{index_ops, report_ops, BackfillConfig, BackfillError, MidnightRolloverPolicy};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum BackfillOperation {
    /// write start time, end time and duration of each requested trip
    Run {
        /// TOML file with backfill settings, overridden by any arguments below
        #[arg(long)]
        config_file: Option<String>,
        /// directory containing one subdirectory per GTFS dataset [default: ./GTFS]
        #[arg(long)]
        gtfs_directory: Option<String>,
        /// JSON array of trip objects [default: ./existing_school_trips.json]
        #[arg(long)]
        trips_file: Option<String>,
        /// key of the trip identifier in each trip object [default: "Trip ID"]
        #[arg(long)]
        trip_id_key: Option<String>,
        /// output CSV file [default: ./backfill_trips.csv]
        #[arg(long)]
        output_file: Option<String>,
        /// stop times file name within each dataset [default: stop_times.txt]
        #[arg(long)]
        stop_times_filename: Option<String>,
        /// how to report trips that end on the next day [default: wrap]
        #[arg(long, value_enum)]
        midnight_rollover: Option<MidnightRolloverPolicy>,
        /// replace an existing output file [default: true]
        #[arg(long)]
        overwrite: Option<bool>,
    },
    /// write the merged trip index with the dataset that supplied each trip
    Index {
        /// TOML file with backfill settings, overridden by any arguments below
        #[arg(long)]
        config_file: Option<String>,
        /// directory containing one subdirectory per GTFS dataset [default: ./GTFS]
        #[arg(long)]
        gtfs_directory: Option<String>,
        /// stop times file name within each dataset [default: stop_times.txt]
        #[arg(long)]
        stop_times_filename: Option<String>,
        /// output CSV file for the index
        #[arg(long)]
        output_file: String,
        /// replace an existing output file [default: true]
        #[arg(long)]
        overwrite: Option<bool>,
    },
}

impl BackfillOperation {
    pub fn run(&self) -> Result<(), BackfillError> {
        match self {
            BackfillOperation::Run {
                config_file,
                gtfs_directory,
                trips_file,
                trip_id_key,
                output_file,
                stop_times_filename,
                midnight_rollover,
                overwrite,
            } => {
                let config = BackfillConfig::load(
                    config_file.as_deref(),
                    vec![
                        ("gtfs_directory", string_value(gtfs_directory)),
                        ("trips_file", string_value(trips_file)),
                        ("trip_id_key", string_value(trip_id_key)),
                        ("output_file", string_value(output_file)),
                        ("stop_times_filename", string_value(stop_times_filename)),
                        (
                            "midnight_rollover",
                            midnight_rollover.map(|p| Value::from(p.to_string())),
                        ),
                        ("overwrite", overwrite.map(Value::from)),
                    ],
                )?;
                log::debug!("{config:?}");
                report_ops::run_backfill(&config)?;
                Ok(())
            }
            BackfillOperation::Index {
                config_file,
                gtfs_directory,
                stop_times_filename,
                output_file,
                overwrite,
            } => {
                let config = BackfillConfig::load(
                    config_file.as_deref(),
                    vec![
                        ("gtfs_directory", string_value(gtfs_directory)),
                        ("stop_times_filename", string_value(stop_times_filename)),
                        ("overwrite", overwrite.map(Value::from)),
                    ],
                )?;
                log::debug!("{config:?}");
                let index = index_ops::build_index(
                    Path::new(&config.gtfs_directory),
                    &config.stop_times_filename,
                )?;
                report_ops::write_index(&index, Path::new(output_file), config.overwrite)
            }
        }
    }
}

fn string_value(arg: &Option<String>) -> Option<Value> {
    arg.as_ref().map(|s| Value::from(s.as_str()))
}
