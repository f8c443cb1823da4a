use config::{Config, FileFormat, Value};
use serde::{Deserialize, Serialize};

use super::{trip_request::DEFAULT_TRIP_ID_KEY, BackfillError, MidnightRolloverPolicy};

/// settings for a backfill run. any field missing from the configuration
/// sources takes its [`Default`] value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BackfillConfig {
    /// directory containing one subdirectory per GTFS dataset
    pub gtfs_directory: String,
    /// JSON array of objects naming the trips to backfill
    pub trips_file: String,
    /// key of the trip identifier in each object of the trips file
    pub trip_id_key: String,
    /// CSV file receiving one row per resolved trip
    pub output_file: String,
    /// name of the stop times file inside each dataset directory
    pub stop_times_filename: String,
    pub midnight_rollover: MidnightRolloverPolicy,
    /// replace an existing output file
    pub overwrite: bool,
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            gtfs_directory: String::from("./GTFS"),
            trips_file: String::from("./existing_school_trips.json"),
            trip_id_key: String::from(DEFAULT_TRIP_ID_KEY),
            output_file: String::from("./backfill_trips.csv"),
            stop_times_filename: String::from("stop_times.txt"),
            midnight_rollover: MidnightRolloverPolicy::default(),
            overwrite: true,
        }
    }
}

impl BackfillConfig {
    /// builds a configuration from an optional TOML file with `overrides`
    /// (typically command line arguments) taking precedence over the file.
    /// `None` overrides are ignored.
    pub fn load(
        config_file: Option<&str>,
        overrides: Vec<(&str, Option<Value>)>,
    ) -> Result<BackfillConfig, BackfillError> {
        let mut builder = Config::builder();
        if let Some(filepath) = config_file {
            builder = builder.add_source(config::File::new(filepath, FileFormat::Toml));
        }
        for (key, value) in overrides {
            builder = builder.set_override_option(key, value).map_err(|e| {
                BackfillError::ConfigReadError {
                    msg: format!("failed setting '{key}'"),
                    source: e,
                }
            })?;
        }
        let config = builder
            .build()
            .map_err(|e| BackfillError::ConfigReadError {
                msg: match config_file {
                    Some(filepath) => format!("failed reading '{filepath}'"),
                    None => String::from("failed building configuration"),
                },
                source: e,
            })?;
        config
            .try_deserialize::<BackfillConfig>()
            .map_err(|e| BackfillError::ConfigReadError {
                msg: String::from("failed deserializing backfill configuration"),
                source: e,
            })
    }
}
