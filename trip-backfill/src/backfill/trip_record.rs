use serde::{Deserialize, Serialize};

/// the first and last observed timestamp of a trip, taken from a contiguous
/// run of `stop_times.txt` rows sharing the same trip_id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    /// GTFS trip identifier
    pub trip_id: String,
    /// arrival time of the first row in the run, as written in the source (HH:MM:SS)
    pub start_time: String,
    /// arrival time of the last row in the run, as written in the source (HH:MM:SS)
    pub end_time: String,
    /// name of the dataset directory that wrote this record
    pub dataset: String,
}
