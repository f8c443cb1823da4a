//! wall-clock duration arithmetic for indexed trips. times carry no date, so
//! both ends of a trip are assumed to fall on the same service day and
//! [`MidnightRolloverPolicy`] decides what to report when they do not.
use chrono::NaiveTime;

use super::{BackfillError, MidnightRolloverPolicy, TripIndex, TripRecord};

pub const GTFS_TIME_FORMAT: &str = "%H:%M:%S";

/// elapsed seconds between the first and last observed time of a trip.
///
/// # Errors
///
/// fails if `trip_id` is not in the index. callers that want to skip
/// unknown trips should check [`TripIndex::contains`] first.
pub fn trip_duration(
    index: &TripIndex,
    trip_id: &str,
    policy: &MidnightRolloverPolicy,
) -> Result<i64, BackfillError> {
    let record = index
        .get(trip_id)
        .ok_or_else(|| BackfillError::TripNotFoundError(trip_id.to_string()))?;
    record_duration(record, policy)
}

/// elapsed seconds between the start and end time of a single record.
pub fn record_duration(
    record: &TripRecord,
    policy: &MidnightRolloverPolicy,
) -> Result<i64, BackfillError> {
    let start = parse_time(&record.trip_id, &record.start_time)?;
    let end = parse_time(&record.trip_id, &record.end_time)?;
    let elapsed = end.signed_duration_since(start).num_seconds();
    Ok(policy.apply(elapsed))
}

fn parse_time(trip_id: &str, value: &str) -> Result<NaiveTime, BackfillError> {
    NaiveTime::parse_from_str(value, GTFS_TIME_FORMAT).map_err(|source| {
        BackfillError::TimeParseError {
            trip_id: trip_id.to_string(),
            value: value.to_string(),
            source,
        }
    })
}
