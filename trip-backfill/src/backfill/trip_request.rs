use std::path::Path;

use serde_json::Value;

use super::BackfillError;

/// default key of the trip identifier in each entry of the trips file.
pub const DEFAULT_TRIP_ID_KEY: &str = "Trip ID";

/// a trip we were asked to backfill a duration for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    pub trip_id: String,
}

impl TripRequest {
    /// reads a JSON array of objects, taking the trip id of each object from
    /// `trip_id_key`. trip ids may be JSON strings or numbers.
    pub fn read_json_file(
        trips_file: &Path,
        trip_id_key: &str,
    ) -> Result<Vec<TripRequest>, BackfillError> {
        let filepath = trips_file.display().to_string();
        let contents =
            std::fs::read_to_string(trips_file).map_err(|source| BackfillError::ReadError {
                filepath: filepath.clone(),
                source,
            })?;
        let entries: Vec<Value> = serde_json::from_str(&contents)
            .map_err(|source| BackfillError::TripsFileError { filepath, source })?;
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| TripRequest::from_json(index, entry, trip_id_key))
            .collect::<Result<Vec<_>, _>>()
    }

    fn from_json(index: usize, entry: &Value, trip_id_key: &str) -> Result<Self, BackfillError> {
        let value = entry
            .get(trip_id_key)
            .ok_or_else(|| BackfillError::MissingTripIdKeyError {
                index,
                key: trip_id_key.to_string(),
            })?;
        let trip_id = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(BackfillError::InvalidTripIdError {
                    index,
                    value: other.to_string(),
                })
            }
        };
        Ok(Self { trip_id })
    }
}

#[cfg(test)]
mod test {
    use super::{TripRequest, DEFAULT_TRIP_ID_KEY};
    use crate::backfill::BackfillError;
    use std::io::Write;

    fn read(contents: &str) -> Result<Vec<TripRequest>, BackfillError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        TripRequest::read_json_file(file.path(), DEFAULT_TRIP_ID_KEY)
    }

    #[test]
    fn test_string_and_numeric_trip_ids() {
        let requests = read(r#"[{"Trip ID": "T1", "School": "A"}, {"Trip ID": 45012345}]"#)
            .expect("should read");
        let trip_ids = requests.iter().map(|r| r.trip_id.as_str()).collect::<Vec<_>>();
        assert_eq!(trip_ids, vec!["T1", "45012345"]);
    }

    #[test]
    fn test_missing_key_fails() {
        match read(r#"[{"Trip ID": "T1"}, {"trip": "T2"}]"#) {
            Err(BackfillError::MissingTripIdKeyError { index, key }) => {
                assert_eq!(index, 1);
                assert_eq!(key, "Trip ID");
            }
            other => panic!("expected MissingTripIdKeyError, found {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_value_fails() {
        let result = read(r#"[{"Trip ID": null}]"#);
        assert!(matches!(
            result,
            Err(BackfillError::InvalidTripIdError { index: 0, .. })
        ));
    }

    #[test]
    fn test_bad_json_fails() {
        let result = read(r#"{"Trip ID": "T1"}"#);
        assert!(matches!(result, Err(BackfillError::TripsFileError { .. })));
    }
}
