use std::fmt::Display;

/// one line of the backfill output: a requested trip with its observed
/// start and end time and the elapsed seconds between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillRow {
    pub trip_id: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: i64,
}

impl BackfillRow {
    /// fields in output column order. the trailing empty field keeps the
    /// trailing comma that consumers of this file expect.
    pub fn to_record(&self) -> [String; 5] {
        [
            self.trip_id.clone(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.duration.to_string(),
            String::new(),
        ]
    }
}

impl Display for BackfillRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},",
            self.trip_id, self.start_time, self.end_time, self.duration
        )
    }
}

/// result of resolving a list of requests against a trip index.
#[derive(Debug, Default, Clone)]
pub struct BackfillReport {
    /// resolved trips, in request order
    pub rows: Vec<BackfillRow>,
    /// requested trip ids that no dataset contained, in request order
    pub missing: Vec<String>,
}
