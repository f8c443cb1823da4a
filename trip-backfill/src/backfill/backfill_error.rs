#[derive(thiserror::Error, Debug)]
pub enum BackfillError {
    #[error("failed reading directory '{path}': {source}")]
    ReadDirectoryError {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset '{dataset}' is missing record file '{filepath}'")]
    MissingRecordFileError { dataset: String, filepath: String },
    #[error("failed reading '{filepath}': {source}")]
    ReadError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failed reading CSV row from '{filepath}': {source}")]
    CsvReadError { filepath: String, source: csv::Error },
    #[error("malformed record at line {line} of '{filepath}': {msg}")]
    MalformedRecordError {
        filepath: String,
        line: u64,
        msg: String,
    },
    #[error("failed parsing trips file '{filepath}': {source}")]
    TripsFileError {
        filepath: String,
        source: serde_json::Error,
    },
    #[error("trip entry {index} is missing key '{key}'")]
    MissingTripIdKeyError { index: usize, key: String },
    #[error("trip entry {index} has unsupported trip id value {value}, expected string or number")]
    InvalidTripIdError { index: usize, value: String },
    #[error("trip '{0}' not found in trip index")]
    TripNotFoundError(String),
    #[error("trip '{trip_id}' has invalid time '{value}': {source}")]
    TimeParseError {
        trip_id: String,
        value: String,
        source: chrono::ParseError,
    },
    #[error("failed writing '{filepath}': {source}")]
    WriteError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("failed writing CSV row to '{filepath}': {source}")]
    CsvWriteError { filepath: String, source: csv::Error },
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
}
