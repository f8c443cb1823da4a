//! builds a [`TripIndex`] from a directory of GTFS datasets. each dataset is a
//! subdirectory holding a `stop_times.txt` file whose rows are grouped by trip
//! and ordered by time within each trip, so the first and last row of a
//! contiguous run of trip_ids give the trip's start and end times.
//!
//! trip ids are not stable across datasets (agencies re-issue them every
//! board period), so a trip_id seen in more than one dataset keeps the entry
//! from whichever dataset was indexed last.
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, Trim};
use itertools::Itertools;
use kdam::tqdm;

use super::{BackfillError, TripIndex, TripRecord};

pub const TRIP_ID_COLUMN: &str = "trip_id";
pub const ARRIVAL_TIME_COLUMN: &str = "arrival_time";

/// indexes every dataset subdirectory of `gtfs_directory` in file name order,
/// folding each one into the same [`TripIndex`].
pub fn build_index(
    gtfs_directory: &Path,
    stop_times_filename: &str,
) -> Result<TripIndex, BackfillError> {
    let datasets = list_datasets(gtfs_directory)?;
    if datasets.is_empty() {
        log::warn!(
            "no dataset directories found in '{}'",
            gtfs_directory.display()
        );
    }
    let index = tqdm!(
        datasets.iter(),
        desc = format!("indexing {}", gtfs_directory.display())
    )
    .try_fold(TripIndex::default(), |index, dataset_directory| {
        index_dataset(dataset_directory, stop_times_filename, index)
    })?;
    log::info!(
        "indexed {} trips from {} datasets",
        index.len(),
        datasets.len()
    );
    Ok(index)
}

/// lists the subdirectories of `gtfs_directory`, sorted by file name. plain
/// files are ignored.
pub fn list_datasets(gtfs_directory: &Path) -> Result<Vec<PathBuf>, BackfillError> {
    let read_dir_error = |source: std::io::Error| BackfillError::ReadDirectoryError {
        path: gtfs_directory.display().to_string(),
        source,
    };
    let entries = std::fs::read_dir(gtfs_directory)
        .map_err(read_dir_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_error)?;
    let datasets = entries
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .sorted_by_cached_key(|path| path.file_name().map(|name| name.to_os_string()))
        .collect_vec();
    Ok(datasets)
}

/// reads the stop times file of one dataset into `index`.
pub fn index_dataset(
    dataset_directory: &Path,
    stop_times_filename: &str,
    index: TripIndex,
) -> Result<TripIndex, BackfillError> {
    let dataset = dataset_directory
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| dataset_directory.display().to_string());
    log::info!("{dataset}");

    let stop_times_path = dataset_directory.join(stop_times_filename);
    let filepath = stop_times_path.display().to_string();
    if !stop_times_path.is_file() {
        return Err(BackfillError::MissingRecordFileError { dataset, filepath });
    }
    let file = File::open(&stop_times_path).map_err(|source| BackfillError::ReadError {
        filepath: filepath.clone(),
        source,
    })?;
    index_stop_times(file, &filepath, &dataset, index)
}

/// streams stop times rows from `reader`, committing each contiguous run of
/// a trip_id into `index` when the trip_id changes and at end of stream.
///
/// `filepath` is only used for error messages.
pub fn index_stop_times<R: Read>(
    reader: R,
    filepath: &str,
    dataset: &str,
    mut index: TripIndex,
) -> Result<TripIndex, BackfillError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut columns: Option<RecordColumns> = None;
    let mut current: Option<TripRun> = None;
    let mut n_rows: usize = 0;

    for row in csv_reader.records() {
        let record = row.map_err(|source| BackfillError::CsvReadError {
            filepath: filepath.to_string(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let selected = match columns {
            Some(selected) => selected,
            None => {
                let (selected, is_header) = RecordColumns::detect(&record);
                columns = Some(selected);
                if is_header {
                    continue;
                }
                selected
            }
        };
        let (trip_id, arrival_time) = selected.select(&record).ok_or_else(|| {
            BackfillError::MalformedRecordError {
                filepath: filepath.to_string(),
                line,
                msg: format!(
                    "expected at least {} columns, found {}",
                    selected.width(),
                    record.len()
                ),
            }
        })?;
        n_rows += 1;

        match current.as_mut() {
            Some(run) if run.trip_id == trip_id => {
                run.latest_time = arrival_time.to_string();
            }
            _ => {
                if let Some(run) = current.take() {
                    commit(&mut index, run, dataset);
                }
                current = Some(TripRun::new(trip_id, arrival_time));
            }
        }
    }
    if let Some(run) = current.take() {
        commit(&mut index, run, dataset);
    }

    log::debug!("read {n_rows} stop times rows from '{filepath}'");
    Ok(index)
}

fn commit(index: &mut TripIndex, run: TripRun, dataset: &str) {
    let record = run.into_record(dataset);
    if let Some(previous) = index.insert(record) {
        if previous.dataset != dataset {
            log::debug!(
                "trip '{}' from dataset '{}' replaced by dataset '{}'",
                previous.trip_id,
                previous.dataset,
                dataset
            );
        }
    }
}

/// the in-progress run of rows sharing one trip_id.
struct TripRun {
    trip_id: String,
    start_time: String,
    latest_time: String,
}

impl TripRun {
    fn new(trip_id: &str, arrival_time: &str) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            start_time: arrival_time.to_string(),
            latest_time: arrival_time.to_string(),
        }
    }

    fn into_record(self, dataset: &str) -> TripRecord {
        TripRecord {
            trip_id: self.trip_id,
            start_time: self.start_time,
            end_time: self.latest_time,
            dataset: dataset.to_string(),
        }
    }
}

/// positions of the trip_id and arrival time fields within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordColumns {
    trip_id: usize,
    arrival_time: usize,
}

impl Default for RecordColumns {
    fn default() -> Self {
        Self {
            trip_id: 0,
            arrival_time: 1,
        }
    }
}

impl RecordColumns {
    /// inspects the first row of a file. a GTFS header row names its columns,
    /// otherwise the file is headerless and trip_id, arrival_time are the
    /// first two columns. returns the columns and whether the row was a header.
    fn detect(first: &StringRecord) -> (RecordColumns, bool) {
        let position = |name: &str| first.iter().position(|field| field == name);
        match position(TRIP_ID_COLUMN) {
            None => (RecordColumns::default(), false),
            Some(trip_id) => {
                let arrival_time = position(ARRIVAL_TIME_COLUMN).unwrap_or(1);
                (
                    RecordColumns {
                        trip_id,
                        arrival_time,
                    },
                    true,
                )
            }
        }
    }

    fn width(&self) -> usize {
        self.trip_id.max(self.arrival_time) + 1
    }

    fn select<'a>(&self, record: &'a StringRecord) -> Option<(&'a str, &'a str)> {
        let trip_id = record.get(self.trip_id)?;
        let arrival_time = record.get(self.arrival_time)?;
        Some((trip_id, arrival_time))
    }
}
