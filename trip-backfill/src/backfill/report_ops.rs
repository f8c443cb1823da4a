//! resolves requested trip ids against a [`TripIndex`] and writes the
//! backfill CSV. rows are collected in full before the output file is
//! opened, so a failure part way through leaves no partial report.
use std::{fs::File, path::Path};

use csv::{Terminator, WriterBuilder};
use itertools::Itertools;

use super::{
    duration_ops, index_ops, BackfillConfig, BackfillError, BackfillReport, BackfillRow,
    MidnightRolloverPolicy, TripIndex, TripRequest,
};

/// runs the full backfill: index all datasets, read the requested trips,
/// resolve durations and write the output file.
pub fn run_backfill(config: &BackfillConfig) -> Result<BackfillReport, BackfillError> {
    let index = index_ops::build_index(
        Path::new(&config.gtfs_directory),
        &config.stop_times_filename,
    )?;
    let requests = TripRequest::read_json_file(Path::new(&config.trips_file), &config.trip_id_key)?;
    let report = resolve(&index, &requests, &config.midnight_rollover)?;
    write_report(&report.rows, Path::new(&config.output_file), config.overwrite)?;
    log::info!(
        "wrote {} trip durations to '{}', {} of {} requested trips not found",
        report.rows.len(),
        config.output_file,
        report.missing.len(),
        requests.len()
    );
    Ok(report)
}

/// looks up each request in the index. trips not found in any dataset are
/// logged and left out of the rows.
pub fn resolve(
    index: &TripIndex,
    requests: &[TripRequest],
    policy: &MidnightRolloverPolicy,
) -> Result<BackfillReport, BackfillError> {
    let mut report = BackfillReport::default();
    for request in requests {
        let record = match index.get(&request.trip_id) {
            Some(record) => record,
            None => {
                log::warn!("{}", missing_trip_message(&request.trip_id));
                report.missing.push(request.trip_id.clone());
                continue;
            }
        };
        let duration = duration_ops::record_duration(record, policy)?;
        let row = BackfillRow {
            trip_id: request.trip_id.clone(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            duration,
        };
        log::debug!("{row}");
        report.rows.push(row);
    }
    Ok(report)
}

/// writes rows as `trip_id,start_time,end_time,duration,` lines with no
/// header. when `overwrite` is false an existing file is an error.
pub fn write_report(
    rows: &[BackfillRow],
    output_file: &Path,
    overwrite: bool,
) -> Result<(), BackfillError> {
    let filepath = output_file.display().to_string();
    let file = create_output(output_file, overwrite)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);
    for row in rows {
        writer
            .write_record(row.to_record())
            .map_err(|source| BackfillError::CsvWriteError {
                filepath: filepath.clone(),
                source,
            })?;
    }
    writer.flush().map_err(|source| BackfillError::WriteError {
        filepath: filepath.clone(),
        source,
    })
}

/// writes the trip index as CSV with a header row, sorted by trip id.
pub fn write_index(
    index: &TripIndex,
    output_file: &Path,
    overwrite: bool,
) -> Result<(), BackfillError> {
    let filepath = output_file.display().to_string();
    let file = create_output(output_file, overwrite)?;
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);
    for record in index.records().sorted_by(|a, b| a.trip_id.cmp(&b.trip_id)) {
        writer
            .serialize(record)
            .map_err(|source| BackfillError::CsvWriteError {
                filepath: filepath.clone(),
                source,
            })?;
    }
    writer.flush().map_err(|source| BackfillError::WriteError {
        filepath: filepath.clone(),
        source,
    })?;
    log::info!("wrote {} indexed trips to '{}'", index.len(), filepath);
    Ok(())
}

/// log line for a requested trip that no dataset contains.
pub fn missing_trip_message(trip_id: &str) -> String {
    format!("{trip_id} not in provided GTFS files")
}

fn create_output(output_file: &Path, overwrite: bool) -> Result<File, BackfillError> {
    let result = if overwrite {
        File::create(output_file)
    } else {
        File::create_new(output_file)
    };
    result.map_err(|source| BackfillError::WriteError {
        filepath: output_file.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::{missing_trip_message, resolve, run_backfill, write_index, write_report};
    use crate::backfill::{
        index_ops, BackfillConfig, BackfillError, BackfillRow, MidnightRolloverPolicy, TripIndex,
        TripRequest,
    };
    use std::{fs, path::Path};

    fn example_index() -> TripIndex {
        let stream = "T1,08:00:00\nT1,08:00:05\nT1,08:05:00\nT2,09:00:00\n";
        index_ops::index_stop_times(
            stream.as_bytes(),
            "stop_times.txt",
            "test",
            TripIndex::default(),
        )
        .expect("should index")
    }

    fn requests(trip_ids: &[&str]) -> Vec<TripRequest> {
        trip_ids
            .iter()
            .map(|trip_id| TripRequest {
                trip_id: trip_id.to_string(),
            })
            .collect()
    }

    fn write_dataset(root: &Path, dataset: &str, contents: &str) {
        let dir = root.join(dataset);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stop_times.txt"), contents).unwrap();
    }

    #[test]
    fn test_resolve_skips_unknown_trips() {
        let index = example_index();
        let report = resolve(
            &index,
            &requests(&["T1", "T9"]),
            &MidnightRolloverPolicy::Wrap,
        )
        .expect("should resolve");
        assert_eq!(
            report.rows,
            vec![BackfillRow {
                trip_id: String::from("T1"),
                start_time: String::from("08:00:00"),
                end_time: String::from("08:05:00"),
                duration: 300,
            }]
        );
        assert_eq!(report.missing, vec![String::from("T9")]);
        let logged = report
            .missing
            .iter()
            .map(|trip_id| missing_trip_message(trip_id))
            .collect::<Vec<_>>();
        assert_eq!(logged, vec![String::from("T9 not in provided GTFS files")]);
    }

    #[test]
    fn test_resolve_keeps_request_order_and_duplicates() {
        let index = example_index();
        let report = resolve(
            &index,
            &requests(&["T2", "T1", "T2"]),
            &MidnightRolloverPolicy::Wrap,
        )
        .expect("should resolve");
        let trip_ids = report
            .rows
            .iter()
            .map(|r| r.trip_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(trip_ids, vec!["T2", "T1", "T2"]);
        assert_eq!(report.rows[0].duration, 0);
    }

    #[test]
    fn test_report_format() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("backfill_trips.csv");
        let rows = vec![
            BackfillRow {
                trip_id: String::from("T1"),
                start_time: String::from("08:00:00"),
                end_time: String::from("08:05:00"),
                duration: 300,
            },
            BackfillRow {
                trip_id: String::from("T2"),
                start_time: String::from("09:00:00"),
                end_time: String::from("09:00:00"),
                duration: 0,
            },
        ];
        write_report(&rows, &output, true).expect("should write");
        let contents = fs::read_to_string(&output).unwrap();
        assert_eq!(
            contents,
            "T1,08:00:00,08:05:00,300,\nT2,09:00:00,09:00:00,0,\n"
        );
        let displayed = rows.iter().map(|r| format!("{r}\n")).collect::<String>();
        assert_eq!(contents, displayed);
    }

    #[test]
    fn test_report_without_overwrite_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("backfill_trips.csv");
        fs::write(&output, "existing\n").unwrap();
        let result = write_report(&[], &output, false);
        assert!(matches!(result, Err(BackfillError::WriteError { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing\n");
    }

    #[test]
    fn test_write_index_sorted_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("index.csv");
        write_index(&example_index(), &output, true).expect("should write");
        let contents = fs::read_to_string(&output).unwrap();
        assert_eq!(
            contents,
            "trip_id,start_time,end_time,dataset\n\
             T1,08:00:00,08:05:00,test\n\
             T2,09:00:00,09:00:00,test\n"
        );
    }

    #[test]
    fn test_run_backfill_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let gtfs = dir.path().join("GTFS");
        write_dataset(
            &gtfs,
            "2023-09",
            "trip_id,arrival_time,departure_time\n\
             T1,08:00:00,08:00:00\n\
             T1,08:05:00,08:05:00\n\
             T3,23:50:00,23:50:00\n\
             T3,00:10:00,00:10:00\n",
        );
        write_dataset(
            &gtfs,
            "2024-01",
            "trip_id,arrival_time,departure_time\n\
             T1,12:00:00,12:00:00\n\
             T1,12:30:00,12:30:00\n",
        );
        let trips_file = dir.path().join("existing_school_trips.json");
        fs::write(
            &trips_file,
            r#"[{"Trip ID": "T1"}, {"Trip ID": "T9"}, {"Trip ID": "T3"}]"#,
        )
        .unwrap();
        let output_file = dir.path().join("backfill_trips.csv");

        let config = BackfillConfig {
            gtfs_directory: gtfs.display().to_string(),
            trips_file: trips_file.display().to_string(),
            output_file: output_file.display().to_string(),
            ..Default::default()
        };
        let report = run_backfill(&config).expect("should run");
        assert_eq!(report.missing, vec![String::from("T9")]);

        let contents = fs::read_to_string(&output_file).unwrap();
        assert_eq!(
            contents,
            "T1,12:00:00,12:30:00,1800,\nT3,23:50:00,00:10:00,1200,\n"
        );
    }
}
