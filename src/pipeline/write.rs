use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::config::WriteMode;
use crate::error::WriteError;
use crate::pipeline::collect::ActivityLog;

pub fn headers(with_local_time: bool) -> Vec<&'static str> {
    let mut headers = vec!["timestamp"];
    if with_local_time {
        headers.push("local_timestamp");
    }
    headers.extend(["activity_type", "distance_miles", "duration_minutes"]);
    headers
}

/// Writes `log` to `path` and returns the number of data rows written.
///
/// In append mode the header row is only written when the file is new or
/// empty, so repeated runs add data rows under a single header.
pub fn write_csv(
    path: &Path,
    log: &ActivityLog,
    with_local_time: bool,
    mode: WriteMode,
) -> Result<usize, WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let expected = headers(with_local_time);
    if mode == WriteMode::Append {
        check_existing_header(path, &expected)?;
    }

    let file = open(path, mode).map_err(|source| WriteError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let needs_header = match mode {
        WriteMode::Overwrite => true,
        WriteMode::Append => file.metadata()?.len() == 0,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        writer.write_record(&expected)?;
    }

    for record in log.records() {
        if with_local_time {
            writer.serialize((
                &record.timestamp,
                record.local_timestamp.as_deref(),
                &record.activity_type,
                record.distance_miles,
                record.duration_minutes,
            ))?;
        } else {
            writer.serialize((
                &record.timestamp,
                &record.activity_type,
                record.distance_miles,
                record.duration_minutes,
            ))?;
        }
    }

    writer.flush()?;
    Ok(log.len())
}

/// Rejects appending to a non-empty file whose header differs from `expected`.
fn check_existing_header(path: &Path, expected: &[&str]) -> Result<(), WriteError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => {}
        Ok(_) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut found = csv::StringRecord::new();
    reader.read_record(&mut found)?;

    if found.iter().ne(expected.iter().copied()) {
        return Err(WriteError::HeaderMismatch {
            path: path.to_path_buf(),
            expected: expected.join(","),
            found: found.iter().collect::<Vec<_>>().join(","),
        });
    }
    Ok(())
}

fn open(path: &Path, mode: WriteMode) -> std::io::Result<File> {
    match mode {
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
        WriteMode::Overwrite => OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path),
    }
}
