use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AppError;
use crate::pipeline::collect::ActivityLog;
use crate::pipeline::{parse, scan, timezone, write};
use crate::types::activity::{ActivityRecord, FileFormat};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files_read: usize,
    pub rows_written: usize,
    pub output_path: PathBuf,
}

/// Converts every matching file in the configured directory and writes the
/// rows to the output CSV.
///
/// All files are parsed before the output file is touched, so any error
/// (including a duplicate timestamp) leaves the output unchanged.
pub fn run(config: &Config) -> Result<RunSummary, AppError> {
    tracing::info!(
        "Reading {} files from {}",
        format_name(config.file_type),
        config.directory.display()
    );

    let (log, files_read) = collect(config)?;

    let rows_written = write::write_csv(
        &config.output_path,
        &log,
        config.timezone.is_some(),
        config.write_mode,
    )?;

    tracing::info!(
        "Wrote {} rows from {} files to {}",
        rows_written,
        files_read,
        config.output_path.display()
    );

    Ok(RunSummary {
        files_read,
        rows_written,
        output_path: config.output_path.clone(),
    })
}

/// Parses all matching files into a single log. Returns the log and the
/// number of files read.
pub fn collect(config: &Config) -> Result<(ActivityLog, usize), AppError> {
    let mut log = ActivityLog::new();
    let mut files_read = 0;

    for path in scan::scan(&config.directory, config.file_type)? {
        let path = path?;
        let records = read_file(&path, config)?;
        files_read += 1;

        for record in records {
            if config.verbose {
                tracing::info!(
                    file = %path.display(),
                    timestamp = %record.timestamp,
                    local = record.local_timestamp.as_deref().unwrap_or("-"),
                    activity = %record.activity_type,
                    "{:.2} mi in {:.1} min",
                    record.distance_miles,
                    record.duration_minutes
                );
            }
            log.insert(record, &path)?;
        }
    }

    if files_read == 0 {
        tracing::warn!(
            "No .{} files found in {}",
            config.file_type.extension(),
            config.directory.display()
        );
    }

    Ok((log, files_read))
}

fn read_file(path: &Path, config: &Config) -> Result<Vec<ActivityRecord>, AppError> {
    tracing::debug!("Parsing {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = parse::parse(&bytes, config.file_type).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(zone) = config.timezone {
        for record in &mut records {
            let local =
                timezone::to_local(&record.timestamp, zone).map_err(|source| AppError::Timezone {
                    path: path.to_path_buf(),
                    source,
                })?;
            record.local_timestamp = Some(local);
        }
    }

    Ok(records)
}

fn format_name(format: FileFormat) -> &'static str {
    match format {
        FileFormat::Json => "JSON",
        FileFormat::Tcx => "TCX",
    }
}
