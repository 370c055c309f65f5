use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid TCX: {0}")]
    InvalidTcx(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("No activities found in file")]
    EmptyFile,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TimezoneError {
    #[error("Unknown timezone: {0}")]
    UnknownZone(String),
    #[error("Unrecognized timestamp: {0:?}")]
    InvalidTimestamp(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Duplicate timestamp {timestamp} in {} (first seen in {})", .second.display(), .first.display())]
    DuplicateTimestamp {
        timestamp: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Existing header in {} is {found:?}, expected {expected:?}", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
    #[error("Output filename must not be empty")]
    EmptyOutputFilename,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("{}: {source}", .path.display())]
    Timezone {
        path: PathBuf,
        source: TimezoneError,
    },
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
