use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};

use crate::error::ConfigError;
use crate::pipeline::timezone;
use crate::types::activity::FileFormat;

/// Convert a directory of Google Fit activity files into CSV rows
#[derive(Parser, Debug, Clone)]
#[command(name = "fitreader")]
#[command(version)]
pub struct Args {
    /// The directory containing activity files
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Type of file to parse
    #[arg(short, long = "file_type", value_enum, default_value = "json")]
    pub file_type: FileFormat,

    /// Name of the output file, written under the data directory
    #[arg(short, long = "output_filename", default_value = "google_fit.csv")]
    pub output_filename: String,

    /// Directory the output file is written to
    #[arg(long = "data_dir", default_value = "data")]
    pub data_dir: PathBuf,

    /// IANA zone used for the local timestamp column (e.g. America/Denver)
    #[arg(short, long)]
    pub timezone: Option<String>,

    /// How to treat an existing output file
    #[arg(long, value_enum, default_value = "append")]
    pub mode: WriteMode,

    /// Log every parsed record
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WriteMode {
    /// Add rows to the end; the header is written only into an empty file
    Append,
    /// Truncate the file before writing
    Overwrite,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub directory: PathBuf,
    pub file_type: FileFormat,
    pub output_path: PathBuf,
    pub timezone: Option<Tz>,
    pub write_mode: WriteMode,
    pub verbose: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        if args.output_filename.trim().is_empty() {
            return Err(ConfigError::EmptyOutputFilename);
        }

        let timezone = args
            .timezone
            .as_deref()
            .map(timezone::resolve_zone)
            .transpose()?;

        Ok(Self {
            directory: args.directory,
            file_type: args.file_type,
            output_path: args.data_dir.join(args.output_filename),
            timezone,
            write_mode: args.mode,
            verbose: args.verbose,
        })
    }
}
