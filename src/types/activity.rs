use clap::ValueEnum;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    /// Source-provided start time, used verbatim as the unique key.
    pub timestamp: String,
    pub local_timestamp: Option<String>,
    pub activity_type: String,
    pub distance_miles: f64,
    pub duration_minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Json,
    Tcx,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "tcx" => Some(FileFormat::Tcx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Tcx => "tcx",
        }
    }
}
