use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;
use crate::types::activity::FileFormat;

/// Lists regular files directly inside `dir` whose extension matches `format`.
///
/// Paths come back sorted by file name. Subdirectories are not descended into.
/// Entries that cannot be read are skipped with a warning unless their name
/// matches `format`.
pub fn scan(
    dir: &Path,
    format: FileFormat,
) -> Result<impl Iterator<Item = Result<PathBuf, ScanError>>, ScanError> {
    if !dir.exists() {
        return Err(ScanError::NotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    Ok(walker.filter_map(move |entry| match entry {
        Ok(entry) if matches_format(&entry, format) => Some(Ok(entry.into_path())),
        Ok(_) => None,
        Err(e) if path_matches(e.path(), format) => Some(Err(ScanError::Walk(e))),
        Err(e) => {
            tracing::warn!("Skipping unreadable entry: {}", e);
            None
        }
    }))
}

fn matches_format(entry: &DirEntry, format: FileFormat) -> bool {
    entry.file_type().is_file() && path_matches(Some(entry.path()), format)
}

fn path_matches(path: Option<&Path>, format: FileFormat) -> bool {
    path.and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .and_then(FileFormat::from_filename)
        .is_some_and(|found| found == format)
}
