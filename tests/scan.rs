use std::fs;

use fitreader_rs::error::ScanError;
use fitreader_rs::pipeline::scan::scan;
use fitreader_rs::types::activity::FileFormat;
use tempfile::TempDir;

#[test]
fn lists_matching_files_without_recursing() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("b.json"), "{}").expect("write");
    fs::write(dir.path().join("a.JSON"), "{}").expect("write");
    fs::write(dir.path().join("c.tcx"), "<x/>").expect("write");
    fs::write(dir.path().join("json"), "").expect("write");
    fs::create_dir(dir.path().join("nested.json")).expect("mkdir");
    fs::write(dir.path().join("nested.json").join("d.json"), "{}").expect("write");

    let found: Vec<String> = scan(dir.path(), FileFormat::Json)
        .expect("scan")
        .map(|path| {
            path.expect("entry")
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .expect("file name")
        })
        .collect();

    assert_eq!(found, vec!["a.JSON", "b.json"]);
}

#[test]
fn rejects_a_file_as_directory() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("activity.json");
    fs::write(&file, "{}").expect("write");

    let err = scan(&file, FileFormat::Json).err().expect("should fail");
    assert!(matches!(err, ScanError::NotADirectory(_)));
}

#[test]
fn file_format_from_filename() {
    assert_eq!(FileFormat::from_filename("run.json"), Some(FileFormat::Json));
    assert_eq!(FileFormat::from_filename("ride.TCX"), Some(FileFormat::Tcx));
    assert_eq!(FileFormat::from_filename("ride.gpx"), None);
    assert_eq!(FileFormat::from_filename("json"), None);
}

#[cfg(unix)]
#[test]
fn skips_unrelated_broken_links() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("a.json"), "{}").expect("write");
    std::os::unix::fs::symlink(
        dir.path().join("gone.txt"),
        dir.path().join("stale-link.txt"),
    )
    .expect("symlink");

    let found: Vec<_> = scan(dir.path(), FileFormat::Json)
        .expect("scan")
        .collect::<Result<_, _>>()
        .expect("entries");

    assert_eq!(found, vec![dir.path().join("a.json")]);
}

#[cfg(unix)]
#[test]
fn broken_link_with_matching_name_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("a.json"), "{}").expect("write");
    std::os::unix::fs::symlink(dir.path().join("gone.json"), dir.path().join("b.json"))
        .expect("symlink");

    let results: Vec<_> = scan(dir.path(), FileFormat::Json).expect("scan").collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ScanError::Walk(_))));
}
