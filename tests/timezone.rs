use clap::Parser;
use fitreader_rs::config::{Args, Config};
use fitreader_rs::error::{ConfigError, TimezoneError};
use fitreader_rs::pipeline::timezone::{resolve_zone, to_local};

#[test]
fn converts_utc_to_mountain_time() {
    let zone = resolve_zone("America/Phoenix").expect("zone");
    let local = to_local("2023-01-01T00:00:00Z", zone).expect("convert");
    assert_eq!(local, "2022-12-31T17:00:00:000000");
}

#[test]
fn keeps_microseconds() {
    let zone = resolve_zone("Europe/Berlin").expect("zone");
    let local = to_local("2023-07-15T10:20:30.123456Z", zone).expect("convert");
    assert_eq!(local, "2023-07-15T12:20:30:123456");
}

#[test]
fn honours_source_offset() {
    let zone = resolve_zone("UTC").expect("zone");
    let local = to_local("2023-03-10T08:00:00-05:00", zone).expect("convert");
    assert_eq!(local, "2023-03-10T13:00:00:000000");
}

#[test]
fn accepts_compact_offsets() {
    let zone = resolve_zone("America/Phoenix").expect("zone");
    assert_eq!(
        to_local("2023-01-01T00:00:00+0000", zone).expect("convert"),
        "2022-12-31T17:00:00:000000"
    );
    assert_eq!(
        to_local("2023-01-01T00:00:00.250+0000", zone).expect("convert"),
        "2022-12-31T17:00:00:250000"
    );
    assert_eq!(
        to_local("2023-01-01T02:00:00+0200", zone).expect("convert"),
        "2022-12-31T17:00:00:000000"
    );
}

#[test]
fn naive_timestamps_are_utc() {
    let zone = resolve_zone("America/Denver").expect("zone");
    assert_eq!(
        to_local("2023-01-01T00:00:00", zone).expect("convert"),
        "2022-12-31T17:00:00:000000"
    );
    assert_eq!(
        to_local("2023-01-01 00:00:00.5", zone).expect("convert"),
        "2022-12-31T17:00:00:500000"
    );
    assert_eq!(
        to_local("2023-01-01", zone).expect("convert"),
        "2022-12-31T17:00:00:000000"
    );
}

#[test]
fn rejects_unrecognized_timestamps() {
    let zone = resolve_zone("UTC").expect("zone");
    let err = to_local("yesterday morning", zone).expect_err("should fail");
    assert!(matches!(err, TimezoneError::InvalidTimestamp(_)));
}

#[test]
fn rejects_unknown_zone() {
    let err = resolve_zone("Americas/Denver").expect_err("should fail");
    assert!(matches!(err, TimezoneError::UnknownZone(name) if name == "Americas/Denver"));
}

#[test]
fn config_fails_fast_on_unknown_zone() {
    let args = Args::try_parse_from(["fitreader", "-d", "activities", "-t", "Americas/Denver"])
        .expect("args");
    let err = Config::from_args(args).expect_err("should fail");
    assert!(matches!(
        err,
        ConfigError::Timezone(TimezoneError::UnknownZone(_))
    ));
}

#[test]
fn config_defaults() {
    let args = Args::try_parse_from(["fitreader", "--directory", "activities"]).expect("args");
    let config = Config::from_args(args).expect("config");

    assert_eq!(
        config.output_path,
        std::path::Path::new("data").join("google_fit.csv")
    );
    assert_eq!(
        config.file_type,
        fitreader_rs::types::activity::FileFormat::Json
    );
    assert_eq!(config.write_mode, fitreader_rs::config::WriteMode::Append);
    assert!(config.timezone.is_none());
    assert!(!config.verbose);
}

#[test]
fn config_reads_short_flags() {
    let args = Args::try_parse_from([
        "fitreader",
        "-d",
        "logs",
        "-f",
        "tcx",
        "-o",
        "runs.csv",
        "-t",
        "America/Denver",
        "-v",
    ])
    .expect("args");
    let config = Config::from_args(args).expect("config");

    assert_eq!(config.file_type, fitreader_rs::types::activity::FileFormat::Tcx);
    assert!(config.output_path.ends_with("runs.csv"));
    assert_eq!(config.timezone, Some(chrono_tz::America::Denver));
    assert!(config.verbose);
}
