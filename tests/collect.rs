//! End-to-end collection over files and direct text.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use encoding_rs::WINDOWS_1252;
use permits::models::{CSV_HEADER, CollectRequest, Config};
use permits::pipeline::{collect, to_csv};
use permits::{AppError, PermitRecord};
use tempfile::TempDir;

const SCENARIO_A: &str = "\
PIKES PEAK REGIONAL BUILDING DEPARTMENT
Project Code: 101
P12345 X 01-Jan-2024 ADDRESS: 100 MAIN ST  DENVER 80202
   Project: NEW DECK  Contr: JOHN SMITH.
   COST: $5,000.00
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_report(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn run(request: CollectRequest) -> Result<Vec<PermitRecord>, AppError> {
    collect(&request, &Config::default()).map(|outcome| outcome.rows)
}

#[test]
fn scenario_a_single_entry() {
    let rows = run(CollectRequest::new()
        .with_text(SCENARIO_A)
        .as_of(date(2024, 1, 10)))
    .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.address, "100 MAIN ST");
    assert_eq!(row.city, "DENVER");
    assert_eq!(row.zip_code, "80202");
    assert_eq!(row.project_name, "NEW DECK");
    assert_eq!(row.contractor, "JOHN SMITH");
    assert_eq!(row.valuation, "$5,000.00");
}

#[test]
fn scenario_b_other_section_ignored() {
    let text = SCENARIO_A.replace("Project Code: 101", "Project Code: 200");
    let rows = run(CollectRequest::new().with_text(text).as_of(date(2024, 1, 10))).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn scenario_c_latest_report_wins_across_files() {
    let tmp = TempDir::new().unwrap();
    let monthly = write_report(&tmp, "monthly.txt", SCENARIO_A.as_bytes());
    let weekly = write_report(
        &tmp,
        "weekly.txt",
        SCENARIO_A.replace("01-Jan-2024", "05-Jan-2024").as_bytes(),
    );

    let rows = run(CollectRequest::new()
        .with_files([monthly, weekly])
        .as_of(date(2024, 1, 10)))
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].permit_id, "P12345");
    assert_eq!(rows[0].issue_date, date(2024, 1, 5));
}

#[test]
fn scenario_d_no_marker_is_parse_error() {
    let err = run(CollectRequest::new().with_text("Weekly newsletter\nNothing here.\n")).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn scenario_e_seven_day_window() {
    let text = "\
Project Code: 101
P1 X 01-Jan-2024 ADDRESS: 1 MAIN ST  DENVER 80202
P2 X 05-Jan-2024 ADDRESS: 2 MAIN ST  DENVER 80202
";
    let rows = run(CollectRequest::new()
        .with_text(text)
        .with_days(7)
        .as_of(date(2024, 1, 10)))
    .unwrap();

    let ids: Vec<_> = rows.iter().map(|r| r.permit_id.as_str()).collect();
    assert_eq!(ids, ["P2"]);
}

#[test]
fn missing_file_fails_before_parsing() {
    let err = run(CollectRequest::new()
        .with_files(["definitely/not/here.txt"])
        .with_text(SCENARIO_A))
    .unwrap_err();
    assert!(matches!(err, AppError::FileNotFound(_)));
}

#[test]
fn nothing_supplied_is_parse_error() {
    let err = run(CollectRequest::new()).unwrap_err();
    assert_eq!(err.to_string(), "No report content provided.");
}

#[test]
fn issue_date_survives_every_encoding() {
    let text = SCENARIO_A.replace("JOHN SMITH", "JOS\u{e9} GARC\u{ed}A");
    let utf16 = |little: bool, bom: bool| {
        let mut out = Vec::new();
        if bom {
            out.extend(if little { [0xFF, 0xFE] } else { [0xFE, 0xFF] });
        }
        for unit in text.encode_utf16() {
            out.extend(if little {
                unit.to_le_bytes()
            } else {
                unit.to_be_bytes()
            });
        }
        out
    };
    let (legacy, _, _) = WINDOWS_1252.encode(&text);

    let encodings: Vec<(&str, Vec<u8>)> = vec![
        ("utf8.txt", text.as_bytes().to_vec()),
        ("utf16.txt", utf16(true, true)),
        ("utf16le.txt", utf16(true, false)),
        ("utf16be.txt", utf16(false, false)),
        ("cp1252.txt", legacy.into_owned()),
    ];

    let tmp = TempDir::new().unwrap();
    for (name, bytes) in encodings {
        let path = write_report(&tmp, name, &bytes);
        let rows = run(CollectRequest::new()
            .with_files([path])
            .as_of(date(2024, 1, 10)))
        .unwrap();
        assert_eq!(rows.len(), 1, "{name}");
        assert_eq!(rows[0].issue_date, date(2024, 1, 1), "{name}");
        assert_eq!(rows[0].contractor, "JOS\u{e9} GARC\u{ed}A", "{name}");
    }
}

#[test]
fn homeowner_only_end_to_end() {
    let text = "\
Project Code: 101
P1 X 03-Jan-2024 ADDRESS: 1 MAIN ST  DENVER 80202
   Project: GARAGE  Contr: HOMEOWNER.
P2 X 04-Jan-2024 ADDRESS: 2 MAIN ST  DENVER 80202
   Project: ROOF  Contr: ACME ROOFING.
";
    let owners = run(CollectRequest::new()
        .with_text(text)
        .with_homeowner_only(true)
        .as_of(date(2024, 1, 10)))
    .unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].permit_id, "P1");

    let everyone = run(CollectRequest::new().with_text(text).as_of(date(2024, 1, 10))).unwrap();
    assert_eq!(everyone.len(), 2);
}

#[test]
fn csv_output_of_collected_rows() {
    let rows = run(CollectRequest::new()
        .with_text(SCENARIO_A)
        .as_of(date(2024, 1, 10)))
    .unwrap();
    let csv_text = to_csv(&rows).unwrap();

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    assert_eq!(reader.headers().unwrap().len(), CSV_HEADER.len());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], "2024-01-01");
    assert_eq!(&record[1], "P12345");
    assert_eq!(&record[5], "JOHN SMITH");
}
