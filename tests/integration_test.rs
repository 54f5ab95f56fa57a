//! End-to-end tests: CSV text -> table -> schedule -> HTML page

use schedpage::{render_page, CsvEncoder, CsvParser, RenderOptions, SchedError, Schedule, Table};
use std::io::Write;
use tempfile::NamedTempFile;

const FIXTURE_CSV: &str = "STEAM,Monday A BHS,Monday A Red,Monday A Blue,Tuesday A BHS,Tuesday A Red,Tuesday A Blue\n\
7:30 AM,Z1,Z1,C1,Z2,PB2O,C2\n\
7:31 AM,Z1,Z1,C1,Z2,PB2O,C2\n\
7:32 AM,P,PB2O,PO2B,P,B2,PO2B\n\
7:33 AM,L1,B1,D1,L2,B2,D2\n\
7:34 AM,L1,B1,D1,L2,B2,D2\n";

#[test]
fn test_csv_file_to_page() {
    // Write the fixture through a real file, as the CLI does
    let mut csv_file = NamedTempFile::new().unwrap();
    csv_file.write_all(FIXTURE_CSV.as_bytes()).unwrap();

    let text = std::fs::read_to_string(csv_file.path()).unwrap();
    let table = Table::from_csv(&text);

    // The export's trailing newline produces one extra blank row
    assert_eq!(table.num_rows(), 7);

    let schedule = Schedule::from_table(table, false).unwrap();
    assert_eq!(schedule.columns().len(), 6);
    assert_eq!(schedule.name(), "STEAM");

    let page = render_page(&schedule, &RenderOptions::default()).unwrap();
    assert!(page.contains("<h3>Monday - A - S</h3>"));
    assert!(page.contains("<h3>Tuesday - A - S</h3>"));
    assert!(page.contains("<h3>Totals</h3>"));
    assert!(page.contains("Z1<br />07:30-07:32<br />2"));
}

#[test]
fn test_merged_page_differs() {
    let plain = Schedule::from_table(Table::from_csv(FIXTURE_CSV), false).unwrap();
    let merged = Schedule::from_table(Table::from_csv(FIXTURE_CSV), true).unwrap();

    // Monday BHS: the plain passing block before lunch is absorbed
    assert_eq!(plain.blocks("Monday A BHS").unwrap().len(), 3);
    assert_eq!(merged.blocks("Monday A BHS").unwrap().len(), 2);

    // Monday Red: PB2O is inter-building passing and survives the merge
    assert_eq!(merged.blocks("Monday A Red").unwrap().len(), 3);
}

#[test]
fn test_totals_accumulate_across_days() {
    let schedule = Schedule::from_table(Table::from_csv(FIXTURE_CSV), false).unwrap();
    let totals = schedule.totals().unwrap();

    // BHS-S has Z1 on Monday and Z2 on Tuesday, both under letter Z
    let bhs = &totals["BHS-S"];
    assert_eq!(bhs["Z"].minutes, 4);
    assert_eq!(bhs["Z"].expression, "2+2");
    // L1 and L2 both accumulate under L
    assert_eq!(bhs["L"].minutes, 4);
}

#[test]
fn test_table_round_trip_through_encoder() {
    let rows = CsvParser::default().parse_document(FIXTURE_CSV);
    let encoded = CsvEncoder::default().encode_table(&Table::new(rows.clone()));
    assert_eq!(CsvParser::default().parse_document(&encoded), rows);
    assert_eq!(encoded, FIXTURE_CSV);
}

#[test]
fn test_ragged_export_is_reported_with_position() {
    // Third line lost a field
    let table = Table::from_csv("STEAM,Monday A BHS\n7:30 AM,A1\n7:31 AM\n7:32 AM,A1\n");
    match Schedule::from_table(table, false) {
        Err(SchedError::MalformedTable {
            row,
            expected,
            actual,
        }) => {
            assert_eq!((row, expected, actual), (2, 2, 1));
        }
        other => panic!("expected MalformedTable, got {other:?}"),
    }
}

#[test]
fn test_quoted_headings_survive_the_pipeline() {
    // Quoted heading with an embedded comma, CRLF line endings
    let csv = "STEAM,\"Monday A \"\"Red, away\"\"\"\r\n7:30 AM,A1\r\n7:31 AM,A1\r\n";
    let schedule = Schedule::from_table(Table::from_csv(csv), false).unwrap();
    let day = schedule.columns().keys().next().unwrap().clone();
    assert_eq!(day, "Monday A \"Red, away\"");

    let page = render_page(&schedule, &RenderOptions::default()).unwrap();
    assert!(page.contains("&quot;Red, away&quot;"));
}
