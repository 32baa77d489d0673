use chrono::{TimeZone, Utc};
use degree_map::aggregate::scan::scan_year_file;
use degree_map::aggregate::types::{ScanStatus, YearlyResults};
use degree_map::config::RunConfig;
use degree_map::driver::run;
use degree_map::locations::load_locations;
use degree_map::value::Value;
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn test_full_pipeline() {
    let out = tempfile::tempdir().unwrap();
    let config = RunConfig {
        reference_path: fixtures().join("school-names-locations.csv"),
        data_dir: fixtures().join("data"),
        output_dir: out.path().to_path_buf(),
    };
    let started_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let summary = run(&config, started_at).expect("pipeline failed");

    assert_eq!(summary.output, out.path().join("1700000000_output.json"));
    assert_eq!(summary.files, 2);
    assert_eq!(summary.aborted, 1);

    let content = std::fs::read_to_string(&summary.output).unwrap();
    let results: YearlyResults = serde_json::from_str(&content).unwrap();
    assert_eq!(results.keys().collect::<Vec<_>>(), vec!["2012", "2020"]);

    let y2020 = &results["2020"];
    let ids: Vec<i64> = y2020.iter().map(|a| a.unitid).collect();
    assert_eq!(ids, vec![100, 200, 300, 400]);
    assert_eq!((y2020[0].subjects, y2020[0].degrees), (2, 7));
    assert_eq!((y2020[1].subjects, y2020[1].degrees), (1, 10));
    assert_eq!(y2020[1].name, "Conservatory of Music, Boston");
    assert_eq!((y2020[2].subjects, y2020[2].degrees), (1, 2));
    assert!(y2020.iter().all(|a| a.year == "2020"));

    // Blank coordinates in the reference pass through as empty strings.
    assert_eq!(y2020[3].name, "No Coords College");
    assert_eq!(y2020[3].lon, Value::Text(String::new()));
    assert_eq!(y2020[3].lat, Value::Text(String::new()));
    assert_eq!(y2020[0].lon, Value::Float(-75.1));

    // 999 has no location: only the rows before it survive.
    let y2012 = &results["2012"];
    assert_eq!(y2012.len(), 1);
    assert_eq!(y2012[0].unitid, 200);
    assert_eq!(y2012[0].degrees, 7);
}

#[test]
fn test_aborted_scan_reports_status() {
    let locations = load_locations(&fixtures().join("school-names-locations.csv")).unwrap();
    let scan = scan_year_file(&fixtures().join("data/c2012_a.csv"), "2012", &locations).unwrap();

    assert_eq!(
        scan.status,
        ScanStatus::Aborted {
            unitid: "999".to_string(),
            row: 2
        }
    );
    assert_eq!(scan.rows_scanned, 2);
}

#[test]
fn test_missing_reference_is_fatal() {
    let out = tempfile::tempdir().unwrap();
    let config = RunConfig {
        reference_path: fixtures().join("missing.csv"),
        data_dir: fixtures().join("data"),
        output_dir: out.path().to_path_buf(),
    };

    assert!(run(&config, Utc::now()).is_err());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}
