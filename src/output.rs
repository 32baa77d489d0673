//! JSON persistence for the yearly results.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::aggregate::types::YearlyResults;

const INDENT: &[u8] = b"    ";

/// Name of the output file for a run started at `timestamp` (Unix seconds).
pub fn output_file_name(timestamp: i64) -> String {
    format!("{timestamp}_output.json")
}

/// Full output path inside `dir` for a run started at `timestamp`.
pub fn output_path(dir: &Path, timestamp: i64) -> PathBuf {
    dir.join(output_file_name(timestamp))
}

/// Serializes `value` as JSON indented with four spaces.
pub fn write_pretty_json<W: Write>(writer: W, value: &impl Serialize) -> Result<()> {
    let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(())
}

/// Writes the complete year-keyed mapping to `path`, replacing any existing file.
pub fn write_results(path: &Path, results: &YearlyResults) -> Result<()> {
    debug!(path = %path.display(), years = results.len(), "Writing results");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_pretty_json(&mut writer, results)?;
    writer.flush()?;

    info!(path = %path.display(), "Results written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::types::DegreeAggregate;
    use crate::value::Value;

    fn sample() -> YearlyResults {
        let mut results = YearlyResults::new();
        results.insert(
            "2020".to_string(),
            vec![DegreeAggregate {
                unitid: 100,
                subjects: 2,
                degrees: 7,
                year: "2020".to_string(),
                lon: Value::Float(-75.1),
                lat: Value::Float(40.2),
                name: "Test University".to_string(),
            }],
        );
        results.insert(
            "2012".to_string(),
            vec![DegreeAggregate {
                unitid: 300,
                subjects: 1,
                degrees: 2,
                year: "2012".to_string(),
                lon: Value::Text(String::new()),
                lat: Value::Integer(37),
                name: "No Coords College".to_string(),
            }],
        );
        results.insert("2015".to_string(), Vec::new());
        results
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(1700000000), "1700000000_output.json");
        assert_eq!(
            output_path(Path::new("out"), 42),
            Path::new("out").join("42_output.json")
        );
    }

    #[test]
    fn test_four_space_indent() {
        let mut buf = Vec::new();
        write_pretty_json(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("\n    \"2020\": [\n        {\n            \"unitid\": 100,"));
        assert!(text.contains("\"lon\": -75.1,"));
        assert!(text.contains("\"2015\": []"));
        assert!(text.contains("\"lon\": \"\","));
        assert!(text.contains("\"lat\": 37,"));
    }

    #[test]
    fn test_field_order_matches_output_shape() {
        let mut buf = Vec::new();
        write_pretty_json(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let keys = ["unitid", "subjects", "degrees", "year", "lon", "lat", "name"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_json_round_trip() {
        let results = sample();
        let mut buf = Vec::new();
        write_pretty_json(&mut buf, &results).unwrap();

        let parsed: YearlyResults = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn test_write_results_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), 1);

        write_results(&path, &sample()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["2020"][0]["degrees"], 7);
        assert_eq!(parsed["2020"][0]["name"], "Test University");
    }
}
