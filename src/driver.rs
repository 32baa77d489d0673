//! Runs the whole batch: locations, every yearly file, one JSON document.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::aggregate::scan::scan_year_file;
use crate::aggregate::types::YearlyResults;
use crate::config::RunConfig;
use crate::locations::load_locations;
use crate::output::{output_path, write_results};

/// A yearly file found in the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyInput {
    pub year: String,
    pub path: PathBuf,
}

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    /// Files whose scan stopped at a missing location.
    pub aborted: usize,
    pub aggregates: usize,
    pub output: PathBuf,
}

/// Year label from a file name: characters 1 through 4, so `c2012_a.csv`
/// gives `2012`. Shorter names give whatever is there.
pub fn year_label(file_name: &str) -> String {
    file_name.chars().skip(1).take(4).collect()
}

/// Lists `.csv` files in `dir`, in directory order.
pub fn discover_inputs(dir: &Path) -> Result<Vec<YearlyInput>> {
    let mut inputs = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "Skipping non UTF-8 file name");
            continue;
        };
        if !name.ends_with(".csv") {
            continue;
        }
        if !entry.file_type()?.is_file() {
            debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }

        inputs.push(YearlyInput {
            year: year_label(&name),
            path,
        });
    }

    Ok(inputs)
}

/// Builds the location index, scans every yearly file, and writes
/// `<started_at>_output.json` into the output directory.
///
/// A later file with the same year label replaces the earlier one.
#[tracing::instrument(skip_all, fields(data_dir = %config.data_dir.display()))]
pub fn run(config: &RunConfig, started_at: DateTime<Utc>) -> Result<RunSummary> {
    let locations = load_locations(&config.reference_path)?;
    let inputs = discover_inputs(&config.data_dir)?;
    info!(files = inputs.len(), "Yearly files found");

    let mut results = YearlyResults::new();
    let mut aborted = 0;

    for input in &inputs {
        let scan = scan_year_file(&input.path, &input.year, &locations)
            .with_context(|| format!("aggregating {}", input.path.display()))?;
        if !scan.completed() {
            aborted += 1;
        }
        if results.insert(input.year.clone(), scan.aggregates).is_some() {
            warn!(
                year = %input.year,
                path = %input.path.display(),
                "Year already processed, replacing"
            );
        }
    }

    let output = output_path(&config.output_dir, started_at.timestamp());
    write_results(&output, &results)?;

    let summary = RunSummary {
        files: inputs.len(),
        aborted,
        aggregates: results.values().map(Vec::len).sum(),
        output,
    };
    info!(
        files = summary.files,
        aborted = summary.aborted,
        aggregates = summary.aggregates,
        "Run complete"
    );
    Ok(summary)
}
