use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::aggregate::schema::{AWLEVEL_COLUMN, CIPCODE_COLUMN, UNITID_COLUMN, YearlyColumns};
use crate::aggregate::types::{DegreeAggregate, ScanStatus, YearScan};
use crate::error::DataError;
use crate::locations::LocationIndex;
use crate::row::{Header, RawRow};
use crate::value::Value;

/// Six-digit CIP codes for visual and performing arts: 50.0000 through 59.9999.
const ARTS_CIP_RANGE: std::ops::Range<f64> = 50_000.0..60_000.0;
/// Two-digit CIP family for visual and performing arts.
const ARTS_CIP_FAMILY: f64 = 50.0;
/// Award level code for a master's degree.
const MASTERS_AWLEVEL: i64 = 7;

const PROGRESS_INTERVAL: u64 = 500;

/// Whether a CIP code falls in the arts field, in six-digit or two-digit form.
pub fn is_arts_subject(cipcode: f64) -> bool {
    ARTS_CIP_RANGE.contains(&cipcode) || cipcode.floor() == ARTS_CIP_FAMILY
}

/// Opens the yearly CSV at `path` and scans it.
pub fn scan_year_file(path: &Path, year: &str, locations: &LocationIndex) -> Result<YearScan> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    scan_year(file, year, locations, &path.display().to_string())
}

/// Sums arts master's degrees per institution for one year.
///
/// The first qualifying row for an institution missing from `locations`
/// ends the scan; the aggregates collected before it are returned with
/// [`ScanStatus::Aborted`].
#[tracing::instrument(skip(reader, locations))]
pub fn scan_year<R: Read>(
    reader: R,
    year: &str,
    locations: &LocationIndex,
    source: &str,
) -> Result<YearScan> {
    info!("Parsing yearly file");

    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let header = Header::lowercased(rdr.headers()?);
    let columns = YearlyColumns::resolve(&header, source)?;
    debug!(counts = ?columns.counts, "Resolved count columns");

    let mut aggregates: Vec<DegreeAggregate> = Vec::new();
    let mut positions: HashMap<i64, usize> = HashMap::new();
    let mut status = ScanStatus::Completed;
    let mut rows_scanned = 0u64;

    for result in rdr.records() {
        let record = result.with_context(|| format!("reading {source}"))?;
        rows_scanned += 1;
        if rows_scanned % PROGRESS_INTERVAL == 0 {
            info!(rows = rows_scanned, "Scanning");
        }

        let row = RawRow::new(&record, rows_scanned);

        let cipcode = row
            .value_or_zero(&columns.cipcode)?
            .as_f64(CIPCODE_COLUMN, row.row)?;
        if !is_arts_subject(cipcode) {
            continue;
        }
        if !row.value_or_zero(&columns.awlevel)?.equals_code(MASTERS_AWLEVEL) {
            continue;
        }

        let men = row
            .value_or_zero(columns.counts.men())?
            .as_integral(&columns.counts.men().name, row.row)?;
        let women = row
            .value_or_zero(columns.counts.women())?
            .as_integral(&columns.counts.women().name, row.row)?;

        let unitid_value = row.value_or_zero(&columns.unitid)?;
        let Ok(unitid) = unitid_value.as_integral(UNITID_COLUMN, row.row) else {
            status = abort(&unitid_value, row.row);
            break;
        };

        let degrees = men
            .checked_add(women)
            .ok_or(DataError::CountOverflow {
                unitid,
                row: row.row,
            })?;

        if let Some(&i) = positions.get(&unitid) {
            aggregates[i].add(degrees, row.row)?;
            continue;
        }

        match locations.get(unitid) {
            Some(location) => {
                positions.insert(unitid, aggregates.len());
                aggregates.push(DegreeAggregate::first(location, year, degrees));
            }
            None => {
                status = abort(&unitid_value, row.row);
                break;
            }
        }
    }

    let completed = status == ScanStatus::Completed;
    info!(
        institutions = aggregates.len(),
        rows = rows_scanned,
        completed,
        "Finished yearly file"
    );

    Ok(YearScan {
        aggregates,
        status,
        rows_scanned,
    })
}

fn abort(unitid: &Value, row: u64) -> ScanStatus {
    warn!(unitid = %unitid, row, "No location for institution, stopping scan");
    ScanStatus::Aborted {
        unitid: unitid.to_string(),
        row,
    }
}
