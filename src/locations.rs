//! Institution location lookup built from the reference CSV.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::row::{Header, RawRow};
use crate::value::Value;

pub const UNITID_COLUMN: &str = "unitid";
pub const LONGITUDE_COLUMN: &str = "HD2012.Longitude location of institution";
pub const LATITUDE_COLUMN: &str = "HD2012.Latitude location of institution";
pub const NAME_COLUMN: &str = "institution name";

/// Location metadata for one institution.
///
/// Coordinates keep whatever the reference file held: a number when the
/// field parses, otherwise the original text (possibly empty).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    pub unitid: i64,
    pub lon: Value,
    pub lat: Value,
    pub name: String,
}

/// Read-only map from unitid to [`LocationRecord`].
#[derive(Debug, Default, Clone)]
pub struct LocationIndex {
    records: HashMap<i64, LocationRecord>,
}

impl LocationIndex {
    pub fn get(&self, unitid: i64) -> Option<&LocationRecord> {
        self.records.get(&unitid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<LocationRecord> for LocationIndex {
    fn from_iter<I: IntoIterator<Item = LocationRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|r| (r.unitid, r)).collect(),
        }
    }
}

/// Opens the reference CSV at `path` and builds the index.
pub fn load_locations(path: &Path) -> Result<LocationIndex> {
    let file = File::open(path)
        .with_context(|| format!("opening location reference {}", path.display()))?;
    read_locations(file, &path.display().to_string())
}

/// Builds the index from any CSV source. `source` names it in errors and logs.
///
/// Every row produces a record; a repeated unitid replaces the earlier row.
#[tracing::instrument(skip(reader))]
pub fn read_locations<R: Read>(reader: R, source: &str) -> Result<LocationIndex> {
    info!("Parsing locations");

    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let header = Header::exact(rdr.headers()?);

    let unitid_col = header.column(UNITID_COLUMN, source)?;
    let lon_col = header.column(LONGITUDE_COLUMN, source)?;
    let lat_col = header.column(LATITUDE_COLUMN, source)?;
    let name_col = header.column(NAME_COLUMN, source)?;

    let mut records = HashMap::new();
    let mut overwritten = 0usize;

    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading {source}"))?;
        let row = RawRow::new(&record, i as u64 + 1);

        let unitid = row.value(&unitid_col)?.as_integral(UNITID_COLUMN, row.row)?;
        let entry = LocationRecord {
            unitid,
            lon: row.value(&lon_col)?,
            lat: row.value(&lat_col)?,
            name: row.raw(&name_col)?.to_string(),
        };

        if records.insert(unitid, entry).is_some() {
            overwritten += 1;
        }
    }

    if overwritten > 0 {
        warn!(overwritten, "Duplicate unitids in location reference, later rows kept");
    }
    info!(records = records.len(), "Locations done");

    Ok(LocationIndex { records })
}
