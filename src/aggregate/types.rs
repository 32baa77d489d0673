//! Data types produced by the yearly scan.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DataError, Result};
use crate::locations::LocationRecord;
use crate::value::Value;

/// Arts master's degree totals for one institution in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeAggregate {
    pub unitid: i64,
    /// Number of qualifying rows (one per CIP code) for this institution.
    pub subjects: u64,
    /// Men plus women summed over those rows.
    pub degrees: i64,
    pub year: String,
    pub lon: Value,
    pub lat: Value,
    pub name: String,
}

impl DegreeAggregate {
    pub(crate) fn first(location: &LocationRecord, year: &str, degrees: i64) -> Self {
        Self {
            unitid: location.unitid,
            subjects: 1,
            degrees,
            year: year.to_string(),
            lon: location.lon.clone(),
            lat: location.lat.clone(),
            name: location.name.clone(),
        }
    }

    pub(crate) fn add(&mut self, degrees: i64, row: u64) -> Result<()> {
        self.degrees = self
            .degrees
            .checked_add(degrees)
            .ok_or(DataError::CountOverflow {
                unitid: self.unitid,
                row,
            })?;
        self.subjects += 1;
        Ok(())
    }
}

/// How a yearly scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    /// Every row in the file was read.
    Completed,
    /// A qualifying row named an institution missing from the location
    /// index, or a unitid that is not a whole number; rows after it were
    /// not read. `unitid` is the field as it appeared.
    Aborted { unitid: String, row: u64 },
}

/// Result of scanning one yearly file.
#[derive(Debug, Clone, PartialEq)]
pub struct YearScan {
    /// Aggregates in order of each unitid's first qualifying row.
    pub aggregates: Vec<DegreeAggregate>,
    pub status: ScanStatus,
    pub rows_scanned: u64,
}

impl YearScan {
    pub fn completed(&self) -> bool {
        self.status == ScanStatus::Completed
    }
}

/// The document written to disk: year label to that year's aggregates.
pub type YearlyResults = BTreeMap<String, Vec<DegreeAggregate>>;
