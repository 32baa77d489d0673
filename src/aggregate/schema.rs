//! Column layout of a yearly completions file.
//!
//! Survey years disagree on the names of the total men/women columns, so the
//! variant is detected from the header before any row is read.

use crate::error::Result;
use crate::row::{Column, Header};

pub const CIPCODE_COLUMN: &str = "cipcode";
pub const AWLEVEL_COLUMN: &str = "awlevel";
pub const UNITID_COLUMN: &str = "unitid";

const RACE_MEN: &str = "crace15";
const RACE_WOMEN: &str = "crace16";
const LEGACY_MEN: &str = "ctotalm";
const LEGACY_WOMEN: &str = "ctotalw";

/// Where the men and women totals live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountColumns {
    /// `ctotalm` / `ctotalw`
    Legacy { men: Column, women: Column },
    /// `crace15` / `crace16`
    Race { men: Column, women: Column },
}

impl CountColumns {
    /// Picks the race columns whenever `crace15` is present, even if the
    /// legacy pair also exists.
    pub fn detect(header: &Header, path: &str) -> Result<Self> {
        if header.contains(RACE_MEN) {
            Ok(CountColumns::Race {
                men: header.column(RACE_MEN, path)?,
                women: header.column(RACE_WOMEN, path)?,
            })
        } else {
            Ok(CountColumns::Legacy {
                men: header.column(LEGACY_MEN, path)?,
                women: header.column(LEGACY_WOMEN, path)?,
            })
        }
    }

    pub fn men(&self) -> &Column {
        match self {
            CountColumns::Legacy { men, .. } | CountColumns::Race { men, .. } => men,
        }
    }

    pub fn women(&self) -> &Column {
        match self {
            CountColumns::Legacy { women, .. } | CountColumns::Race { women, .. } => women,
        }
    }
}

/// Every column the scan reads, resolved against a lowercased header.
#[derive(Debug, Clone)]
pub struct YearlyColumns {
    pub cipcode: Column,
    pub awlevel: Column,
    pub unitid: Column,
    pub counts: CountColumns,
}

impl YearlyColumns {
    pub fn resolve(header: &Header, path: &str) -> Result<Self> {
        Ok(Self {
            cipcode: header.column(CIPCODE_COLUMN, path)?,
            awlevel: header.column(AWLEVEL_COLUMN, path)?,
            unitid: header.column(UNITID_COLUMN, path)?,
            counts: CountColumns::detect(header, path)?,
        })
    }
}
