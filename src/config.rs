//! Fixed input and output locations of a run.

use std::path::PathBuf;

/// Reference file read when no override is given.
pub const DEFAULT_REFERENCE_PATH: &str = "school-names-locations.csv";
/// Directory scanned for yearly `.csv` files.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Directory the timestamped JSON is written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub reference_path: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
