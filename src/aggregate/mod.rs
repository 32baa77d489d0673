//! Per-year aggregation of completions rows.
//!
//! Each yearly CSV is scanned once: rows are filtered to arts master's
//! degrees, counts are summed per institution, and every institution is
//! joined to its location.

pub mod scan;
pub mod schema;
pub mod types;
