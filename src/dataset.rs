//! Demo seed dataset and JSON ingestion
//!
//! Dataset construction is an external concern; this module only carries
//! the built-in five-row sales seed used by the CLI and the test
//! scenarios, plus the raw-row JSON ingestion path that performs the
//! one-shot schema validation.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::record::{DomainBounds, RawRecord, Record};
use crate::{Error, Result};

/// The calendar constants below are statically valid; the fallback is
/// unreachable.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The built-in five-row sales seed
///
/// One record (id 4) carries an out-of-range adjustment: the injected
/// seed fault the guided strategy preserves as a correctness oracle. The
/// other four records are fully domain-valid and form the donor pool.
#[must_use]
pub fn demo_seed() -> Vec<Record> {
    vec![
        Record::new(1, 101, 200.0, -10.0, date(2023, 11, 15)),
        Record::new(2, 102, 500.0, -20.0, date(2023, 11, 20)),
        Record::new(3, 103, 100.0, -5.0, date(2023, 12, 10)),
        Record::new(4, 101, 200.0, 10.0, date(2023, 11, 25)), // injected fault
        Record::new(5, 104, 300.0, -15.0, date(2023, 12, 5)),
    ]
}

/// The conventional seed-fault designation: the first record whose
/// adjustment falls outside the valid range
#[must_use]
pub fn seed_fault_id(records: &[Record], bounds: &DomainBounds) -> Option<u64> {
    records
        .iter()
        .find(|r| !bounds.adjustment_valid(r))
        .map(|r| r.id)
}

/// Parse a JSON array of raw rows into validated records
///
/// # Errors
///
/// Returns [`Error::Serialization`] for malformed JSON and
/// [`Error::Schema`] for rows that fail validation.
pub fn records_from_json(content: &str) -> Result<Vec<Record>> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(content).map_err(|e| Error::Serialization(e.to_string()))?;
    raw.iter().map(Record::from_raw).collect()
}

/// Load validated records from a JSON file
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, plus the errors of
/// [`records_from_json`].
pub fn load_json(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)?;
    records_from_json(&content)
}
