//! Record model and domain-validity bounds
//!
//! A [`Record`] is the structured unit of data being mutated and profiled.
//! Records are immutable snapshots: mutation strategies build new values,
//! never edit in place. Schema validation happens once, at ingestion
//! ([`Record::from_raw`]), so everything downstream operates on fully
//! typed data.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single tabular record
///
/// `id` is the stable identity: mutation may rewrite any other field but
/// must preserve the id-set of the collection. An `adjustment` above zero
/// represents an injected fault (invalid state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identity, stable across mutation
    pub id: u64,
    /// Categorical grouping key
    pub group_id: u32,
    /// Transaction amount; domain-valid within [`DomainBounds::amount`]
    pub amount: f64,
    /// Applied adjustment; domain-valid within [`DomainBounds::adjustment`],
    /// values above zero are faults
    pub adjustment: f64,
    /// Record date
    pub timestamp: NaiveDate,
}

impl Record {
    /// Create a record from already-validated field values
    #[must_use]
    pub fn new(id: u64, group_id: u32, amount: f64, adjustment: f64, timestamp: NaiveDate) -> Self {
        Self {
            id,
            group_id,
            amount,
            adjustment,
            timestamp,
        }
    }

    /// Validate a raw row into a typed record
    ///
    /// This is the single schema-validation entry point: missing fields,
    /// unparseable dates, and non-finite numerics are rejected here rather
    /// than defaulted or re-checked per field access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when a field is missing or malformed.
    pub fn from_raw(raw: &RawRecord) -> Result<Self> {
        let id = raw
            .id
            .ok_or_else(|| Error::Schema("missing field `id`".to_string()))?;
        let group_id = raw
            .group_id
            .ok_or_else(|| Error::Schema(format!("record {id}: missing field `group_id`")))?;
        let amount = raw
            .amount
            .ok_or_else(|| Error::Schema(format!("record {id}: missing field `amount`")))?;
        if !amount.is_finite() {
            return Err(Error::Schema(format!(
                "record {id}: non-finite `amount` value {amount}"
            )));
        }
        let adjustment = raw
            .adjustment
            .ok_or_else(|| Error::Schema(format!("record {id}: missing field `adjustment`")))?;
        if !adjustment.is_finite() {
            return Err(Error::Schema(format!(
                "record {id}: non-finite `adjustment` value {adjustment}"
            )));
        }
        let date_str = raw
            .timestamp
            .as_deref()
            .ok_or_else(|| Error::Schema(format!("record {id}: missing field `timestamp`")))?;
        let timestamp = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            Error::Schema(format!("record {id}: invalid timestamp {date_str:?}: {e}"))
        })?;

        Ok(Self::new(id, group_id, amount, adjustment, timestamp))
    }
}

/// Untyped ingestion form of a record
///
/// External loaders hand rows over in this shape; [`Record::from_raw`]
/// turns them into typed records or fails with a schema error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Unique identity
    pub id: Option<u64>,
    /// Categorical grouping key
    pub group_id: Option<u32>,
    /// Transaction amount
    pub amount: Option<f64>,
    /// Applied adjustment
    pub adjustment: Option<f64>,
    /// Record date as `YYYY-MM-DD`
    pub timestamp: Option<String>,
}

/// Domain-validity ranges for record fields
///
/// Records with both fields in range are realistic enough to serve as
/// donors; an adjustment above the valid range is a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBounds {
    /// Valid amount range
    pub amount: RangeInclusive<f64>,
    /// Valid adjustment range
    pub adjustment: RangeInclusive<f64>,
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self {
            amount: 50.0..=1000.0,
            adjustment: -30.0..=0.0,
        }
    }
}

impl DomainBounds {
    /// Whether the record's amount is within the valid range
    #[must_use]
    pub fn amount_valid(&self, record: &Record) -> bool {
        self.amount.contains(&record.amount)
    }

    /// Whether the record's adjustment is within the valid range
    #[must_use]
    pub fn adjustment_valid(&self, record: &Record) -> bool {
        self.adjustment.contains(&record.adjustment)
    }

    /// Whether the record is fully field-valid (the donor criterion)
    #[must_use]
    pub fn record_valid(&self, record: &Record) -> bool {
        self.amount_valid(record) && self.adjustment_valid(record)
    }
}
