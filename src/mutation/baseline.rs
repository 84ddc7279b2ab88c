//! Baseline mutation strategies
//!
//! Two naive mutators the guided strategy is compared against. Neither
//! consults the donor pool; both are pure functions of the input and the
//! random stream, and both preserve cardinality and the id-set.

use chrono::NaiveDate;
use rand::Rng;

use crate::profiler::ProfiledRecord;
use crate::record::Record;

/// Lower bound of the random strategy's amount range
const RANDOM_AMOUNT_MIN: f64 = 50.0;
/// Upper bound of the random strategy's amount range (out of domain)
const RANDOM_AMOUNT_MAX: f64 = 1050.0;
/// Bounds of the random strategy's adjustment range (half out of domain)
const RANDOM_ADJUSTMENT_MIN: f64 = -30.0;
const RANDOM_ADJUSTMENT_MAX: f64 = 30.0;

/// Boundary strategy extremes: schema-valid, not necessarily field-valid
const BOUNDARY_AMOUNT_LOW: f64 = 1.0;
const BOUNDARY_AMOUNT_HIGH: f64 = 999.0;
const BOUNDARY_ADJUSTMENT_LOW: f64 = -99.0;
const BOUNDARY_ADJUSTMENT_HIGH: f64 = 99.0;

/// Unguided structural mutator
///
/// Replaces `amount`, `adjustment`, and `timestamp` with draws from wide
/// uniform ranges, independently per field and per record. Expected to
/// produce many domain-invalid records.
pub(super) fn random<R: Rng>(records: &[ProfiledRecord], rng: &mut R) -> Vec<Record> {
    records
        .iter()
        .map(|profiled| {
            let mut next = profiled.record.clone();
            next.amount = rng.gen_range(RANDOM_AMOUNT_MIN..RANDOM_AMOUNT_MAX);
            next.adjustment = rng.gen_range(RANDOM_ADJUSTMENT_MIN..RANDOM_ADJUSTMENT_MAX);
            let month: u32 = rng.gen_range(1..=12);
            let day: u32 = rng.gen_range(1..=28);
            next.timestamp =
                NaiveDate::from_ymd_opt(2023, month, day).unwrap_or(profiled.record.timestamp);
            next
        })
        .collect()
}

/// Extreme-value mutator
///
/// Coin-flips `amount` and `adjustment` between two fixed extremes each.
/// The values stay schema-valid but mostly fall outside the domain-valid
/// ranges.
pub(super) fn boundary<R: Rng>(records: &[ProfiledRecord], rng: &mut R) -> Vec<Record> {
    records
        .iter()
        .map(|profiled| {
            let mut next = profiled.record.clone();
            next.amount = if rng.gen_bool(0.5) {
                BOUNDARY_AMOUNT_HIGH
            } else {
                BOUNDARY_AMOUNT_LOW
            };
            next.adjustment = if rng.gen_bool(0.5) {
                BOUNDARY_ADJUSTMENT_LOW
            } else {
                BOUNDARY_ADJUSTMENT_HIGH
            };
            next
        })
        .collect()
}
