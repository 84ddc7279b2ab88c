//! Guided (donor-based) mutation
//!
//! The core algorithm. Per record, a weighted coin picks one of two
//! branches:
//!
//! - **Donor splice** (default probability 0.7): recombine fields from a
//!   uniformly chosen donor. `group_id` and `adjustment` always come from
//!   the donor; `amount` is copied only when the record's
//!   amount-threshold bit is 0 and the donor's is 1. The splice is
//!   asymmetric on purpose: it only pulls records toward the rarer
//!   high-value regime and never pushes covered records out of it.
//! - **Repair** (the complement): an already-valid adjustment passes
//!   through unchanged; an invalid one is replaced with a uniformly
//!   chosen donor adjustment.
//!
//! The preserved fault record bypasses both branches. An empty donor
//! pool turns the whole pass into a deterministic no-op.

use rand::Rng;

use crate::donor::DonorPool;
use crate::engine::QueryEngine;
use crate::profiler::{PredicateSet, ProfiledRecord};
use crate::record::Record;

use super::MutationConfig;

pub(super) fn mutate<R: Rng>(
    records: &[ProfiledRecord],
    predicates: &PredicateSet,
    config: &MutationConfig,
    engine: &impl QueryEngine,
    rng: &mut R,
) -> Vec<Record> {
    let pool = DonorPool::build(records, &config.bounds, engine);
    if pool.is_empty() {
        // Degenerate case: no record qualifies as a donor. The pass is a
        // documented no-op, not a failure.
        return records.iter().map(|p| p.record.clone()).collect();
    }
    let amount_branch = predicates.amount_branch();

    records
        .iter()
        .map(|profiled| {
            if config.preserve_id == Some(profiled.record.id) {
                return profiled.record.clone();
            }
            if rng.gen::<f64>() < config.donor_splice_probability {
                match pool.choose(rng) {
                    Some(donor) => splice(profiled, donor, amount_branch),
                    None => profiled.record.clone(),
                }
            } else {
                repair(profiled, &pool, config, rng)
            }
        })
        .collect()
}

/// Recombine donor fields into the record
///
/// `amount` moves only toward the donor's regime: the copy happens when
/// the record sits below the amount threshold and the donor above it.
fn splice(
    profiled: &ProfiledRecord,
    donor: &ProfiledRecord,
    amount_branch: Option<usize>,
) -> Record {
    let mut next = profiled.record.clone();
    if let Some(index) = amount_branch {
        if !profiled.branches.bit(index) && donor.branches.bit(index) {
            next.amount = donor.record.amount;
        }
    }
    next.group_id = donor.record.group_id;
    next.adjustment = donor.record.adjustment;
    next
}

/// Nudge an invalid adjustment back into range; leave valid ones alone
fn repair<R: Rng>(
    profiled: &ProfiledRecord,
    pool: &DonorPool,
    config: &MutationConfig,
    rng: &mut R,
) -> Record {
    if config.bounds.adjustment_valid(&profiled.record) {
        return profiled.record.clone();
    }
    let mut next = profiled.record.clone();
    if let Some(adjustment) = pool.choose_adjustment(rng) {
        next.adjustment = adjustment;
    }
    next
}
