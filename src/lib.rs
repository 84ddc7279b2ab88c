//! Mutar - Coverage-Guided Data Mutation Harness
//!
//! Mutar perturbs a seed dataset to maximize observed branch coverage in
//! a downstream decision function while keeping the mutated data
//! statistically realistic, and compares the guided strategy against
//! naive mutators.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         MUTAR CORE                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Records  →  Profiler  →  Mutation   →  Profiler  →  Metrics │
//! │  (typed)     (branches)   Strategies    (re-profile) (eval)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Seed records are profiled into branch vectors, mutated by one of the
//! registered strategies, re-profiled, and evaluated for coverage, fault
//! density, and naturalness. The comparison harness runs all strategies
//! over the same seed and collects per-strategy metrics.
//!
//! # Quick Start
//!
//! ```rust
//! use mutar::{compare, dataset, StrategyKind};
//!
//! let seed = dataset::demo_seed();
//! let results = compare(&seed, &StrategyKind::all(), 42).expect("comparison should succeed");
//!
//! let guided = &results["guided"];
//! assert!(guided.faults >= 1);
//! assert!(guided.naturalness > 0.0 && guided.naturalness < 100.0);
//! ```
//!
//! # Modules
//!
//! - [`record`] - Typed record model, raw-row validation, domain bounds
//! - [`profiler`] - Branch predicates and coverage vectors
//! - [`engine`] - Minimal query capability over record collections
//! - [`donor`] - Validity-filtered donor pool
//! - [`mutation`] - Guided, Random, and Boundary strategies
//! - [`evaluator`] - Coverage / fault / naturalness metrics
//! - [`harness`] - Parallel strategy comparison and trial aggregation
//! - [`dataset`] - Demo seed and JSON ingestion

pub mod dataset;
pub mod donor;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod harness;
pub mod mutation;
pub mod profiler;
pub mod record;

use std::collections::BTreeMap;

pub use donor::DonorPool;
pub use engine::{InMemoryEngine, QueryEngine};
pub use error::{Error, Result};
pub use evaluator::{Evaluator, Metrics};
pub use harness::{ComparisonHarness, TrialSummary};
pub use mutation::{MutationConfig, Mutator, StrategyKind};
pub use profiler::{
    BranchPredicate, BranchVector, PredicateKind, PredicateSet, ProfiledRecord, Profiler,
};
pub use record::{DomainBounds, RawRecord, Record};

/// Profile a record collection against a predicate set
#[must_use]
pub fn profile(records: &[Record], predicates: &PredicateSet) -> Vec<ProfiledRecord> {
    Profiler::new(predicates.clone()).profile(records)
}

/// Apply a mutation strategy with the default configuration
///
/// Fault preservation is a configured property; use
/// [`Mutator::with_config`] to designate a preserved record id.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the configuration is invalid.
pub fn mutate(
    kind: StrategyKind,
    records: &[ProfiledRecord],
    predicates: &PredicateSet,
    seed: u64,
) -> Result<Vec<Record>> {
    Mutator::new().mutate(kind, records, predicates, seed)
}

/// Evaluate a profiled collection with the default domain bounds
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] when the collection is empty.
pub fn evaluate(records: &[ProfiledRecord]) -> Result<Metrics> {
    Evaluator::new().evaluate(records)
}

/// Compare strategies over a seed collection
///
/// Applies the conventional seed-fault designation (first record with an
/// out-of-range adjustment) before running the harness, so the guided
/// strategy keeps a known fault reachable.
///
/// # Errors
///
/// Propagates configuration and evaluation failures from the harness.
pub fn compare(
    seed_records: &[Record],
    strategies: &[StrategyKind],
    seed: u64,
) -> Result<BTreeMap<String, Metrics>> {
    let config = MutationConfig::default();
    let preserve_id = dataset::seed_fault_id(seed_records, &config.bounds);
    ComparisonHarness::new()
        .strategies(strategies.to_vec())
        .config(MutationConfig {
            preserve_id,
            ..config
        })
        .seed(seed)
        .compare(seed_records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_free_function() {
        let profiled = profile(&dataset::demo_seed(), &PredicateSet::sales());
        assert_eq!(profiled.len(), 5);
    }

    #[test]
    fn test_mutate_free_function() {
        let predicates = PredicateSet::sales();
        let profiled = profile(&dataset::demo_seed(), &predicates);
        let mutated = mutate(StrategyKind::Boundary, &profiled, &predicates, 42)
            .expect("mutation should succeed");
        assert_eq!(mutated.len(), 5);
    }

    #[test]
    fn test_evaluate_free_function() {
        let profiled = profile(&dataset::demo_seed(), &PredicateSet::sales());
        let metrics = evaluate(&profiled).expect("evaluation should succeed");
        assert_eq!(metrics.total, 5);
        assert_eq!(metrics.faults, 1);
    }

    #[test]
    fn test_compare_designates_fault_by_convention() {
        let results = compare(&dataset::demo_seed(), &StrategyKind::all(), 42)
            .expect("comparison should succeed");
        let guided = &results["guided"];
        assert!(guided.faulty_records.iter().any(|r| r.id == 4));
    }

    #[test]
    fn test_compare_subset_of_strategies() {
        let results = compare(&dataset::demo_seed(), &[StrategyKind::Random], 42)
            .expect("comparison should succeed");
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("random"));
    }
}
