//! Coverage, fault, and naturalness evaluation
//!
//! Pure aggregation over a mutated, re-profiled collection. The evaluator
//! never mutates its input and never returns partial metrics: an empty
//! collection fails loudly rather than letting naturalness degrade to 0
//! or NaN.

use serde::Serialize;

use crate::engine::{InMemoryEngine, QueryEngine};
use crate::profiler::ProfiledRecord;
use crate::record::{DomainBounds, Record};
use crate::{Error, Result};

/// Evaluation result for one mutated collection
#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    /// Number of distinct branch vectors observed
    pub coverage: usize,
    /// Number of records with an adjustment above zero
    pub faults: usize,
    /// Record count
    pub total: usize,
    /// Fraction of records with a domain-valid amount
    pub valid_amount_fraction: f64,
    /// Fraction of records with a domain-valid adjustment
    pub valid_adjustment_fraction: f64,
    /// `valid_amount_fraction * valid_adjustment_fraction * 100`;
    /// 100 only when every record is fully field-valid
    pub naturalness: f64,
    /// The fault subset, retained for reporting
    pub faulty_records: Vec<Record>,
}

/// Metric evaluator over fixed domain bounds
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    bounds: DomainBounds,
}

impl Evaluator {
    /// Create an evaluator with the default domain bounds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with custom domain bounds
    #[must_use]
    pub fn with_bounds(bounds: DomainBounds) -> Self {
        Self { bounds }
    }

    /// Evaluate a profiled collection with the in-memory engine
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when the collection is empty.
    pub fn evaluate(&self, records: &[ProfiledRecord]) -> Result<Metrics> {
        self.evaluate_with(records, &InMemoryEngine)
    }

    /// Evaluate through a caller-supplied query engine
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when the collection is empty.
    pub fn evaluate_with(
        &self,
        records: &[ProfiledRecord],
        engine: &impl QueryEngine,
    ) -> Result<Metrics> {
        let total = engine.count(records);
        if total == 0 {
            return Err(Error::EmptyInput);
        }

        let coverage = engine.distinct_branch_vectors(records);
        let faulty = engine.filter(records, &|p| p.record.adjustment > 0.0);
        let valid_amount = engine
            .filter(records, &|p| self.bounds.amount_valid(&p.record))
            .len();
        let valid_adjustment = engine
            .filter(records, &|p| self.bounds.adjustment_valid(&p.record))
            .len();

        let valid_amount_fraction = valid_amount as f64 / total as f64;
        let valid_adjustment_fraction = valid_adjustment as f64 / total as f64;

        Ok(Metrics {
            coverage,
            faults: faulty.len(),
            total,
            valid_amount_fraction,
            valid_adjustment_fraction,
            naturalness: valid_amount_fraction * valid_adjustment_fraction * 100.0,
            faulty_records: faulty.into_iter().map(|p| p.record).collect(),
        })
    }
}
