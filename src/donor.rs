//! Donor pool construction
//!
//! The donor pool is the validity-filtered subset of a profiled record
//! collection. Donors supply realistic replacement values to the guided
//! strategy: spliced fields stay within the real data distribution rather
//! than being synthesized from a uniform range.
//!
//! The pool is rebuilt fresh from the current collection before each
//! guided pass. An empty pool is a valid state, not an error; the guided
//! strategy degrades to a no-op when nothing qualifies as a donor.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::QueryEngine;
use crate::profiler::ProfiledRecord;
use crate::record::DomainBounds;

/// Read-only pool of domain-valid donor records
///
/// Stored as a vector for O(1) uniform sampling, but construction order
/// carries no meaning and the API exposes no positions. Selection is
/// sampling, nothing more.
#[derive(Debug, Clone, Default)]
pub struct DonorPool {
    donors: Vec<ProfiledRecord>,
}

impl DonorPool {
    /// Filter the collection down to records satisfying the validity bounds
    #[must_use]
    pub fn build(
        records: &[ProfiledRecord],
        bounds: &DomainBounds,
        engine: &impl QueryEngine,
    ) -> Self {
        let donors = engine.filter(records, &|p| bounds.record_valid(&p.record));
        Self { donors }
    }

    /// Number of donors
    #[must_use]
    pub fn len(&self) -> usize {
        self.donors.len()
    }

    /// Whether no record qualified as a donor
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    /// Draw one donor uniformly at random; `None` when the pool is empty
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ProfiledRecord> {
        self.donors.choose(rng)
    }

    /// Draw one donor adjustment value uniformly at random
    pub fn choose_adjustment<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f64> {
        self.donors.choose(rng).map(|d| d.record.adjustment)
    }
}
