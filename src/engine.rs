//! Minimal query capability over profiled record collections
//!
//! The heavy execution engine that evaluates predicates over row
//! collections is an external collaborator. The core only needs three
//! capabilities (filter by predicate, count distinct branch vectors,
//! count), captured by the [`QueryEngine`] trait. Any host (in-memory,
//! batch, distributed) satisfying it can run the donor pool and the
//! evaluator unchanged. [`InMemoryEngine`] is the default host.

use std::collections::HashSet;

use crate::profiler::ProfiledRecord;

/// The query capabilities the core requires from its execution engine
pub trait QueryEngine {
    /// Return the subset of records satisfying `predicate`, in input order
    fn filter(
        &self,
        records: &[ProfiledRecord],
        predicate: &dyn Fn(&ProfiledRecord) -> bool,
    ) -> Vec<ProfiledRecord>;

    /// Count distinct branch vectors across the collection
    fn distinct_branch_vectors(&self, records: &[ProfiledRecord]) -> usize;

    /// Record count
    fn count(&self, records: &[ProfiledRecord]) -> usize {
        records.len()
    }
}

/// Straightforward in-memory implementation of [`QueryEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryEngine;

impl QueryEngine for InMemoryEngine {
    fn filter(
        &self,
        records: &[ProfiledRecord],
        predicate: &dyn Fn(&ProfiledRecord) -> bool,
    ) -> Vec<ProfiledRecord> {
        records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    fn distinct_branch_vectors(&self, records: &[ProfiledRecord]) -> usize {
        records
            .iter()
            .map(|r| &r.branches)
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::{PredicateSet, Profiler};
    use crate::record::Record;
    use chrono::NaiveDate;

    fn profiled() -> Vec<ProfiledRecord> {
        let date = |m, d| NaiveDate::from_ymd_opt(2023, m, d).expect("valid test date");
        let records = vec![
            Record::new(1, 101, 200.0, -10.0, date(11, 15)),
            Record::new(2, 102, 500.0, -20.0, date(11, 20)),
            Record::new(3, 103, 100.0, -5.0, date(12, 10)),
        ];
        Profiler::new(PredicateSet::sales()).profile(&records)
    }

    #[test]
    fn test_filter_subset() {
        let engine = InMemoryEngine;
        let records = profiled();
        let high = engine.filter(&records, &|p| p.record.amount > 150.0);
        assert_eq!(high.len(), 2);
        assert_eq!(high[0].record.id, 1);
        assert_eq!(high[1].record.id, 2);
    }

    #[test]
    fn test_filter_none_match() {
        let engine = InMemoryEngine;
        let records = profiled();
        let none = engine.filter(&records, &|p| p.record.amount > 10_000.0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_distinct_branch_vectors() {
        let engine = InMemoryEngine;
        let records = profiled();
        // Patterns: 101, 110, 000, all distinct
        assert_eq!(engine.distinct_branch_vectors(&records), 3);
    }

    #[test]
    fn test_count() {
        let engine = InMemoryEngine;
        let records = profiled();
        assert_eq!(engine.count(&records), 3);
        assert_eq!(engine.count(&[]), 0);
    }
}
