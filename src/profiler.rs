//! Branch-coverage profiler
//!
//! Computes a [`BranchVector`] for each record given a fixed, ordered set
//! of named boolean predicates. Profiling is pure and total over validated
//! records: schema problems are rejected at ingestion, so a predicate can
//! always be evaluated.
//!
//! Branch vectors are derived data. They are recomputed after every
//! mutation pass and never edited independently of the record they
//! describe: strategies return plain [`Record`]s, which forces the
//! harness to re-profile before evaluation.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// The boolean condition a branch predicate evaluates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PredicateKind {
    /// `month(timestamp) == month` (1-based)
    MonthEquals(u32),
    /// `amount > threshold`
    AmountAbove(f64),
    /// `group_id == group`
    GroupEquals(u32),
}

impl PredicateKind {
    /// Evaluate the condition against a record
    #[must_use]
    pub fn holds(&self, record: &Record) -> bool {
        match self {
            Self::MonthEquals(month) => record.timestamp.month() == *month,
            Self::AmountAbove(threshold) => record.amount > *threshold,
            Self::GroupEquals(group) => record.group_id == *group,
        }
    }
}

/// A named branch predicate over record fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPredicate {
    name: String,
    kind: PredicateKind,
}

impl BranchPredicate {
    /// Create a named predicate
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PredicateKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Predicate name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Predicate condition
    #[must_use]
    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    /// Evaluate against a record
    #[must_use]
    pub fn holds(&self, record: &Record) -> bool {
        self.kind.holds(record)
    }
}

/// An ordered collection of branch predicates
///
/// The order is fixed at construction and defines the bit order of every
/// [`BranchVector`] produced from this set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateSet {
    predicates: Vec<BranchPredicate>,
}

impl PredicateSet {
    /// Create a predicate set with the given order
    #[must_use]
    pub fn new(predicates: Vec<BranchPredicate>) -> Self {
        Self { predicates }
    }

    /// The default sales-pipeline predicate trio: November timestamps,
    /// high-value amounts (above 250), and group 101 membership.
    #[must_use]
    pub fn sales() -> Self {
        Self::new(vec![
            BranchPredicate::new("november", PredicateKind::MonthEquals(11)),
            BranchPredicate::new("high-value", PredicateKind::AmountAbove(250.0)),
            BranchPredicate::new("group-101", PredicateKind::GroupEquals(101)),
        ])
    }

    /// Number of predicates (bits per branch vector)
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Iterate predicates in bit order
    pub fn iter(&self) -> std::slice::Iter<'_, BranchPredicate> {
        self.predicates.iter()
    }

    /// Predicate names in bit order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.predicates.iter().map(BranchPredicate::name).collect()
    }

    /// Bit index of the first amount-threshold predicate, if any
    ///
    /// The guided strategy steers its donor splice by this branch; a set
    /// without an amount predicate simply never splices `amount`.
    #[must_use]
    pub fn amount_branch(&self) -> Option<usize> {
        self.predicates
            .iter()
            .position(|p| matches!(p.kind, PredicateKind::AmountAbove(_)))
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a BranchPredicate;
    type IntoIter = std::slice::Iter<'a, BranchPredicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fixed-order branch satisfaction pattern, one bit per predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchVector {
    bits: Vec<bool>,
}

impl BranchVector {
    /// Bit at the given predicate index
    #[must_use]
    pub fn bit(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Number of bits
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the vector has no bits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Render as a compact bit string, e.g. `101`
    #[must_use]
    pub fn pattern(&self) -> String {
        self.bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }
}

/// A record together with its derived branch vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfiledRecord {
    /// The underlying record
    pub record: Record,
    /// Branch bits derived from the record, in predicate-set order
    pub branches: BranchVector,
}

/// Branch profiler over a fixed predicate set
#[derive(Debug, Clone, Default)]
pub struct Profiler {
    predicates: PredicateSet,
}

impl Profiler {
    /// Create a profiler for the given predicate set
    #[must_use]
    pub fn new(predicates: PredicateSet) -> Self {
        Self { predicates }
    }

    /// The predicate set this profiler evaluates
    #[must_use]
    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// Profile a single record
    #[must_use]
    pub fn profile_record(&self, record: &Record) -> ProfiledRecord {
        let bits = self.predicates.iter().map(|p| p.holds(record)).collect();
        ProfiledRecord {
            record: record.clone(),
            branches: BranchVector { bits },
        }
    }

    /// Profile a record collection, preserving order
    #[must_use]
    pub fn profile(&self, records: &[Record]) -> Vec<ProfiledRecord> {
        records.iter().map(|r| self.profile_record(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn record(id: u64, group_id: u32, amount: f64, month: u32) -> Record {
        Record::new(id, group_id, amount, -10.0, date(2023, month, 15))
    }

    #[test]
    fn test_month_predicate() {
        let pred = PredicateKind::MonthEquals(11);
        assert!(pred.holds(&record(1, 101, 200.0, 11)));
        assert!(!pred.holds(&record(2, 101, 200.0, 12)));
    }

    #[test]
    fn test_amount_predicate_strictly_above() {
        let pred = PredicateKind::AmountAbove(250.0);
        assert!(pred.holds(&record(1, 101, 500.0, 11)));
        assert!(!pred.holds(&record(2, 101, 250.0, 11)));
        assert!(!pred.holds(&record(3, 101, 100.0, 11)));
    }

    #[test]
    fn test_group_predicate() {
        let pred = PredicateKind::GroupEquals(101);
        assert!(pred.holds(&record(1, 101, 200.0, 11)));
        assert!(!pred.holds(&record(2, 104, 200.0, 11)));
    }

    #[test]
    fn test_sales_set_order() {
        let set = PredicateSet::sales();
        assert_eq!(set.len(), 3);
        assert_eq!(set.names(), vec!["november", "high-value", "group-101"]);
    }

    #[test]
    fn test_amount_branch_index() {
        let set = PredicateSet::sales();
        assert_eq!(set.amount_branch(), Some(1));
    }

    #[test]
    fn test_amount_branch_absent() {
        let set = PredicateSet::new(vec![BranchPredicate::new(
            "november",
            PredicateKind::MonthEquals(11),
        )]);
        assert_eq!(set.amount_branch(), None);
    }

    #[test]
    fn test_profile_record_bits() {
        let profiler = Profiler::new(PredicateSet::sales());
        // November, low-value, group 101
        let profiled = profiler.profile_record(&record(1, 101, 200.0, 11));
        assert_eq!(profiled.branches.pattern(), "101");
        // December, high-value, other group
        let profiled = profiler.profile_record(&record(2, 104, 500.0, 12));
        assert_eq!(profiled.branches.pattern(), "010");
    }

    #[test]
    fn test_profile_preserves_order_and_length() {
        let profiler = Profiler::new(PredicateSet::sales());
        let records = vec![
            record(1, 101, 200.0, 11),
            record(2, 102, 500.0, 11),
            record(3, 103, 100.0, 12),
        ];
        let profiled = profiler.profile(&records);
        assert_eq!(profiled.len(), 3);
        let ids: Vec<u64> = profiled.iter().map(|p| p.record.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_profile_empty_predicate_set() {
        let profiler = Profiler::new(PredicateSet::default());
        let profiled = profiler.profile_record(&record(1, 101, 200.0, 11));
        assert!(profiled.branches.is_empty());
        assert_eq!(profiled.branches.pattern(), "");
    }

    #[test]
    fn test_branch_vector_bit_out_of_range() {
        let profiler = Profiler::new(PredicateSet::sales());
        let profiled = profiler.profile_record(&record(1, 101, 200.0, 11));
        assert!(!profiled.branches.bit(99));
    }

    #[test]
    fn test_branch_vector_hash_distinct() {
        use std::collections::HashSet;

        let profiler = Profiler::new(PredicateSet::sales());
        let records = vec![
            record(1, 101, 200.0, 11),
            record(2, 101, 200.0, 11), // same pattern as id 1
            record(3, 104, 500.0, 12),
        ];
        let vectors: HashSet<BranchVector> = profiler
            .profile(&records)
            .into_iter()
            .map(|p| p.branches)
            .collect();
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn test_predicate_accessors() {
        let pred = BranchPredicate::new("high-value", PredicateKind::AmountAbove(250.0));
        assert_eq!(pred.name(), "high-value");
        assert!(matches!(pred.kind(), PredicateKind::AmountAbove(_)));
    }
}
