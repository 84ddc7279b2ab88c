//! Strategy comparison harness
//!
//! Runs every registered strategy against the same profiled seed
//! collection, re-profiles each result, evaluates it, and collects a
//! name-to-metrics mapping. Strategies are independent of each other and
//! of the seed collection, so the fan-out runs on rayon with no shared
//! state beyond the collected results. Each strategy draws from its own
//! seeded random stream; a failing strategy propagates its error instead
//! of being dropped from the comparison.

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::evaluator::{Evaluator, Metrics};
use crate::mutation::{MutationConfig, Mutator, StrategyKind};
use crate::profiler::{PredicateSet, Profiler};
use crate::record::Record;
use crate::{Error, Result};

/// Aggregated metrics over repeated comparison trials
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrialSummary {
    /// Number of trials aggregated
    pub trials: usize,
    /// Mean distinct-branch-vector coverage
    pub mean_coverage: f64,
    /// Mean fault count
    pub mean_faults: f64,
    /// Mean naturalness percentage
    pub mean_naturalness: f64,
}

/// Compares mutation strategies over a shared seed collection
#[derive(Debug, Clone)]
pub struct ComparisonHarness {
    strategies: Vec<StrategyKind>,
    predicates: PredicateSet,
    config: MutationConfig,
    base_seed: u64,
    show_progress: bool,
}

impl ComparisonHarness {
    /// Create a harness with all strategies, the sales predicate set, and
    /// the default mutation configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: StrategyKind::all(),
            predicates: PredicateSet::sales(),
            config: MutationConfig::default(),
            base_seed: 42,
            show_progress: false,
        }
    }

    /// Set the strategies to compare
    #[must_use]
    pub fn strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Set the branch predicate set
    #[must_use]
    pub fn predicates(mut self, predicates: PredicateSet) -> Self {
        self.predicates = predicates;
        self
    }

    /// Set the mutation configuration
    #[must_use]
    pub fn config(mut self, config: MutationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base random seed
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Enable or disable the trial progress bar
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run every strategy once and collect per-strategy metrics
    ///
    /// Each strategy consumes an independent seeded stream derived from
    /// the base seed, so the comparison is reproducible and order does
    /// not affect results.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no strategies are registered
    /// or the mutation configuration is invalid, and propagates any
    /// strategy's evaluation failure.
    pub fn compare(&self, seed_records: &[Record]) -> Result<BTreeMap<String, Metrics>> {
        self.compare_seeded(seed_records, self.base_seed)
    }

    fn compare_seeded(
        &self,
        seed_records: &[Record],
        base_seed: u64,
    ) -> Result<BTreeMap<String, Metrics>> {
        if self.strategies.is_empty() {
            return Err(Error::Configuration(
                "no strategies registered for comparison".to_string(),
            ));
        }
        self.config.validate()?;

        let profiler = Profiler::new(self.predicates.clone());
        let evaluator = Evaluator::with_bounds(self.config.bounds.clone());
        let mutator = Mutator::with_config(self.config.clone());
        let profiled = profiler.profile(seed_records);

        let results: Vec<(String, Metrics)> = self
            .strategies
            .par_iter()
            .enumerate()
            .map(|(index, kind)| {
                let stream_seed = base_seed.wrapping_add(index as u64);
                let mutated = mutator.mutate(*kind, &profiled, &self.predicates, stream_seed)?;
                let reprofiled = profiler.profile(&mutated);
                let metrics = evaluator.evaluate(&reprofiled)?;
                Ok((kind.to_string(), metrics))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(results.into_iter().collect())
    }

    /// Repeat the comparison over derived seeds and aggregate means
    ///
    /// Trial `t` runs with base seed `base_seed + t`; trials execute in
    /// parallel, each with its own derived streams.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `trials` is zero and
    /// propagates any trial's failure.
    pub fn run_trials(
        &self,
        seed_records: &[Record],
        trials: usize,
    ) -> Result<BTreeMap<String, TrialSummary>> {
        if trials == 0 {
            return Err(Error::Configuration(
                "trial count must be at least 1".to_string(),
            ));
        }

        let progress = if self.show_progress {
            let pb = ProgressBar::new(trials as u64);
            // Template is hardcoded and known to be valid
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        let per_trial: Vec<BTreeMap<String, Metrics>> = (0..trials)
            .into_par_iter()
            .map(|trial| {
                let result =
                    self.compare_seeded(seed_records, self.base_seed.wrapping_add(trial as u64));
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                result
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(pb) = &progress {
            pb.finish_with_message("Trials complete");
        }

        let mut sums: BTreeMap<String, (usize, f64, f64, f64)> = BTreeMap::new();
        for trial in &per_trial {
            for (name, metrics) in trial {
                let entry = sums.entry(name.clone()).or_default();
                entry.0 += 1;
                entry.1 += metrics.coverage as f64;
                entry.2 += metrics.faults as f64;
                entry.3 += metrics.naturalness;
            }
        }

        Ok(sums
            .into_iter()
            .map(|(name, (count, coverage, faults, naturalness))| {
                let n = count as f64;
                (
                    name,
                    TrialSummary {
                        trials: count,
                        mean_coverage: coverage / n,
                        mean_faults: faults / n,
                        mean_naturalness: naturalness / n,
                    },
                )
            })
            .collect())
    }
}

impl Default for ComparisonHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::record::DomainBounds;

    fn harness() -> ComparisonHarness {
        let seed = dataset::demo_seed();
        let config = MutationConfig {
            preserve_id: dataset::seed_fault_id(&seed, &DomainBounds::default()),
            ..MutationConfig::default()
        };
        ComparisonHarness::new().config(config)
    }

    #[test]
    fn test_compare_covers_all_strategies() {
        let results = harness()
            .compare(&dataset::demo_seed())
            .expect("comparison should succeed");
        assert_eq!(results.len(), 3);
        for name in ["guided", "random", "boundary"] {
            assert!(results.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn test_compare_is_reproducible() {
        let seed = dataset::demo_seed();
        let h = harness();
        let a = h.compare(&seed).expect("comparison should succeed");
        let b = h.compare(&seed).expect("comparison should succeed");
        for (name, metrics) in &a {
            let other = &b[name];
            assert_eq!(metrics.coverage, other.coverage);
            assert_eq!(metrics.faults, other.faults);
            assert!((metrics.naturalness - other.naturalness).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_compare_empty_strategy_list() {
        let result = harness()
            .strategies(Vec::new())
            .compare(&dataset::demo_seed());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_compare_propagates_empty_input() {
        // Zero seed records make every strategy's evaluation fail; the
        // harness must propagate, not drop, the failure.
        let result = harness().compare(&[]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_compare_propagates_bad_config() {
        let result = harness()
            .config(MutationConfig {
                donor_splice_probability: 7.0,
                ..MutationConfig::default()
            })
            .compare(&dataset::demo_seed());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_scenario_guided_preserves_fault_and_stays_natural() {
        // Five-record seed, fault at id 4 with adjustment +10: guided
        // mutation must keep the fault reachable and keep naturalness
        // strictly between the degenerate extremes.
        let seed = dataset::demo_seed();
        for base_seed in [0, 7, 42, 1234] {
            let results = harness()
                .seed(base_seed)
                .compare(&seed)
                .expect("comparison should succeed");
            let guided = &results["guided"];
            assert!(guided.faults >= 1, "seed {base_seed}: fault suppressed");
            assert!(
                guided
                    .faulty_records
                    .iter()
                    .any(|r| r.id == 4 && (r.adjustment - 10.0).abs() < f64::EPSILON),
                "seed {base_seed}: preserved fault missing from report"
            );
            assert!(guided.naturalness > 0.0, "seed {base_seed}");
            assert!(guided.naturalness < 100.0, "seed {base_seed}");
        }
    }

    #[test]
    fn test_coverage_bounds_hold_for_all_strategies() {
        let results = harness()
            .compare(&dataset::demo_seed())
            .expect("comparison should succeed");
        for (name, metrics) in &results {
            assert!(metrics.coverage >= 1, "{name}");
            assert!(metrics.coverage <= 8, "{name}"); // 2^3 predicates
            assert_eq!(metrics.total, 5, "{name}");
        }
    }

    #[test]
    fn test_run_trials_aggregates_means() {
        let summaries = harness()
            .run_trials(&dataset::demo_seed(), 4)
            .expect("trials should succeed");
        assert_eq!(summaries.len(), 3);
        for (name, summary) in &summaries {
            assert_eq!(summary.trials, 4, "{name}");
            assert!(summary.mean_coverage >= 1.0, "{name}");
            assert!(summary.mean_naturalness >= 0.0, "{name}");
            assert!(summary.mean_naturalness <= 100.0, "{name}");
        }
    }

    #[test]
    fn test_run_trials_zero_is_config_error() {
        let result = harness().run_trials(&dataset::demo_seed(), 0);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_run_trials_single_matches_compare() {
        let seed = dataset::demo_seed();
        let h = harness();
        let single = h.run_trials(&seed, 1).expect("trials should succeed");
        let direct = h.compare(&seed).expect("comparison should succeed");
        for (name, summary) in &single {
            let metrics = &direct[name];
            assert!((summary.mean_coverage - metrics.coverage as f64).abs() < f64::EPSILON);
            assert!((summary.mean_faults - metrics.faults as f64).abs() < f64::EPSILON);
            assert!((summary.mean_naturalness - metrics.naturalness).abs() < f64::EPSILON);
        }
    }
}
