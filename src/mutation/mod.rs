//! Mutation strategies
//!
//! Three interchangeable strategies produce a mutated record collection
//! from a profiled seed collection:
//!
//! | Strategy | Status | Description |
//! |----------|--------|-------------|
//! | Guided   | core   | Donor-based splice/repair, coverage-steered |
//! | Random   | baseline | Wide uniform replacement, unguided |
//! | Boundary | baseline | Extreme schema-valid values by coin flip |
//!
//! All strategies are pure functions of the input collection and a seeded
//! random source. Each `mutate` call owns its own [`rand::rngs::StdRng`]
//! stream, so strategies stay bit-for-bit reproducible even when the
//! harness runs them in parallel.

mod baseline;
mod guided;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::InMemoryEngine;
use crate::profiler::{PredicateSet, ProfiledRecord};
use crate::record::{DomainBounds, Record};
use crate::{Error, Result};

/// The registered mutation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Donor-based guided mutation (the coverage-steered core algorithm)
    Guided,
    /// Uniform-noise replacement over wide, partly out-of-domain ranges
    Random,
    /// Extreme-but-schema-valid replacement by coin flip
    Boundary,
}

impl StrategyKind {
    /// All strategies, in comparison order
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::Guided, Self::Random, Self::Boundary]
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guided => write!(f, "guided"),
            Self::Random => write!(f, "random"),
            Self::Boundary => write!(f, "boundary"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "guided" => Ok(Self::Guided),
            "random" => Ok(Self::Random),
            "boundary" => Ok(Self::Boundary),
            other => Err(Error::Configuration(format!(
                "unknown strategy `{other}` (expected guided, random, or boundary)"
            ))),
        }
    }
}

/// Configuration shared by the mutation strategies
#[derive(Debug, Clone)]
pub struct MutationConfig {
    /// Probability of the guided strategy's donor-splice branch; the
    /// complement goes to the repair branch
    pub donor_splice_probability: f64,
    /// Record id the guided strategy passes through untouched, keeping a
    /// known fault reachable as a correctness oracle. By convention this
    /// is the seed record whose adjustment is out of range; see
    /// [`crate::dataset::seed_fault_id`].
    pub preserve_id: Option<u64>,
    /// Domain-validity ranges used for donor filtering and repair
    pub bounds: DomainBounds,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            donor_splice_probability: 0.7,
            preserve_id: None,
            bounds: DomainBounds::default(),
        }
    }
}

impl MutationConfig {
    /// Check the configuration for internal consistency
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the splice probability is
    /// outside [0, 1] or not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.donor_splice_probability.is_finite()
            || !(0.0..=1.0).contains(&self.donor_splice_probability)
        {
            return Err(Error::Configuration(format!(
                "donor splice probability must be within [0, 1], got {}",
                self.donor_splice_probability
            )));
        }
        Ok(())
    }
}

/// Strategy dispatcher
///
/// Owns a [`MutationConfig`] and applies the selected strategy to a
/// profiled collection. Every call seeds a fresh strategy-local random
/// stream, so results are reproducible under a fixed seed.
#[derive(Debug, Clone, Default)]
pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    /// Create a mutator with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mutator with a custom configuration
    #[must_use]
    pub fn with_config(config: MutationConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Apply a strategy to a profiled collection
    ///
    /// Returns a new collection with the same length and id-set as the
    /// input. Branch vectors are intentionally not carried over: callers
    /// must re-profile the output before evaluating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the configuration is invalid.
    pub fn mutate(
        &self,
        kind: StrategyKind,
        records: &[ProfiledRecord],
        predicates: &PredicateSet,
        seed: u64,
    ) -> Result<Vec<Record>> {
        self.config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mutated = match kind {
            StrategyKind::Guided => {
                guided::mutate(records, predicates, &self.config, &InMemoryEngine, &mut rng)
            }
            StrategyKind::Random => baseline::random(records, &mut rng),
            StrategyKind::Boundary => baseline::boundary(records, &mut rng),
        };
        Ok(mutated)
    }
}
