use rayon::prelude::*;
use serde::Serialize;

use crate::instance::Instance;
use crate::matching::engine::{MatchOutcome, StableMatcher};
use crate::verify::{StabilityVerifier, Verdict};

/// Aggregate over a batch of independently matched and verified instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub instances: usize,
    pub valid: usize,
    pub proposals: usize,
    pub max_proposals: usize,
    /// Index of the first instance whose pairing did not verify, with the verdict.
    pub first_failure: Option<(usize, Verdict)>,
}

impl BatchSummary {
    fn consume(&mut self, index: usize, outcome: &MatchOutcome, verdict: Verdict) {
        self.instances += 1;
        self.proposals += outcome.stats.proposals;
        self.max_proposals = self.max_proposals.max(outcome.stats.proposals);
        if verdict.is_valid() {
            self.valid += 1;
        } else if self
            .first_failure
            .map_or(true, |(current, _)| index < current)
        {
            self.first_failure = Some((index, verdict));
        }
    }

    fn combine(mut self, other: Self) -> Self {
        self.instances += other.instances;
        self.valid += other.valid;
        self.proposals += other.proposals;
        self.max_proposals = self.max_proposals.max(other.max_proposals);
        self.first_failure = match (self.first_failure, other.first_failure) {
            (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
            (a, b) => a.or(b),
        };
        self
    }

    pub fn all_valid(&self) -> bool {
        self.valid == self.instances
    }
}

/// Runs the matcher over many independent instances on the rayon pool.
pub struct BatchMatcher;

impl BatchMatcher {
    pub fn run_all(instances: &[Instance]) -> Vec<MatchOutcome> {
        instances.par_iter().map(StableMatcher::run).collect()
    }

    pub fn run_and_verify(instances: &[Instance]) -> BatchSummary {
        instances
            .par_iter()
            .enumerate()
            .map(|(index, instance)| {
                let outcome = StableMatcher::run(instance);
                let verdict = StabilityVerifier::verify(instance, &outcome.pairing);
                (index, outcome, verdict)
            })
            .fold(BatchSummary::default, |mut acc, (index, outcome, verdict)| {
                acc.consume(index, &outcome, verdict);
                acc
            })
            .reduce(BatchSummary::default, BatchSummary::combine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{GeneratorConfig, InstanceGenerator};

    #[test]
    fn batch_matches_sequential_runs() {
        let instances = InstanceGenerator::generate_batch(
            GeneratorConfig {
                n: 12,
                seed: Some(7),
            },
            16,
        )
        .expect("generate batch");

        let parallel = BatchMatcher::run_all(&instances);
        assert_eq!(parallel.len(), instances.len());
        for (instance, outcome) in instances.iter().zip(&parallel) {
            assert_eq!(StableMatcher::run(instance).pairing, outcome.pairing);
        }
    }

    #[test]
    fn summary_counts_every_instance() {
        let instances = InstanceGenerator::generate_batch(
            GeneratorConfig {
                n: 8,
                seed: Some(11),
            },
            20,
        )
        .expect("generate batch");

        let summary = BatchMatcher::run_and_verify(&instances);
        assert_eq!(summary.instances, 20);
        assert!(summary.all_valid(), "first failure {:?}", summary.first_failure);
        assert!(summary.max_proposals <= 64);
        assert!(summary.proposals >= 20 * 8);
    }
}
