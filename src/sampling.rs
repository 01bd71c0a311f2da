use anyhow::{Result, anyhow};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::error::Side;
use crate::instance::Instance;
use crate::preferences::{Permutation, PreferenceTable};

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub n: usize,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { n: 8, seed: None }
    }
}

/// Produces instances with uniformly random, complete preference lists.
pub struct InstanceGenerator;

impl InstanceGenerator {
    pub fn generate(config: GeneratorConfig) -> Result<Instance> {
        let seed = resolve_seed(config.seed);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        debug!("Generating instance of size {} with seed {}", config.n, seed);
        Self::generate_with_rng(config.n, &mut rng)
    }

    /// Instance `i` uses seed `seed + i`.
    pub fn generate_batch(config: GeneratorConfig, count: usize) -> Result<Vec<Instance>> {
        if count == 0 {
            return Err(anyhow!("Requested batch size must be greater than zero"));
        }
        let base_seed = resolve_seed(config.seed);
        debug!(
            "Generating {} instances of size {} from base seed {}",
            count, config.n, base_seed
        );
        (0..count)
            .into_par_iter()
            .map(|idx| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(base_seed.wrapping_add(idx as u64));
                Self::generate_with_rng(config.n, &mut rng)
            })
            .collect()
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Instance> {
        if n == 0 {
            return Err(anyhow!("Requested instance size must be greater than zero"));
        }
        let hospitals = random_table(Side::Hospital, n, rng)?;
        let students = random_table(Side::Student, n, rng)?;
        Ok(Instance::new(hospitals, students)?)
    }
}

fn random_table<R: Rng + ?Sized>(side: Side, n: usize, rng: &mut R) -> Result<PreferenceTable> {
    let rows = (0..n)
        .map(|_| {
            let mut order: Vec<usize> = (1..=n).collect();
            order.shuffle(rng);
            Permutation::new(n, order)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PreferenceTable::from_permutations(side, rows)?)
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = random_seed();
        info!("No seed given, using {}", seed);
        seed
    })
}

fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_instance() {
        let config = GeneratorConfig {
            n: 10,
            seed: Some(42),
        };
        let a = InstanceGenerator::generate(config.clone()).expect("generate");
        let b = InstanceGenerator::generate(config).expect("generate");
        assert_eq!(a, b);
        assert_eq!(a.size(), 10);
    }

    #[test]
    fn different_seeds_differ() {
        let a = InstanceGenerator::generate(GeneratorConfig {
            n: 10,
            seed: Some(1),
        })
        .expect("generate");
        let b = InstanceGenerator::generate(GeneratorConfig {
            n: 10,
            seed: Some(2),
        })
        .expect("generate");
        assert_ne!(a, b);
    }

    #[test]
    fn batch_offsets_the_seed() {
        let batch = InstanceGenerator::generate_batch(
            GeneratorConfig {
                n: 5,
                seed: Some(100),
            },
            3,
        )
        .expect("generate batch");
        assert_eq!(batch.len(), 3);
        let third = InstanceGenerator::generate(GeneratorConfig {
            n: 5,
            seed: Some(102),
        })
        .expect("generate");
        assert_eq!(batch[2], third);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(InstanceGenerator::generate(GeneratorConfig { n: 0, seed: Some(1) }).is_err());
        assert!(InstanceGenerator::generate_batch(GeneratorConfig::default(), 0).is_err());
    }
}
