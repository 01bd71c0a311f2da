use std::fmt::Write as _;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::info;
use serde::Serialize;

use crate::matching::StableMatcher;
use crate::sampling::{GeneratorConfig, InstanceGenerator};
use crate::verify::StabilityVerifier;

#[derive(Debug, Clone)]
pub struct ScalingConfig {
    pub sizes: Vec<usize>,
    pub seed: Option<u64>,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            sizes: (0..10).map(|exp| 1usize << exp).collect(),
            seed: Some(42),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScalingSample {
    pub n: usize,
    pub match_duration: Duration,
    pub verify_duration: Duration,
    pub proposals: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScalingReport {
    pub samples: Vec<ScalingSample>,
}

impl ScalingReport {
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>8} {:>14} {:>14} {:>12}",
            "n", "match (us)", "verify (us)", "proposals"
        );
        for sample in &self.samples {
            let _ = writeln!(
                out,
                "{:>8} {:>14.1} {:>14.1} {:>12}",
                sample.n,
                micros(sample.match_duration),
                micros(sample.verify_duration),
                sample.proposals
            );
        }
        out
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Times the matcher and verifier over increasing problem sizes.
pub struct ScalingBenchmark;

impl ScalingBenchmark {
    pub fn run(config: &ScalingConfig) -> Result<ScalingReport> {
        if config.sizes.is_empty() {
            bail!("No problem sizes requested");
        }

        let mut report = ScalingReport::default();
        for (idx, &n) in config.sizes.iter().enumerate() {
            let seed = config.seed.map(|seed| seed.wrapping_add(idx as u64));
            let instance = InstanceGenerator::generate(GeneratorConfig { n, seed })
                .with_context(|| format!("generate instance of size {n}"))?;

            let match_start = Instant::now();
            let outcome = StableMatcher::run(&instance);
            let match_duration = match_start.elapsed();

            let verify_start = Instant::now();
            let verdict = StabilityVerifier::verify(&instance, &outcome.pairing);
            let verify_duration = verify_start.elapsed();

            if !verdict.is_valid() {
                bail!("Matcher output for n = {n} failed verification: {verdict}");
            }

            info!(
                "n {}: match {:?}, verify {:?}, proposals {}",
                n, match_duration, verify_duration, outcome.stats.proposals
            );
            report.samples.push(ScalingSample {
                n,
                match_duration,
                verify_duration,
                proposals: outcome.stats.proposals,
            });
        }
        Ok(report)
    }
}

fn micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}
