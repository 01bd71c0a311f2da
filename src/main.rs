use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use stablematch::{
    GeneratorConfig, Instance, InstanceGenerator, InstanceLoader, InstanceWriter, Pairing,
    PairingLoader, PairingWriter, ScalingBenchmark, ScalingConfig, StabilityVerifier,
    StableMatcher,
};

#[derive(Parser, Debug)]
#[command(name = "stablematch")]
#[command(author, version, about = "Hospital/student stable matching", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the hospital-optimal stable matching for an instance
    Match {
        /// Instance file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Pairing file to write (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verify the computed pairing before writing it
        #[arg(long)]
        verify: bool,

        /// Print the pairing as a JSON object keyed by hospital
        #[arg(long, conflicts_with = "output")]
        json: bool,
    },

    /// Check a pairing for validity and stability
    Verify {
        /// Instance file
        #[arg(short, long)]
        input: PathBuf,

        /// Pairing file in "<hospital> <student>" format
        #[arg(short, long)]
        pairing: PathBuf,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a random instance
    Generate {
        /// Number of hospitals (and students)
        #[arg(short = 'n', long)]
        size: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Instance file to write (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Time the matcher and verifier over increasing sizes
    Scale {
        /// Comma-separated sizes (defaults to 1, 2, 4, ..., 512)
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,

        /// Base seed for the generated instances
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Match {
            input,
            output,
            verify,
            json,
        } => run_match(input.as_deref(), output.as_deref(), verify, json),
        Command::Verify {
            input,
            pairing,
            json,
        } => run_verify(&input, &pairing, json),
        Command::Generate { size, seed, output } => run_generate(size, seed, output.as_deref()),
        Command::Scale { sizes, seed, json } => run_scale(sizes, seed, json),
    }
}

fn run_match(
    input: Option<&Path>,
    output: Option<&Path>,
    verify: bool,
    json: bool,
) -> Result<ExitCode> {
    let instance = load_instance(input)?;
    info!("Matching instance of size {}", instance.size());

    let outcome = StableMatcher::run(&instance);
    info!(
        "Matched {} pairs (proposals {}, rejections {}, displacements {})",
        outcome.pairing.len(),
        outcome.stats.proposals,
        outcome.stats.rejections,
        outcome.stats.displacements
    );

    let mut status = ExitCode::SUCCESS;
    if verify {
        let verdict = StabilityVerifier::verify(&instance, &outcome.pairing);
        info!("Verification: {}", verdict);
        if !verdict.is_valid() {
            warn!("Matcher output did not verify");
            status = ExitCode::FAILURE;
        }
    }

    if json {
        write_stdout(&PairingWriter::to_json_string(&outcome.pairing)?)?;
    } else {
        write_pairing(&outcome.pairing, output)?;
    }
    Ok(status)
}

fn run_verify(input: &Path, pairing_path: &Path, json: bool) -> Result<ExitCode> {
    let instance = InstanceLoader::from_path(input)?;
    let pairing = PairingLoader::from_path(pairing_path)?;

    let verdict = StabilityVerifier::verify(&instance, &pairing);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&verdict).context("serialize verdict")?
        );
    } else {
        println!("{verdict}");
    }

    Ok(if verdict.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_generate(size: usize, seed: Option<u64>, output: Option<&Path>) -> Result<ExitCode> {
    let instance = InstanceGenerator::generate(GeneratorConfig { n: size, seed })?;
    match output {
        Some(path) => {
            InstanceWriter::write_to_path(&instance, path)?;
            info!("Wrote instance of size {} to {:?}", size, path);
        }
        None => write_stdout(&InstanceWriter::to_text(&instance))?,
    }
    Ok(ExitCode::SUCCESS)
}

fn run_scale(sizes: Vec<usize>, seed: Option<u64>, json: bool) -> Result<ExitCode> {
    let mut config = ScalingConfig::default();
    if !sizes.is_empty() {
        config.sizes = sizes;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    info!("Measuring {} problem sizes", config.sizes.len());
    let report = ScalingBenchmark::run(&config)?;
    if json {
        write_stdout(&report.to_json_string()?)?;
    } else {
        write_stdout(&report.to_table())?;
    }
    Ok(ExitCode::SUCCESS)
}

fn load_instance(input: Option<&Path>) -> Result<Instance> {
    match input {
        Some(path) => InstanceLoader::from_path(path),
        None => InstanceLoader::from_reader(io::stdin().lock()).context("read instance from stdin"),
    }
}

fn write_pairing(pairing: &Pairing, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            PairingWriter::write_to_path(pairing, path)?;
            info!("Wrote {} pairs to {:?}", pairing.len(), path);
            Ok(())
        }
        None => write_stdout(&PairingWriter::to_text(pairing)),
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("write to stdout")?;
    if !text.ends_with('\n') {
        writeln!(stdout).context("write to stdout")?;
    }
    Ok(())
}
