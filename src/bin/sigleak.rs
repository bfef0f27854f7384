//! Recover a signature from a built-in leaky verifier.
//!
//! # Usage
//!
//! ```bash
//! # Random 20-byte secret, default settings
//! cargo run --release --bin sigleak
//!
//! # Fixed secret and seed, fewer rounds, candidate lines on stderr
//! cargo run --release --bin sigleak -- \
//!   --secret 05fd007f0102030405060708090a0b0c0d0e0f10 \
//!   --seed 7 --rounds 21 -v
//!
//! # Machine-readable report
//! cargo run --release --bin sigleak -- --json > report.json
//! ```
//!
//! Exit code 0 when the oracle accepts the recovered signature, 1 when it
//! rejects it, 2 on invalid arguments or a failed run.

use std::process::ExitCode;

use clap::Parser;
use rand::Rng;
use sigleak::constants::{DEFAULT_PREAMBLE, DEFAULT_SIGNATURE_LENGTH};
use sigleak::helpers::LeakyVerifier;
use sigleak::output::{format_report, to_json_pretty};
use sigleak::{
    Config, NullReporter, ProgressReporter, RecoveryEngine, SignatureLayout, TerminalReporter,
};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const EXIT_ACCEPTED: u8 = 0;
const EXIT_REJECTED: u8 = 1;
const EXIT_ERROR: u8 = 2;

/// Byte-wise timing recovery of a secret signature
#[derive(Parser, Debug)]
#[command(name = "sigleak")]
#[command(about = "Recover a secret signature from a verifier that leaks matched prefixes through timing")]
#[command(version)]
struct Args {
    /// Secret the built-in verifier accepts, as hex (default: random 20 bytes)
    #[arg(long)]
    secret: Option<String>,

    /// Message the signature is verified over
    #[arg(long, default_value = "Hello world")]
    message: String,

    /// Measurement rounds per position
    #[arg(long, default_value_t = 50)]
    rounds: usize,

    /// Warm-up calls before the first position
    #[arg(long, default_value_t = 250_000)]
    warmup: usize,

    /// Warm-up calls before every position
    #[arg(long, default_value_t = 50)]
    position_warmup: usize,

    /// Busy-wait per matched byte inside the verifier, in nanoseconds
    #[arg(long, default_value_t = 200)]
    per_byte_ns: u64,

    /// Seed for warm-up bytes and candidate shuffling (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// Try candidates in ascending order instead of shuffling each round
    #[arg(long)]
    no_shuffle: bool,

    /// Maximum measurements of a single position
    #[arg(long, default_value_t = 8)]
    max_attempts: usize,

    /// Last-byte re-measurements after a rejected final check
    #[arg(long, default_value_t = 1)]
    final_retries: usize,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Print every candidate median
    #[arg(short, long)]
    verbose: bool,

    /// Only print the final report
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            error!("{}", message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: &Args) -> Result<u8, String> {
    let layout = SignatureLayout::new(DEFAULT_PREAMBLE.to_vec(), DEFAULT_SIGNATURE_LENGTH);
    let secret = match &args.secret {
        Some(text) => parse_secret(text, layout.signature_length)?,
        None => {
            let mut bytes = vec![0u8; layout.signature_length];
            rand::rng().fill(bytes.as_mut_slice());
            bytes
        }
    };
    info!(secret = %hex::encode(&secret), "verifier secret");

    if args.rounds == 0 {
        return Err("--rounds must be at least 1".to_string());
    }
    if args.max_attempts == 0 {
        return Err("--max-attempts must be at least 1".to_string());
    }

    let mut config = Config::default()
        .layout(layout.clone())
        .rounds(args.rounds)
        .initial_warmup(args.warmup)
        .position_warmup(args.position_warmup)
        .shuffle_candidates(!args.no_shuffle)
        .max_attempts_per_position(args.max_attempts)
        .final_retries(args.final_retries);
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }

    let message = args.message.as_bytes();
    let verifier = LeakyVerifier::new(message, &layout, &secret, args.per_byte_ns);
    let mut engine = RecoveryEngine::new(verifier, config);

    let mut terminal = TerminalReporter::new(args.verbose);
    let mut silent = NullReporter;
    let reporter: &mut dyn ProgressReporter = if args.quiet || args.json {
        &mut silent
    } else {
        &mut terminal
    };

    let report = engine
        .run_with_reporter(message, reporter)
        .map_err(|e| e.to_string())?;

    if args.json {
        let json = to_json_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report));
    }

    if report.signature != secret {
        info!(
            expected = %hex::encode(&secret),
            recovered = %report.signature_hex(),
            "recovered bytes differ from the secret"
        );
    }

    Ok(if report.is_accepted() {
        EXIT_ACCEPTED
    } else {
        EXIT_REJECTED
    })
}

fn parse_secret(text: &str, expected_len: usize) -> Result<Vec<u8>, String> {
    let bytes = hex::decode(text.trim()).map_err(|e| format!("--secret is not valid hex: {}", e))?;
    if bytes.len() != expected_len {
        return Err(format!(
            "--secret must be {} bytes, got {}",
            expected_len,
            bytes.len()
        ));
    }
    Ok(bytes)
}
