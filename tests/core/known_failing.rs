//! Oracles that reject, fail, or stop leaking.
//!
//! The engine MUST terminate with the right verdict or error, never loop.

use std::convert::Infallible;
use std::io;

use sigleak::helpers::{SimulatedOracle, VirtualClock};
use sigleak::{
    Config, RecoveryEngine, RecoveryError, SignatureLayout, TryFnOracle, Verdict, VerifyOracle,
};

const MESSAGE: &[u8] = b"Hello world";

const SECRET: [u8; 8] = [0x3C, 0xC3, 0x5A, 0xA5, 0x0F, 0xF0, 0x69, 0x96];

fn layout() -> SignatureLayout {
    SignatureLayout::new(vec![0xAA, 0xBB], SECRET.len())
}

fn fast_config() -> Config {
    Config::new()
        .layout(layout())
        .rounds(5)
        .initial_warmup(32)
        .position_warmup(4)
        .seed(1234)
}

// =============================================================================
// REJECTING ORACLE
// =============================================================================

/// Leaks like the secret would but never accepts anything.
struct NeverAccepts(SimulatedOracle);

impl VerifyOracle for NeverAccepts {
    type Error = Infallible;

    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Infallible> {
        self.0.verify(message, signature)?;
        Ok(false)
    }
}

fn rejecting_engine(config: Config) -> RecoveryEngine<NeverAccepts, VirtualClock> {
    let clock = VirtualClock::new();
    let inner = SimulatedOracle::new(clock.clone(), &layout(), &SECRET).noise_ns(10);
    RecoveryEngine::with_clock(NeverAccepts(inner), clock, config)
}

#[test]
fn rejection_retries_last_byte_then_reports_rejected() {
    let report = rejecting_engine(fast_config()).run(MESSAGE).unwrap();

    assert_eq!(report.verdict, Verdict::Rejected);
    assert!(!report.is_accepted());
    assert_eq!(report.final_retries_used, 1);
    assert_eq!(report.passes, SECRET.len() + 1);
    // Best guess is still the leaked secret
    assert_eq!(report.signature, SECRET);

    let last = report.history.last().unwrap();
    assert_eq!((last.position, last.attempt), (SECRET.len() - 1, 2));
}

#[test]
fn zero_final_retries_rejects_immediately() {
    let report = rejecting_engine(fast_config().final_retries(0))
        .run(MESSAGE)
        .unwrap();

    assert_eq!(report.verdict, Verdict::Rejected);
    assert_eq!(report.final_retries_used, 0);
    assert_eq!(report.passes, SECRET.len());
}

#[test]
fn each_final_retry_costs_one_check() {
    let mut engine = rejecting_engine(fast_config().final_retries(3));
    let report = engine.run(MESSAGE).unwrap();

    assert_eq!(report.final_retries_used, 3);
    let per_pass = 4 + 5 * 256;
    let checks = 1 + 3;
    assert_eq!(
        report.oracle_calls,
        32 + report.passes as u64 * per_pass + checks
    );
    assert_eq!(engine.oracle().0.calls(), report.oracle_calls);
}

// =============================================================================
// FAILING ORACLE
// =============================================================================

#[test]
fn oracle_error_aborts_the_run() {
    let mut calls = 0usize;
    let oracle = TryFnOracle::new(move |_: &[u8], _: &[u8]| {
        calls += 1;
        if calls > 100 {
            Err(io::Error::other("keystore offline"))
        } else {
            Ok(false)
        }
    });

    let err = RecoveryEngine::new(oracle, fast_config())
        .run(MESSAGE)
        .unwrap_err();

    assert!(matches!(err, RecoveryError::Oracle(_)));
    assert!(err.to_string().contains("keystore offline"));
}

#[test]
fn oracle_error_during_warmup_aborts() {
    let oracle = TryFnOracle::new(|_: &[u8], _: &[u8]| {
        Err::<bool, _>(io::Error::new(io::ErrorKind::NotFound, "no key"))
    });

    let err = RecoveryEngine::new(oracle, fast_config())
        .run(MESSAGE)
        .unwrap_err();
    assert!(matches!(err, RecoveryError::Oracle(_)));
}

// =============================================================================
// STALLING LEAK (ATTEMPT BUDGET)
// =============================================================================

/// Leaks only the first `cap` matched bytes; averages stop climbing after that.
struct StallingOracle {
    inner: SimulatedOracle,
    clock: VirtualClock,
    cap: usize,
    per_byte_ns: u64,
}

impl VerifyOracle for StallingOracle {
    type Error = Infallible;

    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Infallible> {
        let matched = self.inner.matched_prefix(signature).min(self.cap);
        let accepted = self.inner.verify(message, signature)?;
        self.clock.advance(self.per_byte_ns * matched as u64);
        Ok(accepted)
    }
}

#[test]
fn attempt_budget_bounds_a_run_that_keeps_rolling_back() {
    let clock = VirtualClock::new();
    let inner = SimulatedOracle::new(clock.clone(), &layout(), &SECRET)
        .per_byte_ns(0)
        .noise_ns(20)
        .seed(77);
    let oracle = StallingOracle {
        inner,
        clock: clock.clone(),
        cap: 4,
        per_byte_ns: 100,
    };
    let config = fast_config().max_attempts_per_position(3);
    let max_passes = config.max_passes();

    let report = RecoveryEngine::with_clock(oracle, clock, config)
        .run(MESSAGE)
        .unwrap();

    assert!(report.passes <= max_passes);
    assert!(report.rollbacks >= 1);
    assert!(report.suppressed_rollbacks >= 1);
    assert_eq!(report.verdict, Verdict::Rejected);

    // The leaked prefix is still right
    assert_eq!(report.signature[..4], SECRET[..4]);

    let last = SECRET.len() - 1;
    for record in &report.history {
        let limit = if record.position == last { 3 + 1 } else { 3 };
        assert!(
            record.attempt <= limit,
            "position {} measured {} times",
            record.position,
            record.attempt
        );
    }
}

#[test]
fn single_attempt_budget_never_rolls_back() {
    let clock = VirtualClock::new();
    let inner = SimulatedOracle::new(clock.clone(), &layout(), &SECRET)
        .per_byte_ns(0)
        .noise_ns(20);
    let oracle = StallingOracle {
        inner,
        clock: clock.clone(),
        cap: 2,
        per_byte_ns: 100,
    };

    let report = RecoveryEngine::with_clock(oracle, clock, fast_config().max_attempts_per_position(1))
        .run(MESSAGE)
        .unwrap();

    assert_eq!(report.rollbacks, 0);
    assert!(report.suppressed_rollbacks >= 1);
    assert_eq!(report.passes, SECRET.len() + report.final_retries_used);
}
