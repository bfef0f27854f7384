//! Oracles whose timing leaks the matched prefix. The secret MUST be recovered.

use std::convert::Infallible;

use sigleak::constants::{DEFAULT_PREAMBLE, SENTINEL_BYTE};
use sigleak::helpers::{SimulatedOracle, VirtualClock};
use sigleak::{Config, RecoveryEngine, SignatureLayout, TrendVerdict, Verdict, VerifyOracle};

const MESSAGE: &[u8] = b"Hello world";

const SECRET: [u8; 20] = [
    5, 253, 0, 127, 64, 31, 200, 17, 99, 142, 8, 250, 66, 180, 3, 77, 210, 45, 121, 160,
];

fn fast_config() -> Config {
    Config::new()
        .rounds(9)
        .initial_warmup(64)
        .position_warmup(8)
        .seed(7)
}

fn leaky_engine(secret: &[u8], noise_seed: u64) -> RecoveryEngine<SimulatedOracle, VirtualClock> {
    let clock = VirtualClock::new();
    let layout = SignatureLayout::default();
    let oracle = SimulatedOracle::new(clock.clone(), &layout, secret)
        .noise_ns(20)
        .seed(noise_seed);
    RecoveryEngine::with_clock(oracle, clock, fast_config())
}

// =============================================================================
// MONOTONIC LEAK
// =============================================================================

#[test]
fn recovers_secret_without_rollbacks() {
    let mut engine = leaky_engine(&SECRET, 11);
    let report = engine.run(MESSAGE).unwrap();

    assert_eq!(report.verdict, Verdict::Accepted);
    assert_eq!(report.signature, SECRET);
    assert_eq!(&report.full_signature[..5], &DEFAULT_PREAMBLE);
    assert_eq!(&report.full_signature[5..], &SECRET);
    assert_eq!(report.rollbacks, 0);
    assert_eq!(report.passes, 20);
    assert!(report.passes <= 20 + 2 * report.rollbacks);
}

#[test]
fn trend_is_checked_from_position_three() {
    let report = leaky_engine(&SECRET, 11).run(MESSAGE).unwrap();

    for record in &report.history[..3] {
        assert_eq!(record.trend, TrendVerdict::Skipped);
    }
    for record in &report.history[3..] {
        assert!(
            matches!(record.trend, TrendVerdict::Ok { .. }),
            "position {} trend {:?}",
            record.position,
            record.trend
        );
    }
}

#[test]
fn oracle_call_count_is_accounted() {
    let mut engine = leaky_engine(&SECRET, 3);
    let report = engine.run(MESSAGE).unwrap();

    let per_pass = 8 + 9 * 256;
    let expected = 64 + report.passes as u64 * per_pass + 1;
    assert_eq!(report.oracle_calls, expected);
    assert_eq!(engine.oracle().calls(), expected);
}

#[test]
fn same_seed_reproduces_the_run() {
    let a = leaky_engine(&SECRET, 21).run(MESSAGE).unwrap();
    let b = leaky_engine(&SECRET, 21).run(MESSAGE).unwrap();

    assert_eq!(a.seed, 7);
    assert_eq!(a.history, b.history);
    assert_eq!(a.signature, b.signature);
}

#[test]
fn ascending_order_also_recovers() {
    let clock = VirtualClock::new();
    let layout = SignatureLayout::default();
    let oracle = SimulatedOracle::new(clock.clone(), &layout, &SECRET);
    let config = fast_config().shuffle_candidates(false);

    let report = RecoveryEngine::with_clock(oracle, clock, config)
        .run(MESSAGE)
        .unwrap();
    assert!(report.is_accepted());
    assert_eq!(report.signature, SECRET);
}

#[test]
fn all_sentinel_secret_is_recovered() {
    let report = leaky_engine(&[SENTINEL_BYTE; 20], 5).run(MESSAGE).unwrap();
    assert!(report.is_accepted());
    assert_eq!(report.signature, vec![SENTINEL_BYTE; 20]);
}

// =============================================================================
// DECOY
// =============================================================================

const DECOY_SECRET: [u8; 20] = [
    17, 42, 99, 180, 7, 230, 61, 145, 88, 201, 34, 156, 73, 119, 250, 12, 191, 66, 140, 23,
];

/// Makes one wrong byte look slowest at `position` for the first `boosts` calls
/// that carry it behind a correct prefix.
struct DecoyOracle {
    inner: SimulatedOracle,
    clock: VirtualClock,
    position: usize,
    decoy: u8,
    boosts_left: usize,
    boost_ns: u64,
}

impl VerifyOracle for DecoyOracle {
    type Error = Infallible;

    fn verify(&mut self, message: &[u8], signature: &[u8]) -> Result<bool, Infallible> {
        let accepted = self.inner.verify(message, signature)?;

        let body = &signature[DEFAULT_PREAMBLE.len()..];
        let p = self.position;
        if self.boosts_left > 0
            && body[..p] == DECOY_SECRET[..p]
            && body[p] == self.decoy
            && body[p + 1..].iter().all(|&b| b == SENTINEL_BYTE)
        {
            self.boosts_left -= 1;
            self.clock.advance(self.boost_ns);
        }
        Ok(accepted)
    }
}

#[test]
fn decoy_triggers_exactly_one_rollback() {
    let clock = VirtualClock::new();
    let layout = SignatureLayout::default();
    let inner = SimulatedOracle::new(clock.clone(), &layout, &DECOY_SECRET)
        .noise_ns(20)
        .seed(13);
    let oracle = DecoyOracle {
        inner,
        clock: clock.clone(),
        position: 6,
        decoy: 200,
        // One boosted call per round: only the first pass at position 6
        boosts_left: 9,
        boost_ns: 300,
    };

    let mut engine = RecoveryEngine::with_clock(oracle, clock, fast_config());
    let report = engine.run(MESSAGE).unwrap();

    assert!(report.is_accepted());
    assert_eq!(report.signature, DECOY_SECRET);
    assert_eq!(report.rollbacks, 1);
    assert_eq!(report.suppressed_rollbacks, 0);
    assert_eq!(report.passes, 20 + 2);
    assert_eq!(engine.oracle().boosts_left, 0);

    let decoy_pass = &report.history[6];
    assert_eq!((decoy_pass.position, decoy_pass.selected), (6, 200));

    let broken = &report.history[7];
    assert_eq!(broken.position, 7);
    assert!(broken.trend.is_suspect());
    assert!(broken.rolled_back);

    let retry = &report.history[8];
    assert_eq!((retry.position, retry.attempt, retry.selected), (6, 2, 61));
    assert_eq!(report.history[9].position, 7);
    assert_eq!(report.history[9].attempt, 2);
}
