//! Tests for configuration validation.
//!
//! Builder methods panic on values that can never work; `validate` catches
//! the same problems in configurations assembled through public fields.

use sigleak::helpers::{SimulatedOracle, VirtualClock};
use sigleak::{Config, ConfigError, RecoveryEngine, RecoveryError, SignatureLayout};

// =============================================================================
// BUILDER VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "rounds must be positive")]
fn rounds_zero_panics() {
    let _ = Config::new().rounds(0);
}

#[test]
fn rounds_one_valid() {
    let config = Config::new().rounds(1);
    assert_eq!(config.rounds, 1);
    assert!(config.validate().is_ok());
}

#[test]
#[should_panic(expected = "max_attempts_per_position must be positive")]
fn attempts_zero_panics() {
    let _ = Config::new().max_attempts_per_position(0);
}

#[test]
#[should_panic(expected = "signature_length must be positive")]
fn empty_layout_panics() {
    let _ = Config::new().layout(SignatureLayout::new(vec![1, 2], 0));
}

#[test]
fn zero_warmup_and_retries_valid() {
    let config = Config::new()
        .initial_warmup(0)
        .position_warmup(0)
        .final_retries(0);
    assert!(config.validate().is_ok());
    assert_eq!(config.max_passes(), 20 * 8);
}

#[test]
fn empty_preamble_valid() {
    let config = Config::new().layout(SignatureLayout::new(Vec::new(), 4));
    assert_eq!(config.layout.full_length(), 4);
    assert!(config.validate().is_ok());
}

// =============================================================================
// PRESETS
// =============================================================================

#[test]
fn presets_order_by_effort() {
    let quick = Config::quick();
    let balanced = Config::balanced();
    let thorough = Config::thorough();

    assert!(quick.rounds < balanced.rounds);
    assert!(balanced.rounds < thorough.rounds);
    assert!(quick.initial_warmup < thorough.initial_warmup);
    assert!(balanced.max_passes() < thorough.max_passes());
}

// =============================================================================
// RUN-TIME VALIDATION
// =============================================================================

#[test]
fn engine_rejects_invalid_config_before_calling_oracle() {
    let clock = VirtualClock::new();
    let layout = SignatureLayout::default();
    let oracle = SimulatedOracle::new(clock.clone(), &layout, &[1; 20]);

    let mut config = Config::quick();
    config.rounds = 0;

    let mut engine = RecoveryEngine::with_clock(oracle, clock, config);
    let err = engine.run(b"Hello world").unwrap_err();

    assert!(matches!(
        err,
        RecoveryError::Config(ConfigError::ZeroRounds)
    ));
    assert_eq!(engine.oracle().calls(), 0);
}

#[test]
fn config_error_messages_are_readable() {
    let err = RecoveryError::from(ConfigError::EmptySignature);
    assert_eq!(
        err.to_string(),
        "invalid configuration: signature length must be at least 1"
    );
}
