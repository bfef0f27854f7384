//! Tests for the simulated oracles.

use sigleak::helpers::{LeakyVerifier, SimulatedOracle, VirtualClock};
use sigleak::measurement::Timer;
use sigleak::{SignatureAssembler, SignatureLayout, VerifyOracle};

#[test]
fn timer_on_virtual_clock_sees_oracle_cost() {
    let clock = VirtualClock::new();
    let layout = SignatureLayout::new(vec![0x5C], 2);
    let mut oracle = SimulatedOracle::new(clock.clone(), &layout, &[7, 8])
        .base_ns(500)
        .per_byte_ns(50);
    let timer = Timer::new(clock);

    let (verdict, ns) = timer.measure_ns(|| oracle.verify(b"m", &[0x5C, 7, 0]));
    assert!(!verdict.unwrap());
    assert_eq!(ns, 550);

    let (verdict, ns) = timer.measure_ns(|| oracle.verify(b"m", &[0x5C, 7, 8]));
    assert!(verdict.unwrap());
    assert_eq!(ns, 600);
}

#[test]
fn assembler_signature_is_checked_against_secret() {
    let layout = SignatureLayout::new(vec![1, 2], 3);
    let mut verifier = LeakyVerifier::new(b"Hello world", &layout, &[9, 8, 7], 0);
    let mut signature = SignatureAssembler::new(layout);

    assert!(!signature.is_accepted(&mut verifier, b"Hello world").unwrap());

    signature.set(0, 9);
    signature.set(1, 8);
    signature.set(2, 7);
    assert!(signature.is_accepted(&mut verifier, b"Hello world").unwrap());
    assert!(!signature.is_accepted(&mut verifier, b"Goodbye").unwrap());
}

#[test]
fn same_seed_gives_same_noise() {
    let layout = SignatureLayout::new(Vec::new(), 1);
    let run = |seed: u64| {
        let clock = VirtualClock::new();
        let mut oracle = SimulatedOracle::new(clock.clone(), &layout, &[3])
            .noise_ns(1_000)
            .seed(seed);
        (0..32)
            .map(|_| {
                let before = clock.now();
                oracle.verify(b"", &[0]).unwrap();
                clock.now() - before
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
}
