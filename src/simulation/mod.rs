//! Wastage-measurement harness.
//!
//! Runs many independent trials, each on a fresh [`ProtocolEngine`], and
//! reports how many pads were left unissued.
//!
//! # Components
//! - `trial`: scenario sender plans and the single-trial driver.
//! - `stats`: per-party and overall wastage summaries.
//!
//! All trials of a run share one read-only pad sequence; engine state is
//! never shared. With a seed, a run is fully reproducible.

use alloc::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cipher::bits::BitString;
use crate::config::{ProtocolConfig, SimulationConfig};
use crate::entropy::{EntropyError, RngSource};
use crate::pad::PadSequence;
use crate::protocol::{ProtocolEngine, ProtocolError};

pub mod stats;
pub mod trial;

pub use crate::config::Scenario;
pub use stats::{SimulationReport, WastageStats};
pub use trial::{run_trial, SenderPlan, TrialOutcome};

/// Runs `config.trials` trials of `config.scenario`.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport, ProtocolError> {
    config.validate()?;
    let protocol = config.protocol;

    let mut rng = match config.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(rand_core::OsRng).map_err(|_| EntropyError::CollectionFailed)?,
    };

    let pads = Arc::new(PadSequence::generate(
        protocol.pad_count,
        protocol.pad_bits,
        &mut RngSource::new(&mut rng),
    )?);
    let message = random_message(config.message_bits(), &mut rng);

    let mut outcomes = Vec::with_capacity(config.trials);
    for _ in 0..config.trials {
        let mut engine = ProtocolEngine::with_pads(protocol, Arc::clone(&pads))?;
        outcomes.push(run_trial(
            &mut engine,
            config.scenario,
            config.message_budget,
            &message,
            &mut rng,
        )?);
    }

    let report = SimulationReport::from_outcomes(config.scenario, protocol, &outcomes);
    log::info!(
        "Scenario {}: {} trials, n={}, L={}, d={}, mean wasted {:.2} (min {}, max {}, sd {:.2})",
        config.scenario.label(),
        report.trials,
        protocol.pad_count,
        protocol.pad_bits,
        protocol.max_gap,
        report.overall.mean,
        report.overall.min,
        report.overall.max,
        report.overall.std_dev
    );
    log::info!(
        "Scenario {}: {} sends, {} refused by the gap check, {} by exhaustion",
        config.scenario.label(),
        report.total_sent,
        report.total_violations,
        report.total_exhaustions
    );
    Ok(report)
}

/// `run_simulation` with default settings apart from the given parameters.
pub fn run_scenario(
    scenario: Scenario,
    n: usize,
    pad_bits: usize,
    max_gap: usize,
    trials: usize,
) -> Result<SimulationReport, ProtocolError> {
    run_simulation(&SimulationConfig {
        protocol: ProtocolConfig::new(n, pad_bits, max_gap),
        scenario,
        trials,
        ..SimulationConfig::default()
    })
}

fn random_message<R: RngCore>(bits: usize, rng: &mut R) -> BitString {
    let mut bytes = vec![0u8; crate::cipher::bits::byte_len(bits)];
    rng.fill_bytes(&mut bytes);
    BitString::from_masked_vec(bytes, bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SilentPartyPolicy, DEFAULT_MAX_GAP, DEFAULT_PAD_BITS, DEFAULT_PAD_COUNT};
    use crate::protocol::Party;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config(scenario: Scenario, protocol: ProtocolConfig, trials: usize) -> SimulationConfig {
        SimulationConfig {
            protocol,
            scenario,
            trials,
            seed: Some(2024),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_single_party_wastes_the_other_lane() {
        init_logging();
        let report = run_simulation(&config(Scenario::SingleParty, ProtocolConfig::new(100, 16, 5), 40)).unwrap();
        assert_eq!(report.trials, 40);
        assert_eq!(report.overall.min, 50);
        assert_eq!(report.overall.max, 50);
        assert_eq!(report.mean_wasted(), 50.0);
        assert_eq!(report.total_sent, 40 * 50);
        assert_eq!(report.total_violations, 0);
        assert_eq!(report.total_exhaustions, 40);
    }

    #[test]
    fn test_single_party_constraining_policy() {
        init_logging();
        let protocol = ProtocolConfig::new(100, 16, 5).with_silent_parties(SilentPartyPolicy::Constraining);
        let report = run_simulation(&config(Scenario::SingleParty, protocol, 20)).unwrap();
        assert_eq!(report.mean_wasted(), 95.0);
        assert_eq!(report.total_violations, 20);
    }

    #[test]
    fn test_every_pad_is_issued_or_wasted() {
        init_logging();
        for scenario in Scenario::ALL {
            let report = run_simulation(&config(scenario, ProtocolConfig::new(120, 8, 6), 30)).unwrap();
            assert_eq!(report.total_sent + report.total_wasted, 30 * 120, "scenario {:?}", scenario);

            let party_means: f64 = Party::ALL.iter().map(|&p| report.party(p).mean).sum();
            assert!((party_means - report.overall.mean).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unbounded_gap_wastes_nothing() {
        // With d >= n nobody is ever refused by the gap check, so every
        // active party runs until its lane is empty.
        init_logging();
        for scenario in [Scenario::AllParties, Scenario::WeightedParties] {
            let report = run_simulation(&config(scenario, ProtocolConfig::new(64, 8, 64), 10)).unwrap();
            assert_eq!(report.total_wasted, 0, "scenario {:?}", scenario);
            assert_eq!(report.total_violations, 0);
            assert_eq!(report.total_exhaustions, 40);
        }
    }

    #[test]
    fn test_wastage_at_default_parameters() {
        // n = 1000, L = 4028, d = 40, 1000 trials.
        init_logging();
        let run = |scenario| {
            run_simulation(&SimulationConfig {
                scenario,
                seed: Some(7),
                ..SimulationConfig::default()
            })
            .unwrap()
        };
        let half = (DEFAULT_PAD_COUNT / 2) as f64;

        // A lone sender drains its own lane and leaves the other one whole.
        let a = run(Scenario::SingleParty);
        assert_eq!(a.trials, 1000);
        assert_eq!(a.overall.min, 500);
        assert_eq!(a.overall.max, 500);
        assert_eq!(a.total_violations, 0);

        let b = run(Scenario::TwoParties);
        let c = run(Scenario::AllParties);
        assert!(b.mean_wasted() < half, "B mean {}", b.mean_wasted());
        assert!(c.mean_wasted() < half, "C mean {}", c.mean_wasted());
        assert!(c.mean_wasted() < b.mean_wasted());
        assert!(b.total_violations > 0);
        assert!(c.total_violations > 0);
    }

    #[test]
    fn test_wastage_grows_as_gap_shrinks() {
        init_logging();
        let run = |protocol| run_simulation(&config(Scenario::AllParties, protocol, 200)).unwrap();

        // d >= n/2 can never be exceeded inside a 500-pad lane.
        let wide = run(ProtocolConfig::new(DEFAULT_PAD_COUNT, DEFAULT_PAD_BITS, 500));
        assert_eq!(wide.total_wasted, 0);
        assert_eq!(wide.total_violations, 0);

        let default_gap = run(ProtocolConfig::new(DEFAULT_PAD_COUNT, DEFAULT_PAD_BITS, DEFAULT_MAX_GAP));
        let narrow = run(ProtocolConfig::new(DEFAULT_PAD_COUNT, DEFAULT_PAD_BITS, 10));
        assert!(default_gap.mean_wasted() > 0.0);
        assert!(narrow.mean_wasted() > default_gap.mean_wasted());

        // Silent parties that constrain pin a lone sender to exactly d sends.
        let pinned = run_simulation(&config(
            Scenario::SingleParty,
            ProtocolConfig::default().with_silent_parties(SilentPartyPolicy::Constraining),
            200,
        ))
        .unwrap();
        assert_eq!(pinned.overall.min, DEFAULT_PAD_COUNT - DEFAULT_MAX_GAP);
        assert_eq!(pinned.overall.max, DEFAULT_PAD_COUNT - DEFAULT_MAX_GAP);
    }

    #[test]
    fn test_budget_limits_each_trial() {
        let mut c = config(Scenario::AllParties, ProtocolConfig::new(100, 8, 100), 10);
        c.message_budget = Some(25);
        let report = run_simulation(&c).unwrap();
        assert_eq!(report.total_sent, 250);
        assert_eq!(report.overall.min, 75);
        assert_eq!(report.overall.max, 75);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let c = config(Scenario::WeightedParties, ProtocolConfig::new(80, 32, 4), 25);
        assert_eq!(run_simulation(&c).unwrap(), run_simulation(&c).unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut c = config(Scenario::AllParties, ProtocolConfig::new(10, 8, 2), 1);
        c.trials = 0;
        assert!(matches!(run_simulation(&c), Err(ProtocolError::InvalidConfig(_))));
    }

    #[test]
    fn test_run_scenario_defaults() {
        let report = run_scenario(Scenario::TwoParties, 60, 8, 4, 5).unwrap();
        assert_eq!(report.trials, 5);
        assert_eq!(report.protocol.pad_count, 60);
        assert_eq!(report.scenario, Scenario::TwoParties);
    }
}
