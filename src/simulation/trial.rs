//! A single simulation trial.
//!
//! The scenario picks which parties are active and how each attempt chooses
//! a sender. A refused send (gap violation or exhaustion) stops that party for
//! the rest of the trial; the trial ends when no active party can send or the
//! message budget is spent. Whatever is still unissued at that point is wasted.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::cipher::bits::BitString;
use crate::config::Scenario;
use crate::protocol::{Party, ProtocolEngine, ProtocolError};

/// Which parties take part in a trial and how often each is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct SenderPlan {
    weights: [f64; 4],
}

impl SenderPlan {
    /// Draws the active parties (and weights, for the weighted scenario).
    pub fn draw<R: Rng + ?Sized>(scenario: Scenario, rng: &mut R) -> Self {
        let mut weights = [0.0; 4];
        match scenario {
            Scenario::SingleParty => {
                if let Some(p) = Party::ALL.choose(rng) {
                    weights[p.index()] = 1.0;
                }
            }
            Scenario::TwoParties => {
                for p in Party::ALL.choose_multiple(rng, 2) {
                    weights[p.index()] = 1.0;
                }
            }
            Scenario::AllParties => weights = [1.0; 4],
            Scenario::WeightedParties => {
                for w in weights.iter_mut() {
                    *w = rng.gen::<f64>();
                }
                let total: f64 = weights.iter().sum();
                if total > 0.0 {
                    for w in weights.iter_mut() {
                        *w /= total;
                    }
                } else {
                    weights = [1.0; 4];
                }
            }
        }
        Self { weights }
    }

    pub fn active(&self) -> Vec<Party> {
        Party::ALL
            .into_iter()
            .filter(|p| self.weights[p.index()] > 0.0)
            .collect()
    }

    pub fn weight(&self, party: Party) -> f64 {
        self.weights[party.index()]
    }

    /// Picks the next sender among the parties still `running`.
    pub fn pick<R: Rng + ?Sized>(&self, running: &[bool; 4], rng: &mut R) -> Option<Party> {
        let candidates: Vec<Party> = Party::ALL
            .into_iter()
            .filter(|p| running[p.index()] && self.weights[p.index()] > 0.0)
            .collect();
        if candidates.len() <= 1 {
            return candidates.first().copied();
        }
        match WeightedIndex::new(candidates.iter().map(|p| self.weights[p.index()])) {
            Ok(dist) => Some(candidates[dist.sample(rng)]),
            Err(_) => candidates.choose(rng).copied(),
        }
    }
}

/// What one trial did and what it left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Parties eligible to send in this trial
    pub active: Vec<Party>,
    /// Successful sends
    pub sent: usize,
    /// Parties stopped by the secrecy-gap check
    pub violations: usize,
    /// Parties stopped by an empty lane
    pub exhaustions: usize,
    /// Unissued pads charged to each party at the end, indexed by [`Party::index`]
    pub remaining: [usize; 4],
    /// Unissued pads at the end, all parties together
    pub wasted: usize,
}

/// Drives one trial against `engine`, which must be fresh.
pub fn run_trial<R: Rng + ?Sized>(
    engine: &mut ProtocolEngine,
    scenario: Scenario,
    message_budget: Option<usize>,
    message: &BitString,
    rng: &mut R,
) -> Result<TrialOutcome, ProtocolError> {
    let plan = SenderPlan::draw(scenario, rng);
    let active = plan.active();
    let mut running = [false; 4];
    for p in &active {
        running[p.index()] = true;
    }

    let mut sent = 0;
    let mut violations = 0;
    let mut exhaustions = 0;

    while message_budget.map_or(true, |budget| sent < budget) {
        let Some(sender) = plan.pick(&running, rng) else {
            break;
        };
        match engine.send(sender, message) {
            Ok(_) => sent += 1,
            Err(ProtocolError::SecrecyConstraintViolated { .. }) => {
                violations += 1;
                running[sender.index()] = false;
            }
            Err(ProtocolError::PadsExhausted(_)) => {
                exhaustions += 1;
                running[sender.index()] = false;
            }
            Err(e) => return Err(e),
        }
    }

    let allocation = engine.allocation();
    let remaining = Party::ALL.map(|p| allocation.attributed_remaining(p));
    let wasted = engine.unissued_count();
    debug_assert_eq!(remaining.iter().sum::<usize>(), wasted);
    debug_assert_eq!(engine.issued_count() + wasted, engine.config().pad_count);

    log::trace!(
        "Trial {:?}: active {:?}, sent {}, wasted {}",
        scenario,
        active,
        sent,
        wasted
    );

    Ok(TrialOutcome {
        active,
        sent,
        violations,
        exhaustions,
        remaining,
        wasted,
    })
}
