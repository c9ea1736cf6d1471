//! Wastage statistics for the simulator.
//! Aggregates per-trial outcomes into per-party and overall summaries.

use crate::config::{ProtocolConfig, Scenario};
use crate::protocol::Party;

use super::trial::TrialOutcome;

// ------------------------------------------------------------------------------------------------
// Summary Statistics
// ------------------------------------------------------------------------------------------------

/// Distribution of wasted-pad counts over a set of trials.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WastageStats {
    /// Number of trials summarised
    pub samples: usize,
    /// Mean wasted pads per trial
    pub mean: f64,
    /// Fewest wasted pads in any trial
    pub min: usize,
    /// Most wasted pads in any trial
    pub max: usize,
    /// Population standard deviation
    pub std_dev: f64,
}

impl WastageStats {
    /// Summarises `samples`; all-zero for an empty slice.
    pub fn from_samples(samples: &[usize]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let count = samples.len() as f64;
        let mean = samples.iter().sum::<usize>() as f64 / count;
        let variance = samples
            .iter()
            .map(|&s| {
                let delta = s as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / count;
        Self {
            samples: samples.len(),
            mean,
            min: samples.iter().copied().min().unwrap_or(0),
            max: samples.iter().copied().max().unwrap_or(0),
            std_dev: variance.sqrt(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Simulation Report
// ------------------------------------------------------------------------------------------------

/// Aggregate result of one [`crate::run_simulation`] call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// Scenario that generated the traffic
    pub scenario: Scenario,
    /// Engine parameters every trial ran with
    pub protocol: ProtocolConfig,
    /// Number of trials run
    pub trials: usize,
    /// Wasted pads charged to each party, indexed by [`Party::index`]
    pub per_party: [WastageStats; 4],
    /// Wasted pads per trial, all parties together
    pub overall: WastageStats,
    /// Sum of wasted pads over every trial
    pub total_wasted: usize,
    /// Successful sends over every trial
    pub total_sent: usize,
    /// Sends refused by the secrecy-gap check
    pub total_violations: usize,
    /// Sends refused because the sender's lane was empty
    pub total_exhaustions: usize,
}

impl SimulationReport {
    pub(crate) fn from_outcomes(
        scenario: Scenario,
        protocol: ProtocolConfig,
        outcomes: &[TrialOutcome],
    ) -> Self {
        let per_party = Party::ALL.map(|p| {
            let samples: Vec<usize> = outcomes.iter().map(|o| o.remaining[p.index()]).collect();
            WastageStats::from_samples(&samples)
        });
        let wasted: Vec<usize> = outcomes.iter().map(|o| o.wasted).collect();

        Self {
            scenario,
            protocol,
            trials: outcomes.len(),
            per_party,
            overall: WastageStats::from_samples(&wasted),
            total_wasted: wasted.iter().sum(),
            total_sent: outcomes.iter().map(|o| o.sent).sum(),
            total_violations: outcomes.iter().map(|o| o.violations).sum(),
            total_exhaustions: outcomes.iter().map(|o| o.exhaustions).sum(),
        }
    }

    pub fn party(&self, party: Party) -> &WastageStats {
        &self.per_party[party.index()]
    }

    /// Mean wasted pads per trial, all parties together.
    pub fn mean_wasted(&self) -> f64 {
        self.overall.mean
    }

    /// Fraction of the sequence left unissued, averaged over trials.
    pub fn wasted_fraction(&self) -> f64 {
        self.overall.mean / self.protocol.pad_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_from_samples() {
        let s = WastageStats::from_samples(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert_eq!(s.samples, 8);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 2);
        assert_eq!(s.max, 9);
        assert_eq!(s.std_dev, 2.0);
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(WastageStats::from_samples(&[]), WastageStats::default());
    }
}
