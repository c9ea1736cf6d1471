//! Configuration for engines and simulation runs.
//!
//! These structs are populated by the host application and passed to
//! [`crate::ProtocolEngine`] and [`crate::run_simulation`]. With the `serde`
//! feature they can be read from whatever format the host prefers.

use core::fmt;

/// Default pad count `n`.
pub const DEFAULT_PAD_COUNT: usize = 1000;
/// Default pad length `L` in bits.
pub const DEFAULT_PAD_BITS: usize = 4028;
/// Default maximum consumption gap `d`.
pub const DEFAULT_MAX_GAP: usize = 40;
/// Default number of simulation trials.
pub const DEFAULT_TRIALS: usize = 1000;

/// How the secrecy-gap check treats a party that has not sent yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SilentPartyPolicy {
    /// A party with no sends is ignored until its first send.
    #[default]
    Ignored,
    /// A party with no sends counts as having consumed zero pads, so a lone
    /// sender is stopped after `d` sends.
    Constraining,
}

/// Parameters fixed when an engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProtocolConfig {
    /// Number of pads `n`.
    pub pad_count: usize,
    /// Pad length `L` in bits; also the longest message accepted.
    pub pad_bits: usize,
    /// Maximum allowed difference `d` between two parties' consumed counts.
    pub max_gap: usize,
    pub silent_parties: SilentPartyPolicy,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            pad_count: DEFAULT_PAD_COUNT,
            pad_bits: DEFAULT_PAD_BITS,
            max_gap: DEFAULT_MAX_GAP,
            silent_parties: SilentPartyPolicy::default(),
        }
    }
}

impl ProtocolConfig {
    pub fn new(pad_count: usize, pad_bits: usize, max_gap: usize) -> Self {
        Self {
            pad_count,
            pad_bits,
            max_gap,
            ..Self::default()
        }
    }

    pub fn with_silent_parties(mut self, policy: SilentPartyPolicy) -> Self {
        self.silent_parties = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pad_count == 0 {
            return Err(ConfigError::ZeroPadCount);
        }
        if self.pad_bits == 0 {
            return Err(ConfigError::ZeroPadBits);
        }
        Ok(())
    }
}

/// Traffic pattern driven against each trial's engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scenario {
    /// A: one party, chosen uniformly, sends every message.
    SingleParty,
    /// B: two distinct parties chosen uniformly; each attempt picks one of them uniformly.
    TwoParties,
    /// C: each attempt picks uniformly among all four parties.
    #[default]
    AllParties,
    /// D: all four parties, with per-trial random sending weights.
    WeightedParties,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::SingleParty,
        Scenario::TwoParties,
        Scenario::AllParties,
        Scenario::WeightedParties,
    ];

    /// Short label ("A" to "D").
    pub const fn label(self) -> &'static str {
        match self {
            Scenario::SingleParty => "A",
            Scenario::TwoParties => "B",
            Scenario::AllParties => "C",
            Scenario::WeightedParties => "D",
        }
    }
}

/// Parameters for a batch of simulation trials.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    pub protocol: ProtocolConfig,
    pub scenario: Scenario,
    pub trials: usize,
    /// Stop a trial after this many successful sends. `None` runs until no
    /// active party can send.
    pub message_budget: Option<usize>,
    /// Length of each simulated message. `None` uses the full pad length.
    pub message_bits: Option<usize>,
    /// Seed for a reproducible run. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolConfig::default(),
            scenario: Scenario::default(),
            trials: DEFAULT_TRIALS,
            message_budget: None,
            message_bits: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.protocol.validate()?;
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        match self.message_bits {
            Some(0) => Err(ConfigError::ZeroMessageBits),
            Some(bits) if bits > self.protocol.pad_bits => Err(ConfigError::MessageLongerThanPad {
                message_bits: bits,
                pad_bits: self.protocol.pad_bits,
            }),
            _ => Ok(()),
        }
    }

    /// Effective message length in bits.
    pub fn message_bits(&self) -> usize {
        self.message_bits.unwrap_or(self.protocol.pad_bits)
    }
}

/// Out-of-domain configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPadCount,
    ZeroPadBits,
    ZeroTrials,
    ZeroMessageBits,
    MessageLongerThanPad { message_bits: usize, pad_bits: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPadCount => write!(f, "pad count must be positive"),
            ConfigError::ZeroPadBits => write!(f, "pad length must be positive"),
            ConfigError::ZeroTrials => write!(f, "trial count must be positive"),
            ConfigError::ZeroMessageBits => write!(f, "message length must be positive"),
            ConfigError::MessageLongerThanPad { message_bits, pad_bits } => write!(
                f,
                "message length {} bits exceeds pad length {} bits",
                message_bits, pad_bits
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
