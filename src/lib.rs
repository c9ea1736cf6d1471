//! Four-party one-time pad messaging over a finite, pre-shared pad sequence.
//!
//! The pad sequence is split into two lanes by index parity. Each lane is
//! consumed from both ends by two parties travelling in opposite directions,
//! and a secrecy-gap check keeps the four parties' consumption counts within
//! `d` of each other. The [`simulation`] harness measures how many pads are
//! left unissued under different traffic patterns.
//!
//! # Layout
//! - [`entropy`]: the random source capability used to generate pads.
//! - [`cipher`]: bit strings and the XOR one-time pad primitive.
//! - [`pad`]: the immutable [`pad::PadSequence`] and per-party usage tracking.
//! - [`protocol`]: parties, lanes, the lane allocator and [`protocol::ProtocolEngine`].
//! - [`simulation`]: the wastage-measurement harness (requires `std`).

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod cipher;
pub mod config;
pub mod entropy;
pub mod pad;
pub mod protocol;

#[cfg(feature = "std")]
pub mod simulation;

pub use cipher::bits::BitString;
pub use config::{ConfigError, ProtocolConfig, Scenario, SilentPartyPolicy, SimulationConfig};
pub use entropy::{EntropyError, EntropySource};
pub use pad::PadSequence;
pub use protocol::engine::{new_engine, ProtocolEngine};
pub use protocol::lanes::{allocate, Allocation, PartyCursor};
pub use protocol::party::{Direction, Lane, Party};
pub use protocol::ProtocolError;

#[cfg(feature = "std")]
pub use protocol::shared::SharedEngine;
#[cfg(feature = "std")]
pub use simulation::{run_scenario, run_simulation, SimulationReport};
