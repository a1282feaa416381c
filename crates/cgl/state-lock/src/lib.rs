#![deny(unsafe_code)]
//! # cgl-state-lock
//!
//! Tamper-evident snapshots of the inputs governing each cycle.
//!
//! Every lock hashes its parameters, assumptions, external constraints,
//! timestamp and the previous lock's hash with SHA-256 over canonical JSON,
//! forming a singly linked chain. Locks are never mutated; integrity
//! problems are reported by [`StateLockChain::verify_chain_integrity`],
//! never raised.

pub mod chain;
pub mod error;
pub mod lock;

pub use chain::{verify_locks, StateLockChain, STATE_CHAIN_FILE};
pub use error::{StateLockError, StateLockResult};
pub use lock::StateLock;
