#![deny(unsafe_code)]
//! # cgl-verification
//!
//! Acceptance gates evaluated once per cycle against the current metrics.
//!
//! The default battery:
//! - **hash_divergence** at most `max_hash_divergence`
//! - **validation_rate** at least `min_validation_rate`
//! - **performance_variance** at most `max_performance_variance`
//! - **proof_chain_coverage** at least `min_proof_chain_coverage`
//! - **assumptions_verified** must hold
//!
//! A cycle is blocked when any gate fails. Thresholds live in
//! [`GateThresholds`] and can be overridden per deployment.

pub mod gate;
pub mod system;
pub mod thresholds;

pub use gate::{AssumptionsGate, Bound, Gate, GateResult, MetricGate};
pub use system::{VerificationGateSystem, VerificationReport, VerificationSummary};
pub use thresholds::GateThresholds;
