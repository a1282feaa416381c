#![deny(unsafe_code)]
//! # cgl-types
//!
//! Shared foundation for the closed-loop governance (CGL) crates.
//!
//! - **canonical**: sorted-key, compact JSON used as the input of every chain hash
//! - **digest**: SHA-256 / SHA3-256 hex digests over canonical JSON
//! - **storage**: full-file JSON persistence for chains and reports
//! - **constraints**: caller-supplied external inputs and the derived
//!   [`ExternalConstraints`] snapshot
//! - **signals**: advisory [`InternalSignals`] and their thresholds
//! - **metrics**: named per-cycle metric values
//!
//! Chains built on these helpers must hash identically across
//! implementations, so nothing here may change the canonical form.

pub mod canonical;
pub mod constraints;
pub mod digest;
pub mod error;
pub mod integrity;
pub mod metrics;
pub mod signals;
pub mod storage;

pub use canonical::to_canonical_json;
pub use constraints::{ExternalConstraints, ExternalInputs};
pub use digest::{hash_canonical, sha256_hex, sha3_256_hex, HashAlgorithm};
pub use error::{StorageError, StorageResult};
pub use integrity::ChainVerification;
pub use metrics::CycleMetrics;
pub use signals::{InternalSignals, SignalThresholds};
