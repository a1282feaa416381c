#![deny(unsafe_code)]
//! # cgl-audit
//!
//! Append-only audit trail for the governance loop.
//!
//! Every event is linked to its predecessor by hash: `event_hash` is the
//! SHA3-256 of the event's canonical JSON (all fields except the hash
//! itself), and `previous_hash` is the prior event's `event_hash`, or `""`
//! for the first event. Editing, reordering or deleting a persisted event is
//! detectable with [`AuditTrail::verify_integrity`].

pub mod error;
pub mod event;
pub mod query;
pub mod trail;

pub use error::{AuditError, AuditResult};
pub use event::{AuditEvent, EventType, Severity};
pub use query::{AuditQuery, AuditQueryBuilder};
pub use trail::{verify_events, AuditTrail, AUDIT_TRAIL_FILE, DEFAULT_ACTOR};
