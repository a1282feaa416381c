use crate::error::AuditResult;
use crate::event::{AuditEvent, EventType, Severity};
use crate::query::AuditQuery;
use cgl_types::storage::{read_json_or_default, write_json};
use cgl_types::ChainVerification;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the persisted trail inside a storage directory.
pub const AUDIT_TRAIL_FILE: &str = "audit_trail.json";

/// Actor used by [`AuditTrail::record_info`].
pub const DEFAULT_ACTOR: &str = "system";

/// Append-only, hash-chained event log.
#[derive(Debug, Default)]
pub struct AuditTrail {
    events: Vec<AuditEvent>,
    storage_path: Option<PathBuf>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty trail rewritten to `path` after every event.
    pub fn with_storage(path: impl Into<PathBuf>) -> Self {
        Self {
            events: Vec::new(),
            storage_path: Some(path.into()),
        }
    }

    /// Load a persisted trail and keep appending to it.
    ///
    /// A missing file yields an empty trail. A tampered file still loads;
    /// [`Self::verify_integrity`] reports what is wrong with it.
    pub fn open(path: impl Into<PathBuf>) -> AuditResult<Self> {
        let path = path.into();
        let events: Vec<AuditEvent> = read_json_or_default(&path)?;
        info!(path = %path.display(), events = events.len(), "audit trail opened");
        Ok(Self {
            events,
            storage_path: Some(path),
        })
    }

    /// Append an event and persist the trail.
    pub fn record(
        &mut self,
        event_type: EventType,
        cycle_id: Option<&str>,
        payload: Value,
        severity: Severity,
        actor: &str,
    ) -> AuditResult<&AuditEvent> {
        let event = AuditEvent::seal(
            self.events.len() as u64,
            event_type,
            severity,
            cycle_id.map(String::from),
            actor.to_string(),
            payload,
            self.head_hash().unwrap_or_default().to_string(),
        )?;

        debug!(
            event_id = event.event_id,
            event_type = %event.event_type,
            severity = %event.severity,
            cycle_id = event.cycle_id.as_deref().unwrap_or("-"),
            "audit event recorded"
        );

        self.events.push(event);
        if let Some(path) = &self.storage_path {
            write_json(path, &self.events)?;
        }
        Ok(&self.events[self.events.len() - 1])
    }

    /// [`Self::record`] at INFO severity from [`DEFAULT_ACTOR`].
    pub fn record_info(
        &mut self,
        event_type: EventType,
        cycle_id: Option<&str>,
        payload: Value,
    ) -> AuditResult<&AuditEvent> {
        self.record(event_type, cycle_id, payload, Severity::Info, DEFAULT_ACTOR)
    }

    pub fn verify_integrity(&self) -> ChainVerification {
        let result = verify_events(&self.events);
        if !result.valid {
            warn!(errors = result.errors.len(), "audit trail integrity violated");
        }
        result
    }

    /// Check a single event's stored hash against its contents.
    pub fn verify_event(event: &AuditEvent) -> bool {
        event.verify_hash()
    }

    pub fn query(&self, query: &AuditQuery) -> Vec<&AuditEvent> {
        query.apply(&self.events)
    }

    pub fn query_by_cycle(&self, cycle_id: &str) -> Vec<&AuditEvent> {
        self.events
            .iter()
            .filter(|e| e.cycle_id.as_deref() == Some(cycle_id))
            .collect()
    }

    pub fn query_by_type(&self, event_type: EventType) -> Vec<&AuditEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Events at or above `min`.
    pub fn query_by_severity(&self, min: Severity) -> Vec<&AuditEvent> {
        self.events.iter().filter(|e| e.severity >= min).collect()
    }

    /// Full ordered copy of the trail.
    pub fn export_all(&self) -> Vec<AuditEvent> {
        self.events.clone()
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn head_hash(&self) -> Option<&str> {
        self.events.last().map(|e| e.event_hash.as_str())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }
}

/// Verify ids, linkage and hashes of `events`, reporting every violation.
pub fn verify_events(events: &[AuditEvent]) -> ChainVerification {
    let mut errors = Vec::new();
    let mut prev = "";

    for (i, event) in events.iter().enumerate() {
        if event.event_id != i as u64 {
            errors.push(format!(
                "event {}: event_id {} out of sequence",
                i, event.event_id
            ));
        }
        if event.previous_hash != prev {
            errors.push(format!(
                "event {}: broken link (expected previous_hash {:?}, found {:?})",
                i, prev, event.previous_hash
            ));
        }
        match event.compute_hash() {
            Ok(h) if h == event.event_hash => {}
            Ok(_) => errors.push(format!(
                "event {} ({}): event_hash does not match contents",
                i, event.event_type
            )),
            Err(e) => errors.push(format!("event {}: cannot hash: {}", i, e)),
        }
        prev = &event.event_hash;
    }

    ChainVerification::from_errors(events.len(), errors)
}
