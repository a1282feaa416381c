//! Filtered reads over the audit trail.

use crate::event::{AuditEvent, EventType, Severity};
use chrono::{DateTime, Utc};

/// Conjunctive filter over audit events. Results keep trail order.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Filter by cycle ID; run-level events never match
    pub cycle_id: Option<String>,

    /// Filter by event type
    pub event_type: Option<EventType>,

    /// Events at or above this severity
    pub min_severity: Option<Severity>,

    /// Filter by recording actor
    pub actor: Option<String>,

    /// Filter by time range start (inclusive)
    pub from: Option<DateTime<Utc>>,

    /// Filter by time range end (exclusive)
    pub to: Option<DateTime<Utc>>,

    /// Maximum number of results, earliest first
    pub limit: Option<usize>,
}

impl AuditQuery {
    /// Create a new query builder
    pub fn builder() -> AuditQueryBuilder {
        AuditQueryBuilder::default()
    }

    /// Check if an event matches every set filter
    pub fn matches(&self, event: &AuditEvent) -> bool {
        if let Some(ref cycle_id) = self.cycle_id {
            if event.cycle_id.as_ref() != Some(cycle_id) {
                return false;
            }
        }
        if let Some(event_type) = self.event_type {
            if event.event_type != event_type {
                return false;
            }
        }
        if let Some(min) = self.min_severity {
            if event.severity < min {
                return false;
            }
        }
        if let Some(ref actor) = self.actor {
            if &event.actor != actor {
                return false;
            }
        }
        if let Some(from) = self.from {
            if event.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if event.timestamp >= to {
                return false;
            }
        }
        true
    }

    /// Matching events in trail order, truncated to `limit`
    pub fn apply<'a>(&self, events: &'a [AuditEvent]) -> Vec<&'a AuditEvent> {
        let matching = events.iter().filter(|e| self.matches(e));
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}

/// Builder for [`AuditQuery`]
#[derive(Debug, Default)]
pub struct AuditQueryBuilder {
    query: AuditQuery,
}

impl AuditQueryBuilder {
    /// Only events of this cycle
    pub fn cycle(mut self, cycle_id: impl Into<String>) -> Self {
        self.query.cycle_id = Some(cycle_id.into());
        self
    }

    /// Only events of this type
    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.query.event_type = Some(event_type);
        self
    }

    /// Only events at or above this severity
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.query.min_severity = Some(severity);
        self
    }

    /// Only events recorded by this actor
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.query.actor = Some(actor.into());
        self
    }

    /// Events at or after this time
    pub fn from(mut self, time: DateTime<Utc>) -> Self {
        self.query.from = Some(time);
        self
    }

    /// Events before this time
    pub fn to(mut self, time: DateTime<Utc>) -> Self {
        self.query.to = Some(time);
        self
    }

    /// Cap the number of results
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Build the query
    pub fn build(self) -> AuditQuery {
        self.query
    }
}
