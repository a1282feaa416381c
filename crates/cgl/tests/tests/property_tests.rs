#[path = "property/chain_linkage.rs"]
mod chain_linkage;

#[path = "property/decision_priority.rs"]
mod decision_priority;

#[path = "property/error_limit.rs"]
mod error_limit;
