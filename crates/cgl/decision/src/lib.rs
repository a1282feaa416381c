#![deny(unsafe_code)]
//! # cgl-decision
//!
//! Decides, once per cycle, whether the loop continues and in which mode.
//!
//! External constraints are evaluated first and always win: objective met,
//! manual stop, time budget, resource budget, cycle cap. Only then does a
//! blocked verification count toward the error limit. Internal signals can
//! at most move the loop into an adjusted mode.

pub mod decision;
pub mod engine;

pub use decision::{Adjustment, CycleDecision, DecisionRecord};
pub use engine::{DecisionConfig, DecisionEngine};
