#![deny(unsafe_code)]
//! # cgl-cost
//!
//! Records what each cycle cost and what it produced, and derives return on
//! investment per cycle and cumulatively.
//!
//! ROI here is advisory: it feeds the report and the logs but never decides
//! whether the loop continues.

pub mod evaluator;
pub mod model;

pub use evaluator::{CostConfig, CostEvaluator, CostSummary};
pub use model::{CycleBenefit, CycleCost, CycleCostSnapshot};
