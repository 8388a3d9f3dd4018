//! Yield calculation modules.
//!
//! This module provides the estimator behind the yield predictor form:
//! input validation, the multiplier table, advisory rules, and the
//! estimator that combines them.

pub mod advisory;
pub mod common;
pub mod estimator;
pub mod multipliers;
pub mod validation;

pub use advisory::{Advice, Advisory, AdvisoryRule, default_rules};
pub use estimator::{YieldEstimator, estimate};
pub use validation::{ValidationError, validate};
