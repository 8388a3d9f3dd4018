pub mod analytics;
pub mod assistant;
pub mod calculations;
pub mod detection;
pub mod models;

pub use calculations::{ValidationError, YieldEstimator, estimate, validate};
pub use models::*;
