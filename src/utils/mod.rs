// Utility functions
pub mod error;
pub mod metrics;

pub use error::*;
