pub mod enrichment_service;
pub mod payment_service;

pub use enrichment_service::*;
pub use payment_service::*;
