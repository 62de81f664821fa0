pub mod document;
pub mod payment;
pub mod user;

pub use document::*;
pub use payment::*;
pub use user::*;
