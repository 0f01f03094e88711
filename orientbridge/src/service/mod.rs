//! Service facade wiring the orientation components together.

mod config;
mod error;
mod facade;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use facade::{OrientationService, Platform};
