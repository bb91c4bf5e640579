pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{ApiKeys, Credentials, Endpoints, Settings};
pub use error::AppError;
