pub mod config;
pub mod context;
#[cfg(feature = "postgres")]
pub mod db;
mod error;
pub mod telemetry;
pub mod validation;

pub use config::{Config, ConfigError, Environment, ServiceConfig};
pub use context::RequestContext;
#[cfg(feature = "postgres")]
pub use db::{DbConfig, DbError};
pub use error::Error;
pub use validation::{ValidationError, ValidationErrors, Validator};
