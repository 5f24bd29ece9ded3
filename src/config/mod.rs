//! Configuration loading and management.

mod builder;
mod env;
mod error;
mod file;
mod service;
mod source;

pub use builder::Config;
pub use env::{EnvSource, VarsSource};
pub use error::ConfigError;
pub use file::{DotenvSource, TomlFileSource};
pub use service::{Environment, ServiceConfig};
pub use source::{ConfigEntry, ConfigSource};
