//! Configuration loading and lookup.

mod builder;
mod env;
mod error;
mod file;
mod source;

pub use builder::{Config, ConfigTree};
pub use env::EnvLayer;
pub use error::ConfigError;
pub use file::FileLayer;
pub use source::{ConfigLayer, ConfigSource, LayerEntry};
