//! Binds a hierarchical configuration into a name-path dependency injection
//! container.
//!
//! A [`ConfigSource`] supplies the tree (usually a [`ConfigTree`] loaded with
//! [`Config::builder`]), a [`ConfigBinder`] walks it, and every value lands in
//! a [`Container`] under its dotted path, ready for [`Injector`] factories.

pub mod binder;
pub mod config;
pub mod container;
mod error;
pub mod value;

pub use binder::{BinderOptions, Bound, ConfigBinder, TypeHint};
pub use config::{Config, ConfigError, ConfigSource, ConfigTree};
pub use container::{BindTarget, Container, ContainerError, Injector};
pub use error::Error;
pub use value::{Mapping, Number, Value, ValueError};
