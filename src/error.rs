use crate::config::ConfigError;
use crate::container::ContainerError;
use thiserror::Error;

/// Top-level error type for the inject-config library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    #[error("could not find configuration root {0}")]
    RootNotFound(String),
}
