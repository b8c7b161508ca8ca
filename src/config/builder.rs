use std::path::Path;

use serde::de::DeserializeOwned;

use super::env::EnvLayer;
use super::file::FileLayer;
use super::source::{merge_at_path, ConfigLayer, ConfigSource};
use super::ConfigError;
use crate::value::Value;

/// Builder for loading layered configuration.
///
/// Layers are merged in registration order, with later layers overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely. Key order follows the order
/// keys first appear across the layers.
///
/// ## Example
///
/// ```no_run
/// use inject_config::{Config, ConfigSource};
///
/// let config = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .load()?;
///
/// assert!(config.has("app.db.host"));
/// # Ok::<(), inject_config::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .load() or .build() is called"]
pub struct Config {
    layers: Vec<Box<dyn ConfigLayer>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file layer.
    ///
    /// If `required` is `true`, loading fails when the file doesn't exist.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_layer(FileLayer::new(path, required))
    }

    /// Adds an environment variable layer.
    ///
    /// With `with_env("MYAPP", "__")`, `MYAPP__DB__PORT=5432` sets `db.port`.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_layer(EnvLayer::new(prefix, separator))
    }

    /// Adds a custom layer.
    pub fn with_layer(mut self, layer: impl ConfigLayer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Loads and merges every layer into a [`ConfigTree`].
    pub fn load(self) -> Result<ConfigTree, ConfigError> {
        let mut merged = toml::Table::new();

        for layer in &self.layers {
            for entry in layer.entries()? {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        Ok(ConfigTree {
            root: Value::from(merged),
        })
    }

    /// Loads every layer and deserializes the merged tree into `T`.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        self.load()?.deserialize()
    }
}

/// A loaded, merged configuration namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Value,
}

impl ConfigTree {
    /// Deserializes the whole tree into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Ok(self.root.deserialize_into()?)
    }

    /// Deserializes the subtree at `path` into `T`.
    ///
    /// A missing path deserializes from an empty table, so types whose
    /// fields all carry defaults still succeed.
    pub fn section<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        match self.root.lookup(path) {
            Some(value) => Ok(value.deserialize_into()?),
            None => Ok(Value::Mapping(Default::default()).deserialize_into()?),
        }
    }
}

impl ConfigSource for ConfigTree {
    fn get(&self, path: &str) -> Option<Value> {
        self.root.lookup(path).cloned()
    }

    fn all(&self) -> Value {
        self.root.clone()
    }
}

impl From<Value> for ConfigTree {
    fn from(root: Value) -> Self {
        Self { root }
    }
}
