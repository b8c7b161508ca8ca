use toml::{Table, Value as TomlValue};

use super::ConfigError;
use crate::value::Value;

/// Read-only hierarchical lookups over a configuration namespace.
///
/// Paths are dot-separated (`app.db.host`). The empty path names the whole
/// namespace.
pub trait ConfigSource {
    /// Returns the value at `path`, if one is present.
    fn get(&self, path: &str) -> Option<Value>;

    /// Returns the whole namespace as a single value.
    fn all(&self) -> Value;

    /// Returns true when `path` is present, even if it holds null.
    fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}

impl ConfigSource for Value {
    fn get(&self, path: &str) -> Option<Value> {
        self.lookup(path).cloned()
    }

    fn all(&self) -> Value {
        self.clone()
    }
}

/// A fragment of configuration produced by a layer, mounted at `path`.
#[derive(Debug, Clone)]
pub struct LayerEntry {
    pub path: Vec<String>,
    pub value: TomlValue,
}

impl LayerEntry {
    pub fn root(table: Table) -> Self {
        Self {
            path: Vec::new(),
            value: TomlValue::Table(table),
        }
    }

    pub fn at_path(path: Vec<String>, value: TomlValue) -> Self {
        Self { path, value }
    }
}

/// One layer of the loading pipeline (a file, the environment, ...).
pub trait ConfigLayer: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<LayerEntry>, ConfigError>;
}

/// Merges `value` into `table` at `path`, creating intermediate tables.
///
/// Tables merge recursively; any other value replaces what was there.
pub fn merge_at_path(table: &mut Table, path: &[String], value: TomlValue) {
    let Some((first, rest)) = path.split_first() else {
        if let TomlValue::Table(overlay) = value {
            deep_merge(table, overlay);
        }
        return;
    };

    if rest.is_empty() {
        match (table.get_mut(first), value) {
            (Some(TomlValue::Table(base)), TomlValue::Table(overlay)) => deep_merge(base, overlay),
            (_, value) => {
                table.insert(first.clone(), value);
            }
        }
        return;
    }

    if !matches!(table.get(first), Some(TomlValue::Table(_))) {
        table.insert(first.clone(), TomlValue::Table(Table::new()));
    }

    if let Some(TomlValue::Table(nested)) = table.get_mut(first) {
        merge_at_path(nested, rest, value);
    }
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(TomlValue::Table(base_table)), TomlValue::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
