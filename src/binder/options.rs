use std::collections::HashMap;

use serde::Deserialize;

/// Element type hint for a sequence value, used only in log lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TypeHint {
    String,
    Number,
    Other(String),
}

impl TypeHint {
    pub(crate) fn sequence_label(hint: Option<&TypeHint>) -> &'static str {
        match hint {
            Some(TypeHint::String) => "string[]",
            Some(TypeHint::Number) => "number[]",
            Some(TypeHint::Other(_)) | None => "any[]",
        }
    }
}

impl From<String> for TypeHint {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => TypeHint::String,
            "number" => TypeHint::Number,
            _ => TypeHint::Other(name),
        }
    }
}

impl From<&str> for TypeHint {
    fn from(name: &str) -> Self {
        TypeHint::from(name.to_string())
    }
}

/// Options controlling a [`ConfigBinder`](super::ConfigBinder) pass.
///
/// Every field is optional when deserialized:
///
/// ```toml
/// [binder]
/// root = "app"
/// prefix = "cfg"
/// log = true
/// objects = false
///
/// [binder.type_hints]
/// "cfg.db.seeds" = "string"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderOptions {
    /// Sub-namespace of the source to bind; empty binds the whole source.
    pub root: String,
    /// Starting name path for every binding.
    pub prefix: String,
    /// Per-path element type hints for sequence log lines.
    #[serde(alias = "typeHints")]
    pub type_hints: HashMap<String, TypeHint>,
    /// Record a log line for every binding.
    pub log: bool,
    /// Also bind each mapping as a whole at its own path.
    pub objects: bool,
}

impl BinderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn type_hint(mut self, path: impl Into<String>, hint: impl Into<TypeHint>) -> Self {
        self.type_hints.insert(path.into(), hint.into());
        self
    }

    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn objects(mut self, objects: bool) -> Self {
        self.objects = objects;
        self
    }
}
