//! Binding a configuration tree into a container under dotted name paths.

mod options;

use crate::config::ConfigSource;
use crate::container::BindTarget;
use crate::value::{Number, Value};
use crate::Error;

pub use options::{BinderOptions, TypeHint};

/// Walks a configuration tree and binds every value it reaches.
///
/// The bind root is resolved once, when the binder is created. Each call to
/// [`bind`](Self::bind) then performs one depth-first pass over it:
///
/// - strings, numbers and booleans are bound as scalar values;
/// - sequences are bound whole, as plain objects;
/// - mappings are descended into, and with
///   [`objects`](BinderOptions::objects) also bound whole at their own path;
/// - nulls are skipped.
///
/// A child key `k` under path `p` is bound at `p.k`, or just `k` when `p` is
/// empty. The first path is [`prefix`](BinderOptions::prefix).
///
/// The root itself is always walked like a mapping: a sequence root binds
/// its elements by index, a string root its characters. Falsy roots (null,
/// `false`, zero, NaN, `""`) bind nothing.
///
/// ## Example
///
/// ```
/// use inject_config::{BinderOptions, ConfigBinder, Container, Value};
///
/// let tree = Value::from(toml::from_str::<toml::Table>(r#"
///     [app.db]
///     host = "localhost"
///     port = 1234
/// "#)?);
///
/// let binder = ConfigBinder::new(&tree, BinderOptions::new().root("app").prefix("cfg"))?;
/// let bound = binder.bind(Some(Container::new()));
///
/// assert_eq!(bound.container.resolve("cfg.db.port")?.as_i64(), Some(1234));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBinder {
    root: Value,
    options: BinderOptions,
}

/// The result of a binding pass.
#[derive(Debug)]
#[must_use]
pub struct Bound<C> {
    /// The container that received the bindings.
    pub container: C,
    /// One line per binding, in binding order, when logging is enabled.
    pub logs: Option<Vec<String>>,
}

impl ConfigBinder {
    /// Resolves the bind root from `source`.
    ///
    /// Fails with [`Error::RootNotFound`] when a non-empty
    /// [`root`](BinderOptions::root) is absent from the source.
    pub fn new<S>(source: &S, options: BinderOptions) -> Result<Self, Error>
    where
        S: ConfigSource + ?Sized,
    {
        let root = if options.root.is_empty() {
            source.all()
        } else if source.has(&options.root) {
            source
                .get(&options.root)
                .ok_or_else(|| Error::RootNotFound(options.root.clone()))?
        } else {
            return Err(Error::RootNotFound(options.root.clone()));
        };

        Ok(Self { root, options })
    }

    /// The resolved bind root.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Binds into `container`, or into a fresh `C::default()` when `None`.
    pub fn bind<C>(&self, container: Option<C>) -> Bound<C>
    where
        C: BindTarget + Default,
    {
        let mut container = container.unwrap_or_default();
        let logs = self.bind_into(&mut container);
        Bound { container, logs }
    }

    /// Binds into a borrowed container, returning the log when enabled.
    pub fn bind_into<C>(&self, container: &mut C) -> Option<Vec<String>>
    where
        C: BindTarget + ?Sized,
    {
        let prefix = self.options.prefix.as_str();
        let mut pass = Pass {
            options: &self.options,
            target: container,
            logs: self.options.log.then(Vec::new),
            count: 0,
        };

        if is_truthy(&self.root) {
            pass.bind_object(&self.root, prefix);
        } else {
            tracing::debug!(root = %self.options.root, "configuration root is empty, nothing bound");
        }

        tracing::info!(
            root = %self.options.root,
            prefix = %prefix,
            bindings = pass.count,
            "bound configuration"
        );
        pass.logs
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Boolean(b) => *b,
        Value::Number(Number::Integer(i)) => *i != 0,
        Value::Number(Number::Float(x)) => *x != 0.0 && !x.is_nan(),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
    }
}

/// Builds the name path of `key` under `parent`.
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

struct Pass<'a, C: ?Sized> {
    options: &'a BinderOptions,
    target: &'a mut C,
    logs: Option<Vec<String>>,
    count: usize,
}

impl<C: BindTarget + ?Sized> Pass<'_, C> {
    fn dispatch(&mut self, value: &Value, path: &str) {
        match value {
            Value::String(_) => self.bind_scalar(value, path, "string"),
            Value::Number(_) => self.bind_scalar(value, path, "number"),
            Value::Boolean(_) => self.bind_scalar(value, path, "boolean"),
            Value::Sequence(_) => {
                let label = TypeHint::sequence_label(self.options.type_hints.get(path));
                self.bind_plain_object(value, path, label);
            }
            Value::Mapping(_) => self.bind_object(value, path),
            Value::Null => {}
        }
    }

    /// Binds `value` whole when `objects` is set, then each of its own keys.
    fn bind_object(&mut self, value: &Value, path: &str) {
        if self.options.objects {
            self.bind_plain_object(value, path, "Object");
        }
        match value {
            Value::Mapping(mapping) => {
                for (key, child) in mapping.iter() {
                    self.dispatch(child, &child_path(path, key));
                }
            }
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.dispatch(item, &child_path(path, &index.to_string()));
                }
            }
            Value::String(s) => {
                for (index, ch) in s.chars().enumerate() {
                    self.dispatch(&Value::String(ch.to_string()), &child_path(path, &index.to_string()));
                }
            }
            Value::Null | Value::Boolean(_) | Value::Number(_) => {}
        }
    }

    fn bind_scalar(&mut self, value: &Value, path: &str, label: &str) {
        self.record(value, path, label);
        self.target.bind_scalar(path, value.clone());
    }

    fn bind_plain_object(&mut self, value: &Value, path: &str, label: &str) {
        self.record(value, path, label);
        self.target.bind_plain_object(path, value.clone());
    }

    fn record(&mut self, value: &Value, path: &str, label: &str) {
        tracing::debug!(path, kind = label, "binding configuration value");
        self.count += 1;
        if let Some(logs) = self.logs.as_mut() {
            logs.push(format!("Binding {path} to {label} {value}"));
        }
    }
}
