//! Name-path dependency injection container.

mod error;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

pub use error::ContainerError;

/// Anything configuration values can be bound into.
///
/// [`ConfigBinder`](crate::ConfigBinder) writes through this trait, so any
/// registry exposing these two operations can receive a configuration.
pub trait BindTarget {
    /// Binds a single primitive value at `path`.
    fn bind_scalar(&mut self, path: &str, value: Value);

    /// Binds a whole sequence or mapping at `path`.
    fn bind_plain_object(&mut self, path: &str, value: Value);
}

/// An object recipe: the names it depends on and the factory that builds it
/// from their resolved values (in the same order).
pub struct Injector<T> {
    dependencies: Vec<String>,
    factory: Arc<dyn Fn(&[Value]) -> T + Send + Sync>,
}

impl<T> Injector<T> {
    pub fn new<I, S, F>(dependencies: I, factory: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[Value]) -> T + Send + Sync + 'static,
    {
        Self {
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            factory: Arc::new(factory),
        }
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

impl<T> Clone for Injector<T> {
    fn clone(&self) -> Self {
        Self {
            dependencies: self.dependencies.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Injector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

enum Binding {
    Scalar(Value),
    PlainObject(Value),
    Object(Box<dyn Any + Send + Sync>),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Binding::PlainObject(v) => f.debug_tuple("PlainObject").field(v).finish(),
            Binding::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// A registry of name paths to values and object factories.
///
/// Values are bound with [`bind_name`](Self::bind_name) and read back with
/// [`resolve`](Self::resolve). Objects are built on demand by
/// [`new_object`](Self::new_object), which resolves the factory's
/// dependencies by name first.
///
/// ## Example
///
/// ```
/// use inject_config::{Container, Injector};
///
/// let mut container = Container::new();
/// let addr: String = container
///     .bind_name("host").to_scalar_value("localhost")
///     .bind_name("port").to_scalar_value(1234i64)
///     .bind_name("addr").to_object(Injector::new(["host", "port"], |deps| {
///         format!("{}:{}", deps[0], deps[1])
///     }))
///     .new_object("addr")?;
///
/// assert_eq!(addr, "localhost:1234");
/// # Ok::<(), inject_config::ContainerError>(())
/// ```
#[derive(Debug, Default)]
pub struct Container {
    bindings: HashMap<String, Binding>,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a binding for `name`. Rebinding a name replaces the old binding.
    pub fn bind_name(&mut self, name: impl Into<String>) -> NameBinding<'_> {
        NameBinding {
            container: self,
            name: name.into(),
        }
    }

    /// Returns the value bound at `name`.
    pub fn resolve(&self, name: &str) -> Result<&Value, ContainerError> {
        match self.bindings.get(name) {
            Some(Binding::Scalar(v) | Binding::PlainObject(v)) => Ok(v),
            Some(Binding::Object(_)) => Err(ContainerError::NotAValue(name.to_string())),
            None => Err(ContainerError::Unbound(name.to_string())),
        }
    }

    /// Builds the object bound at `name`.
    pub fn new_object<T: 'static>(&self, name: &str) -> Result<T, ContainerError> {
        let injector = match self.bindings.get(name) {
            Some(Binding::Object(any)) => any.as_ref().downcast_ref::<Injector<T>>().ok_or_else(|| {
                ContainerError::TypeMismatch {
                    name: name.to_string(),
                    expected: std::any::type_name::<T>(),
                }
            })?,
            Some(_) => return Err(ContainerError::NotAnObject(name.to_string())),
            None => return Err(ContainerError::Unbound(name.to_string())),
        };

        let args = injector
            .dependencies
            .iter()
            .map(|dep| self.resolve(dep).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        Ok((injector.factory)(&args))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn insert(&mut self, name: String, binding: Binding) -> &mut Self {
        if self.bindings.insert(name.clone(), binding).is_some() {
            tracing::trace!(name = %name, "replaced existing binding");
        }
        self
    }
}

impl BindTarget for Container {
    fn bind_scalar(&mut self, path: &str, value: Value) {
        self.bind_name(path).to_scalar_value(value);
    }

    fn bind_plain_object(&mut self, path: &str, value: Value) {
        self.bind_name(path).to_plain_object(value);
    }
}

/// A pending binding for a single name, created by [`Container::bind_name`].
#[must_use = "a name binding does nothing until a value or object is supplied"]
pub struct NameBinding<'a> {
    container: &'a mut Container,
    name: String,
}

impl<'a> NameBinding<'a> {
    pub fn to_scalar_value(self, value: impl Into<Value>) -> &'a mut Container {
        self.container.insert(self.name, Binding::Scalar(value.into()))
    }

    pub fn to_plain_object(self, value: impl Into<Value>) -> &'a mut Container {
        self.container.insert(self.name, Binding::PlainObject(value.into()))
    }

    pub fn to_object<T: 'static>(self, injector: Injector<T>) -> &'a mut Container {
        self.container.insert(self.name, Binding::Object(Box::new(injector)))
    }
}
