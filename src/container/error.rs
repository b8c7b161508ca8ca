use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("no binding for name: {0}")]
    Unbound(String),

    #[error("name is bound to an object factory, not a value: {0}")]
    NotAValue(String),

    #[error("name is bound to a value, not an object factory: {0}")]
    NotAnObject(String),

    #[error("object factory for '{name}' does not produce {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}
