#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("namespace `{namespace}` has no method `{name}`")]
    UnknownMethod { namespace: String, name: String },
    #[error("namespace `{namespace}` already has a method `{name}`")]
    DuplicateMethod { namespace: String, name: String },
    #[error("method name `{0}` is reserved")]
    ReservedName(String),
    #[error("method name must not be empty")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, Error>;
