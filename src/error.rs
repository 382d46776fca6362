use thiserror::Error;

/// Errors returned by the properties protocol operations.
#[derive(Error, Debug)]
pub enum PropertiesError {
    /// Requested interface is not in the registry.
    #[error("Unknown interface: {0}")]
    InterfaceNotFound(String),

    /// Requested property is not registered under an otherwise-known
    /// interface. Also covers writes to read-only properties, which are
    /// absent from the setter tables.
    #[error("Unknown property: {0}")]
    PropertyNotFound(String),

    /// An underlying getter, setter or signal emission failed; the original
    /// message is preserved for diagnostics.
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result alias for properties protocol operations.
pub type Result<T> = std::result::Result<T, PropertiesError>;

impl PropertiesError {
    /// Wrap an underlying failure, keeping its message.
    pub fn operation_failed(error: impl std::fmt::Display) -> Self {
        PropertiesError::OperationFailed(error.to_string())
    }
}

impl From<PropertiesError> for zbus::fdo::Error {
    fn from(err: PropertiesError) -> Self {
        match err {
            e @ PropertiesError::InterfaceNotFound(_) => Self::UnknownInterface(e.to_string()),
            e @ PropertiesError::PropertyNotFound(_) => Self::UnknownProperty(e.to_string()),
            e @ PropertiesError::OperationFailed(_) => Self::Failed(e.to_string()),
        }
    }
}

/// Failure signalled by a property getter or setter implementation.
///
/// Opaque to the dispatcher; the message travels unchanged inside
/// [`PropertiesError::OperationFailed`].
#[derive(Error, Debug)]
#[error("{message}")]
pub struct PropertyError {
    message: String,
}

impl PropertyError {
    /// Create a failure carrying `message`.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl From<zbus::zvariant::Error> for PropertyError {
    fn from(error: zbus::zvariant::Error) -> Self {
        Self::new(error)
    }
}
