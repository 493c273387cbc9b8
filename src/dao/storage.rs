use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error surfaced by a storage backend, whatever database sits behind it.
///
/// Backends keep their own detailed error types; by the time a failure
/// crosses the [`EntityStore`](crate::dao::entity_store::EntityStore)
/// boundary it collapses into this opaque form and the services treat it
/// uniformly as an internal fault.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend failed: {message}")]
    Backend {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wrap a backend failure, keeping it as the error source for logs.
    pub fn backend(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Backend {
            message: message.into(),
            source: Box::new(source),
        }
    }
}
