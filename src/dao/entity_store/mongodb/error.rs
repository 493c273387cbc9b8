use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Result alias for MongoDB-backed storage operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures raised by the MongoDB layer before they are collapsed into the
/// backend-agnostic [`StorageError`](crate::dao::storage::StorageError).
#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to {action} in collection `{collection}`")]
    Operation {
        collection: &'static str,
        action: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to encode a document for collection `{collection}`")]
    Encode {
        collection: &'static str,
        #[source]
        source: mongodb::bson::ser::Error,
    },
}

impl MongoDaoError {
    /// Curried constructor used with `map_err` across the store.
    pub fn operation(
        collection: &'static str,
        action: &'static str,
    ) -> impl FnOnce(MongoError) -> Self {
        move |source| MongoDaoError::Operation {
            collection,
            action,
            source,
        }
    }
}
