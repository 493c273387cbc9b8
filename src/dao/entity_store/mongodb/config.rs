use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Parsed connection settings for the MongoDB backend.
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
}

impl MongoConfig {
    /// Parse a connection URI and pair it with the database name.
    pub async fn from_uri(uri: &str, db_name: &str) -> MongoResult<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|source| MongoDaoError::InvalidUri {
                uri: uri.to_owned(),
                source,
            })?;

        Ok(Self {
            options,
            database_name: db_name.to_owned(),
        })
    }
}
