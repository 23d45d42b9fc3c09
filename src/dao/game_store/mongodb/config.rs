use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};

/// Database used when `MONGO_DB` is not provided.
pub const DEFAULT_DATABASE: &str = "poke_simon";

/// Parsed MongoDB connection settings.
#[derive(Clone)]
pub struct MongoConfig {
    pub options: ClientOptions,
    pub database_name: String,
}

impl MongoConfig {
    /// Parse `uri` and pick the target database, falling back to [`DEFAULT_DATABASE`].
    pub async fn from_uri(uri: &str, db_name: Option<&str>) -> MongoResult<Self> {
        let database_name = db_name.unwrap_or(DEFAULT_DATABASE).to_owned();
        let options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;

        Ok(Self {
            options,
            database_name,
        })
    }
}
