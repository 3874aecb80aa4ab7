use mongodb::{Client, Database};

use crate::config::AppConfig;
use crate::errors::Result;

pub const USERS: &str = "users";
pub const POSTS: &str = "posts";
pub const COMMENTS: &str = "comments";

pub async fn get_db_client(config: &AppConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.database_url).await?;
    let db = client.database(&config.database_name);

    // Verify database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!(database = %config.database_name, ?collections, "connected to MongoDB");

            for expected in [USERS, POSTS, COMMENTS] {
                if !collections.iter().any(|c| c == expected) {
                    tracing::warn!(collection = expected, "collection not found in database");
                }
            }
        }
        Err(e) => {
            tracing::error!(database = %config.database_name, error = %e, "database may not exist or is inaccessible");
            return Err(e.into());
        }
    }

    Ok(db)
}
