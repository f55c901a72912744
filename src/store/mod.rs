mod sqlite;
mod supabase;

pub use sqlite::{JobListingTable, SqliteStore};
pub use supabase::SupabaseStore;

use crate::{Config, JobStore, PersistenceError};
use tracing::info;

pub async fn connect(config: &Config) -> Result<Box<dyn JobStore + Send + Sync>, PersistenceError> {
    if config.store_url.starts_with("sqlite:") {
        info!("Using SQLite store {}", config.store_url);
        Ok(Box::new(SqliteStore::connect(&config.store_url).await?))
    } else {
        info!("Using Supabase store {}", config.store_url);
        Ok(Box::new(SupabaseStore::new(
            &config.store_url,
            &config.service_key,
        )?))
    }
}
