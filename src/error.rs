#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Job card has no title")]
    MissingTitle,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::error::Error),
    #[error("Store request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Store responded {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(&'static str),
}
