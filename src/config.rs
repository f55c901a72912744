use crate::ConfigError;
use std::env;
use std::time::Duration;

pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_KEY";

pub const REQUEST_DELAY: Duration = Duration::from_secs(5);
pub const RETENTION_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_url: String,
    pub service_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |key| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Config {
            store_url: required(STORE_URL_VAR)?,
            service_key: required(SERVICE_KEY_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub title: String,
    pub location: String,
    pub salary_min: Option<u32>,
}

impl SearchConfig {
    pub fn new(title: &str, location: &str, salary_min: Option<u32>) -> Self {
        SearchConfig {
            title: title.to_string(),
            location: location.to_string(),
            salary_min,
        }
    }
}

pub fn default_searches() -> Vec<SearchConfig> {
    vec![
        SearchConfig::new("Software Engineer", "Brisbane", Some(80000)),
        SearchConfig::new("Frontend Developer", "Brisbane", Some(70000)),
        SearchConfig::new("Full Stack Developer", "Brisbane", Some(75000)),
        SearchConfig::new("React Developer", "Brisbane", Some(70000)),
    ]
}
