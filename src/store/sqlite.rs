use crate::{utils, JobRecord, JobStore, PersistenceError, Table};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub struct JobListingTable {
    name: String,
    pool: SqlitePool,
}

#[async_trait::async_trait]
impl Table for JobListingTable {
    type Record<'a> = &'a JobRecord;

    fn get_name(&self) -> &str {
        self.name.as_str()
    }

    fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create(&self) -> Result<(), sqlx::Error> {
        if utils::is_table_exists(self.get_pool(), &self.name).await? {
            tracing::debug!("Use table {}", self.name);
        } else {
            tracing::debug!("Create table {}", self.name);
            let query = format!(
                r#"
                        CREATE TABLE {} (
                            id INTEGER PRIMARY KEY AUTOINCREMENT,
                            job_url TEXT NOT NULL UNIQUE,
                            title TEXT NOT NULL,
                            company TEXT,
                            location TEXT,
                            salary_min INTEGER,
                            salary_max INTEGER,
                            salary_text TEXT,
                            description TEXT,
                            skills TEXT,
                            source TEXT,
                            posted_date TEXT,
                            is_active BOOLEAN NOT NULL DEFAULT 1,
                            scraped_at TEXT
                        )
                    "#,
                &self.name
            );
            sqlx::query(query.as_str()).execute(self.get_pool()).await?;
        }
        Ok(())
    }

    async fn insert<'a>(&self, record: Self::Record<'a>) -> Result<u64, sqlx::Error> {
        let query = format!(
            r#"INSERT INTO {} (
                job_url,
                title,
                company,
                location,
                salary_min,
                salary_max,
                salary_text,
                description,
                skills,
                source,
                posted_date,
                scraped_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            self.name
        );
        let posted_date = utils::format_timestamp(record.posted_date);
        let result = sqlx::query(&query)
            .bind(record.job_url.trim())
            .bind(&record.title)
            .bind(&record.company)
            .bind(&record.location)
            .bind(record.salary_min)
            .bind(record.salary_max)
            .bind(&record.salary_text)
            .bind(&record.description)
            .bind(record.skills.iter().join("|"))
            .bind(&record.source)
            .bind(&posted_date)
            .bind(&posted_date)
            .execute(self.get_pool())
            .await?;
        Ok(result.rows_affected())
    }
}

pub struct SqliteStore {
    pub listings: JobListingTable,
}

impl SqliteStore {
    pub async fn connect(url: &str) -> Result<SqliteStore, PersistenceError> {
        let opt = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A single connection keeps `sqlite::memory:` databases alive and
        // shared for the lifetime of the pool.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await?;

        let store = SqliteStore {
            listings: JobListingTable {
                name: "job_listings".to_string(),
                pool,
            },
        };

        store.listings.create().await?;

        Ok(store)
    }
}

#[async_trait::async_trait]
impl JobStore for SqliteStore {
    async fn exists(&self, job_url: &str) -> Result<bool, PersistenceError> {
        Ok(self.listings.is_exist(job_url.trim()).await?)
    }

    async fn insert(&self, record: &JobRecord) -> Result<bool, PersistenceError> {
        Ok(self.listings.insert(record).await? == 1)
    }

    async fn refresh(&self, job_url: &str, now: DateTime<Utc>) -> Result<(), PersistenceError> {
        let query = format!(
            "UPDATE {} SET scraped_at = ? WHERE job_url = ?",
            self.listings.get_name()
        );
        sqlx::query(&query)
            .bind(utils::format_timestamp(now))
            .bind(job_url.trim())
            .execute(self.listings.get_pool())
            .await?;
        Ok(())
    }

    async fn deactivate_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, PersistenceError> {
        let query = format!(
            "UPDATE {} SET is_active = 0 WHERE scraped_at < ? AND is_active = 1",
            self.listings.get_name()
        );
        let result = sqlx::query(&query)
            .bind(utils::format_timestamp(cutoff))
            .execute(self.listings.get_pool())
            .await?;
        Ok(result.rows_affected())
    }
}
