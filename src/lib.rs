use chrono::{DateTime, Duration as ChronoDuration, Utc};
use scraper::Html;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

pub mod config;
pub mod indeed;
pub mod normalize;
pub mod store;

mod data;
mod error;
mod fetcher;
mod record;
mod utils;

pub use config::{Config, SearchConfig};
pub use data::Table;
pub use error::{ConfigError, ExtractionError, FetchError, PersistenceError};
pub use fetcher::Fetcher;
pub use record::{JobCard, JobRecord};
pub use utils::{format_timestamp, init_logging};

pub trait JobBoard {
    fn source(&self) -> &str;
    fn base_url(&self) -> &str;
    fn search_url(&self) -> String;
    fn search_params(&self, search: &SearchConfig) -> Vec<(&'static str, String)>;
    fn extract_cards(&self, doc: &Html) -> Vec<JobCard>;
}

#[async_trait::async_trait]
pub trait JobStore {
    async fn exists(&self, job_url: &str) -> Result<bool, PersistenceError>;
    async fn insert(&self, record: &JobRecord) -> Result<bool, PersistenceError>;
    async fn refresh(&self, job_url: &str, now: DateTime<Utc>) -> Result<(), PersistenceError>;
    // Returns how many rows were flagged, not counting already inactive ones.
    async fn deactivate_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, PersistenceError>;
}

pub async fn scrape_search<B: JobBoard>(
    board: &B,
    fetcher: &Fetcher,
    search: &SearchConfig,
    now: DateTime<Utc>,
) -> Result<Vec<JobRecord>, FetchError> {
    let html = fetcher
        .fetch(&board.search_url(), &board.search_params(search))
        .await?;

    let cards = {
        let doc = Html::parse_document(&html);
        board.extract_cards(&doc)
    };
    info!("Parsed {} jobs for {:?}", cards.len(), search.title);

    Ok(cards
        .into_iter()
        .map(|card| JobRecord::assemble(card, board.source(), board.base_url(), now))
        .collect())
}

pub async fn save_jobs<S: JobStore + ?Sized>(
    store: &S,
    jobs: &[JobRecord],
    now: DateTime<Utc>,
) -> u32 {
    let mut saved = 0;

    for job in jobs {
        match store.exists(&job.job_url).await {
            Ok(false) => match store.insert(job).await {
                Ok(true) => {
                    saved += 1;
                    info!("[{}] Saved {} at {}", saved, job.title, job.company);
                    debug!("\n{}", job);
                }
                Ok(false) => warn!("Store returned no row for {}", job.job_url),
                Err(e) => error!("Failed to save {}: {}", job.job_url, e),
            },
            Ok(true) => match store.refresh(&job.job_url, now).await {
                Ok(()) => debug!("Refreshed {}", job.job_url),
                Err(e) => error!("Failed to refresh {}: {}", job.job_url, e),
            },
            Err(e) => error!("Failed to look up {}: {}", job.job_url, e),
        }
    }

    saved
}

pub async fn clean_old_jobs<S: JobStore + ?Sized>(
    store: &S,
    days: u32,
    now: DateTime<Utc>,
) -> Option<u64> {
    let cutoff = match now.checked_sub_signed(ChronoDuration::days(i64::from(days))) {
        Some(cutoff) => cutoff,
        None => {
            error!("Retention window of {} days is out of range", days);
            return None;
        }
    };
    match store.deactivate_older_than(cutoff).await {
        Ok(n) => {
            info!("Marked {} jobs older than {} days inactive", n, days);
            Some(n)
        }
        Err(e) => {
            error!("Failed to clean old jobs: {}", e);
            None
        }
    }
}

pub async fn run_scraper<B, S>(
    board: &B,
    fetcher: &Fetcher,
    store: &S,
    searches: &[SearchConfig],
    delay: Duration,
    retention_days: u32,
) -> u32
where
    B: JobBoard,
    S: JobStore + ?Sized,
{
    let mut total_saved = 0;

    for (i, search) in searches.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        info!("Search {:?}", search);
        let now = Utc::now();
        match scrape_search(board, fetcher, search, now).await {
            Ok(jobs) if !jobs.is_empty() => {
                total_saved += save_jobs(store, &jobs, now).await;
            }
            Ok(_) => info!("No jobs for {:?}", search.title),
            Err(e) => error!("Search {:?} failed: {}", search.title, e),
        }
    }

    clean_old_jobs(store, retention_days, Utc::now()).await;

    info!("Done, {} new jobs saved", total_saved);
    total_saved
}
