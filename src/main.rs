use indeed_job_scraper::config::{self, default_searches};
use indeed_job_scraper::indeed::IndeedBoard;
use indeed_job_scraper::{init_logging, run_scraper, store, Config, Fetcher};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let store = store::connect(&config).await?;
    let fetcher = Fetcher::new()?;
    let board = IndeedBoard::default();
    let searches = default_searches();

    info!("Running {} searches", searches.len());
    let saved = run_scraper(
        &board,
        &fetcher,
        &*store,
        &searches,
        config::REQUEST_DELAY,
        config::RETENTION_DAYS,
    )
    .await;
    info!("Scrape finished, {} new jobs", saved);

    Ok(())
}
