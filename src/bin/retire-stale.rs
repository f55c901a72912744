use chrono::Utc;
use clap::Parser;
use indeed_job_scraper::{clean_old_jobs, config, init_logging, store, Config};
use tracing::error;

/// Marks stored listings that have not been seen recently as inactive.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Retention window in days
    #[arg(
        long,
        default_value_t = config::RETENTION_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    days: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let store = store::connect(&config).await?;
    if clean_old_jobs(&*store, args.days, Utc::now()).await.is_none() {
        std::process::exit(1);
    }

    Ok(())
}
