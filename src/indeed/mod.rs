mod extractor;

pub use extractor::{extract_cards, parse_card, select_cards, MAX_CARDS};

use crate::{JobBoard, JobCard, SearchConfig};
use scraper::Html;

pub const BASE_URL: &str = "https://au.indeed.com";
pub const SOURCE: &str = "indeed";
pub const RECENCY_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct IndeedBoard {
    base_url: String,
}

impl IndeedBoard {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        IndeedBoard {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for IndeedBoard {
    fn default() -> Self {
        IndeedBoard::new(BASE_URL)
    }
}

impl JobBoard for IndeedBoard {
    fn source(&self) -> &str {
        SOURCE
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/jobs", self.base_url)
    }

    fn search_params(&self, search: &SearchConfig) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", search.title.clone()),
            ("l", search.location.clone()),
            ("sort", "date".to_string()),
            ("fromage", RECENCY_DAYS.to_string()),
        ];
        if let Some(salary_min) = search.salary_min {
            params.push(("salary", format!("${}+", salary_min)));
        }
        params
    }

    fn extract_cards(&self, doc: &Html) -> Vec<JobCard> {
        extract_cards(doc)
    }
}
