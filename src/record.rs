use crate::normalize::{extract_skills, parse_salary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const UNKNOWN: &str = "Unknown";
pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCard {
    pub title: String,
    pub link: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_text: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_text: Option<String>,
    pub description: String,
    pub job_url: String,
    pub skills: Vec<String>,
    pub source: String,
    #[serde(serialize_with = "crate::utils::serialize_timestamp")]
    pub posted_date: DateTime<Utc>,
}

impl JobRecord {
    // A card without a link gets a search URL for its title so it still has a
    // stable key.
    pub fn assemble(card: JobCard, source: &str, base_url: &str, now: DateTime<Utc>) -> Self {
        let description = card.description.unwrap_or_default();
        let skills = extract_skills(&format!("{} {}", card.title, description));
        let (salary_min, salary_max) = parse_salary(card.salary_text.as_deref());

        let base_url = base_url.trim_end_matches('/');
        let job_url = match card.link.as_deref().map(str::trim) {
            Some(link) if link.starts_with("http://") || link.starts_with("https://") => {
                link.to_string()
            }
            Some(link) if !link.is_empty() => format!("{}{}", base_url, link),
            _ => search_url(base_url, &card.title),
        };

        JobRecord {
            company: card.company.unwrap_or_else(|| UNKNOWN.to_string()),
            location: card.location.unwrap_or_else(|| UNKNOWN.to_string()),
            salary_min,
            salary_max,
            salary_text: card.salary_text,
            description: description.chars().take(MAX_DESCRIPTION_CHARS).collect(),
            job_url,
            skills,
            source: source.to_string(),
            posted_date: now,
            title: card.title,
        }
    }
}

fn search_url(base_url: &str, title: &str) -> String {
    let url = format!("{}/jobs", base_url);
    match reqwest::Url::parse_with_params(&url, &[("q", title)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}?q={}", url, title),
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title           : {}", self.title)?;
        writeln!(f, "Company         : {}", self.company)?;
        writeln!(f, "Location        : {}", self.location)?;
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) => writeln!(f, "Salary          : {} - {}", min, max)?,
            (Some(min), None) => writeln!(f, "Salary          : {}", min)?,
            _ => writeln!(f, "Salary          : None")?,
        };
        writeln!(f, "Skills          : {}", self.skills.join(", "))?;
        writeln!(f, "URL             : {}", self.job_url)?;
        writeln!(f, "Posted          : {}", self.posted_date)?;
        Ok(())
    }
}
