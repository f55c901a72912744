use crate::{ExtractionError, JobCard};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

pub const MAX_CARDS: usize = 20;

const E: &str = "Invalid selector";

fn selectors(raw: &[&str]) -> Vec<Selector> {
    raw.iter().map(|s| Selector::parse(s).expect(E)).collect()
}

lazy_static! {
    // One entry per markup generation Indeed has served, newest first.
    static ref CARDS: Vec<Selector> = selectors(&[
        "div.job_seen_beacon",
        "div.jobsearch-SerpJobCard",
        r#"div[data-testid="job-card"]"#,
    ]);
    static ref TITLE: Vec<Selector> = selectors(&[
        "h2.jobTitle",
        r#"a[data-testid="job-title"]"#,
        "span[title]",
    ]);
    static ref LINK: Vec<Selector> = selectors(&[
        r#"a[data-testid="job-title"]"#,
        "a.jcs-JobTitle",
    ]);
    static ref COMPANY: Vec<Selector> = selectors(&[
        r#"span[data-testid="company-name"]"#,
        "span.companyName",
        "div.companyName",
    ]);
    static ref LOCATION: Vec<Selector> = selectors(&[
        r#"div[data-testid="job-location"]"#,
        "span.locationsContainer",
        "div.companyLocation",
    ]);
    static ref SALARY: Vec<Selector> = selectors(&["div.salary-snippet", "span.salary-snippet"]);
    static ref DESCRIPTION: Vec<Selector> = selectors(&["div.job-snippet", "div.summary"]);
}

fn text_of(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn first_match<'a>(card: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|s| card.select(s).next())
}

fn first_text(card: ElementRef, selectors: &[Selector]) -> Option<String> {
    first_match(card, selectors).map(text_of)
}

pub fn select_cards(doc: &Html) -> Vec<ElementRef<'_>> {
    for (i, selector) in CARDS.iter().enumerate() {
        let cards: Vec<_> = doc.select(selector).collect();
        if !cards.is_empty() {
            debug!("Card layout #{} matched {} cards", i, cards.len());
            return cards;
        }
    }
    vec![]
}

pub fn parse_card(card: ElementRef) -> Result<JobCard, ExtractionError> {
    let title = first_text(card, &TITLE)
        .filter(|t| !t.is_empty())
        .ok_or(ExtractionError::MissingTitle)?;

    let link = first_match(card, &LINK)
        .and_then(|a| a.value().attr("href"))
        .map(ToString::to_string);

    Ok(JobCard {
        title,
        link,
        company: first_text(card, &COMPANY),
        location: first_text(card, &LOCATION),
        salary_text: first_text(card, &SALARY),
        description: first_text(card, &DESCRIPTION),
    })
}

pub fn extract_cards(doc: &Html) -> Vec<JobCard> {
    select_cards(doc)
        .into_iter()
        .take(MAX_CARDS)
        .enumerate()
        .filter_map(|(i, card)| match parse_card(card) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!("Skip card #{}: {}", i, e);
                None
            }
        })
        .collect()
}
