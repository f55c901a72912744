use crate::{utils, JobRecord, JobStore, PersistenceError};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde_json::json;
use std::time::Duration;

const TABLE: &str = "job_listings";

#[derive(Debug, Clone)]
pub struct SupabaseStore {
    table_url: String,
    client: Client,
}

impl SupabaseStore {
    pub fn new(store_url: &str, service_key: &str) -> Result<Self, PersistenceError> {
        let mut headers = HeaderMap::new();
        let invalid = |_| PersistenceError::InvalidConfig("service key is not a valid header value");
        headers.insert("apikey", HeaderValue::from_str(service_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", service_key)).map_err(invalid)?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(SupabaseStore {
            table_url: format!("{}/rest/v1/{}", store_url.trim_end_matches('/'), TABLE),
            client,
        })
    }

    async fn rows(response: Response) -> Result<Vec<serde_json::Value>, PersistenceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Status { status, body });
        }
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl JobStore for SupabaseStore {
    async fn exists(&self, job_url: &str) -> Result<bool, PersistenceError> {
        let response = self
            .client
            .get(&self.table_url)
            .query(&[("select", "id".to_string()), ("job_url", format!("eq.{}", job_url))])
            .send()
            .await?;
        Ok(!Self::rows(response).await?.is_empty())
    }

    async fn insert(&self, record: &JobRecord) -> Result<bool, PersistenceError> {
        let response = self
            .client
            .post(&self.table_url)
            .query(&[("select", "id")])
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;
        Ok(!Self::rows(response).await?.is_empty())
    }

    async fn refresh(&self, job_url: &str, now: DateTime<Utc>) -> Result<(), PersistenceError> {
        let response = self
            .client
            .patch(&self.table_url)
            .query(&[("job_url", format!("eq.{}", job_url))])
            .header("Prefer", "return=minimal")
            .json(&json!({ "scraped_at": utils::format_timestamp(now) }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::Status { status, body });
        }
        Ok(())
    }

    async fn deactivate_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, PersistenceError> {
        let response = self
            .client
            .patch(&self.table_url)
            .query(&[
                ("select", "id".to_string()),
                ("scraped_at", format!("lt.{}", utils::format_timestamp(cutoff))),
                ("is_active", "eq.true".to_string()),
            ])
            .header("Prefer", "return=representation")
            .json(&json!({ "is_active": false }))
            .send()
            .await?;
        Ok(Self::rows(response).await?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JobCard;
    use chrono::TimeZone;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "service-key";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn record() -> JobRecord {
        JobRecord::assemble(
            JobCard {
                title: "Software Engineer".to_string(),
                link: Some("/rc/clk?jk=1".to_string()),
                ..Default::default()
            },
            "indeed",
            "https://au.indeed.com",
            now(),
        )
    }

    #[tokio::test]
    async fn exists_filters_on_job_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/job_listings"))
            .and(query_param("job_url", "eq.https://au.indeed.com/rc/clk?jk=1"))
            .and(header("apikey", KEY))
            .and(header("authorization", "Bearer service-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 7 }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/job_listings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), KEY).unwrap();
        assert!(store.exists("https://au.indeed.com/rc/clk?jk=1").await.unwrap());
        assert!(!store.exists("https://au.indeed.com/rc/clk?jk=2").await.unwrap());
    }

    #[tokio::test]
    async fn insert_posts_record() {
        let server = MockServer::start().await;
        let r = record();
        Mock::given(method("POST"))
            .and(path("/rest/v1/job_listings"))
            .and(header("prefer", "return=representation"))
            .and(body_json(&r))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), KEY).unwrap();
        assert!(store.insert(&r).await.unwrap());
    }

    #[tokio::test]
    async fn refresh_patches_scraped_at() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/job_listings"))
            .and(query_param("job_url", "eq.https://au.indeed.com/rc/clk?jk=1"))
            .and(body_json(json!({ "scraped_at": "2024-05-01T10:00:00.000Z" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), KEY).unwrap();
        store
            .refresh("https://au.indeed.com/rc/clk?jk=1", now())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deactivate_counts_flagged_rows() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/job_listings"))
            .and(query_param("scraped_at", "lt.2024-05-01T10:00:00.000Z"))
            .and(body_json(json!({ "is_active": false })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }, { "id": 2 }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), KEY).unwrap();
        assert_eq!(store.deactivate_older_than(now()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), KEY).unwrap();
        match store.exists("https://au.indeed.com/rc/clk?jk=1").await {
            Err(PersistenceError::Status { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(body, "Invalid API key");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
