pub mod processing;

use crate::error::FeedError;
use crate::model::MatchRecord;
use crate::source::{Query, SourceAdapter};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use processing::process_events_json;
use reqwest::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_API_BASE_URL: &str = "https://tennisapi1.p.rapidapi.com/api/tennis";
pub const DEFAULT_API_HOST: &str = "tennisapi1.p.rapidapi.com";
const API_USER_AGENT: &str = "rusty-tennis/0.1";

/// Transport for the date-keyed events endpoint. The adapter only ever sees
/// a parsed JSON document, so tests can swap the network out.
#[async_trait]
pub trait EventsClient: Send + Sync {
    async fn get_events(&self, date: NaiveDate) -> Result<Value, FeedError>;
}

#[async_trait]
impl<T: EventsClient + ?Sized> EventsClient for Arc<T> {
    async fn get_events(&self, date: NaiveDate) -> Result<Value, FeedError> {
        (**self).get_events(date).await
    }
}

#[derive(Clone)]
pub struct ApiCredentials {
    pub host: String,
    pub key: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("host", &self.host)
            .field("key", &"<redacted>")
            .finish()
    }
}

pub struct HttpEventsClient {
    client: Client,
    base_url: String,
}

impl HttpEventsClient {
    /// # Errors
    ///
    /// Will return `Err` if the credentials are not valid header values or the
    /// HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        credentials: Option<&ApiCredentials>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        Self::with_builder(Client::builder(), base_url, credentials, timeout)
    }

    /// Like [`HttpEventsClient::new`], starting from a caller's builder.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the credentials are not valid header values or the
    /// HTTP client cannot be built.
    pub fn with_builder(
        builder: ClientBuilder,
        base_url: &str,
        credentials: Option<&ApiCredentials>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(API_USER_AGENT));
        if let Some(creds) = credentials {
            headers.insert(
                HeaderName::from_static("x-rapidapi-host"),
                HeaderValue::from_str(&creds.host)
                    .map_err(|e| FeedError::Config(format!("api host header: {e}")))?,
            );
            let mut key = HeaderValue::from_str(&creds.key)
                .map_err(|e| FeedError::Config(format!("api key header: {e}")))?;
            key.set_sensitive(true);
            headers.insert(HeaderName::from_static("x-rapidapi-key"), key);
        }

        let client = builder
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Config(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn events_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/events/{}/{}/{}",
            self.base_url,
            date.day(),
            date.month(),
            date.year()
        )
    }
}

#[async_trait]
impl EventsClient for HttpEventsClient {
    async fn get_events(&self, date: NaiveDate) -> Result<Value, FeedError> {
        let url = self.events_url(date);
        debug!(%url, "requesting events");
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Err(FeedError::SourceParse(format!("empty body from {url}")));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// The structured JSON sports API. Primary source for every query kind and
/// the one the orchestrator sweeps across neighbouring days.
pub struct StructuredApiAdapter<C: EventsClient> {
    name: String,
    client: C,
}

impl<C: EventsClient> StructuredApiAdapter<C> {
    pub fn new(name: impl Into<String>, client: C) -> Self {
        Self {
            name: name.into(),
            client,
        }
    }
}

#[async_trait]
impl<C: EventsClient> SourceAdapter for StructuredApiAdapter<C> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<MatchRecord>, FeedError> {
        let json = self.client.get_events(query.date).await?;
        let records = process_events_json(&json, query.kind, query.now, &self.name)?;
        info!(
            source = %self.name,
            date = %query.date,
            records = records.len(),
            "parsed events"
        );
        Ok(records)
    }
}
