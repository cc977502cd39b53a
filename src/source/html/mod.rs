pub mod client;
pub mod extract;
pub mod patterns;
pub mod sites;

use crate::error::FeedError;
use crate::model::MatchRecord;
use crate::source::{Query, SourceAdapter};
use async_trait::async_trait;
pub use client::{PageFetcher, RetryPolicy, RetryingPageFetcher};
use extract::record_from_element;
use patterns::collect_elements;
use scraper::Html;
pub use sites::SiteConfig;
use std::time::Duration;
use tracing::{debug, info};

/// Parse a fetched page into at most the site's per-kind limit of records.
///
/// Kept synchronous: the parsed document must not live across an await.
#[must_use]
pub fn parse_page(body: &str, site: &SiteConfig, query: &Query) -> Vec<MatchRecord> {
    let doc = Html::parse_document(body);
    let elements = collect_elements(&doc, site.patterns, site.enough);
    debug!(site = site.name, elements = elements.len(), "collected match containers");

    elements
        .into_iter()
        .filter_map(|el| record_from_element(el, site, query))
        .take(site.limit_for(query.kind))
        .collect()
}

/// A scraped site driven by its [`SiteConfig`].
pub struct HtmlAdapter<F: PageFetcher> {
    site: SiteConfig,
    fetcher: F,
}

impl<F: PageFetcher> HtmlAdapter<F> {
    pub fn new(site: SiteConfig, fetcher: F) -> Self {
        Self { site, fetcher }
    }
}

#[async_trait]
impl<F: PageFetcher> SourceAdapter for HtmlAdapter<F> {
    fn name(&self) -> &str {
        self.site.name
    }

    fn budget(&self, adapter_timeout: Duration) -> Duration {
        self.fetcher
            .worst_case()
            .map_or(adapter_timeout, |worst| adapter_timeout.max(worst))
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<MatchRecord>, FeedError> {
        let url = self.site.url_for(query.kind).ok_or_else(|| {
            FeedError::SourceUnavailable(format!("{} has no page for {}", self.site.name, query.kind))
        })?;

        let body = self.fetcher.get_page(url).await?;
        let records = parse_page(&body, &self.site, query);
        info!(site = self.site.name, %url, records = records.len(), "scraped page");
        Ok(records)
    }
}
