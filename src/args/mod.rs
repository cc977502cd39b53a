use crate::error::FeedError;
use crate::orchestrator::{Orchestrator, SourceLists};
use crate::source::SourceAdapter;
use crate::source::api::{ApiCredentials, HttpEventsClient, StructuredApiAdapter};
use crate::source::html::{HtmlAdapter, RetryPolicy, RetryingPageFetcher, SiteConfig, sites};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub mod types;
pub mod validation;

pub use types::{Args, FeedConfig, QueryArg};

pub const API_SOURCE_NAME: &str = "api";
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// # Errors
///
/// Will return `Err` if the arguments are inconsistent
pub fn args_checks() -> Result<FeedConfig, FeedError> {
    let args = Args::parse();
    args.validate().map_err(FeedError::Config)?;
    Ok(FeedConfig::new(args))
}

impl Args {
    /// Checks that need more than one flag at a time.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `--query date` has no `--date`, or a date is given
    /// for another query kind
    pub fn validate(&self) -> Result<(), String> {
        match (self.query, self.date) {
            (QueryArg::Date, None) => Err("--query date needs --date DD/MM/YYYY".to_string()),
            (QueryArg::Live | QueryArg::Upcoming, Some(_)) => {
                Err("--date is only used with --query date".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl FeedConfig {
    #[must_use]
    pub fn new(args: Args) -> Self {
        let credentials = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| ApiCredentials {
                host: args.api_host,
                key: key.trim().to_string(),
            });

        FeedConfig {
            query: args.query.into(),
            date: args.date,
            api_base_url: args.api_base_url,
            credentials,
            adapter_timeout: Duration::from_secs(args.adapter_timeout_secs),
            deadline: args.deadline_secs.map(Duration::from_secs),
            sweep_days: args.sweep_days,
            scrape: !args.no_scrape,
        }
    }

    /// API first for every kind, then the scraped sites for live and
    /// upcoming. The API adapter also drives day sweeps.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an HTTP client cannot be built from the config
    pub fn sources(&self) -> Result<SourceLists, FeedError> {
        if self.credentials.is_none() {
            warn!("no API key configured, structured API requests are sent without credentials");
        }
        let client = HttpEventsClient::new(
            &self.api_base_url,
            self.credentials.as_ref(),
            self.adapter_timeout,
        )?;
        let api: Arc<dyn SourceAdapter> =
            Arc::new(StructuredApiAdapter::new(API_SOURCE_NAME, client));

        let mut lists = SourceLists {
            live: vec![api.clone()],
            upcoming: vec![api.clone()],
            by_date: vec![api.clone()],
            sweep: Some(api),
        };

        if self.scrape {
            let fetcher = Arc::new(RetryingPageFetcher::new(
                PAGE_TIMEOUT,
                RetryPolicy::default(),
            )?);
            let scraped = |sites: Vec<SiteConfig>| {
                sites
                    .into_iter()
                    .map(|site| {
                        Arc::new(HtmlAdapter::new(site, fetcher.clone())) as Arc<dyn SourceAdapter>
                    })
                    .collect::<Vec<_>>()
            };
            lists.live.extend(scraped(sites::live_sites()));
            lists.upcoming.extend(scraped(sites::upcoming_sites()));
        }
        Ok(lists)
    }

    /// # Errors
    ///
    /// Will return `Err` if the sources cannot be built
    pub fn orchestrator(&self, cancel: CancellationToken) -> Result<Orchestrator, FeedError> {
        Ok(Orchestrator::new(self.sources()?)
            .with_adapter_timeout(self.adapter_timeout)
            .with_deadline(self.deadline)
            .with_sweep_days(self.sweep_days)
            .with_cancellation(cancel))
    }
}
