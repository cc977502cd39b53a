use ahash::AHashSet;
use rusty_tennis::error::FeedError;
use rusty_tennis::mock::MockProvider;
use rusty_tennis::model::QueryKind;
use rusty_tennis::orchestrator::{Orchestrator, SourceLists};
use rusty_tennis::source::SourceAdapter;
use rusty_tennis::source::html::client::USER_AGENTS;
use rusty_tennis::source::html::{
    HtmlAdapter, PageFetcher, RetryPolicy, RetryingPageFetcher, SiteConfig, sites,
};
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{PageServer, utc};

const TENNIS24_LIVE: &str = include_str!("fixtures/tennis24_live.html");

fn no_pauses() -> RetryPolicy {
    RetryPolicy {
        attempts: USER_AGENTS.len(),
        base_delay: Duration::ZERO,
        step_delay: Duration::ZERO,
    }
}

fn local_fetcher(policy: RetryPolicy) -> Result<RetryingPageFetcher, FeedError> {
    RetryingPageFetcher::with_builder(
        reqwest::Client::builder().no_proxy(),
        Duration::from_secs(2),
        policy,
    )
}

/// tennis24 layout, pointed at the local server.
fn local_site(server: &PageServer) -> SiteConfig {
    let url: &'static str = Box::leak(server.url.clone().into_boxed_str());
    SiteConfig {
        live_url: Some(url),
        ..sites::tennis24()
    }
}

#[tokio::test]
async fn failing_page_is_tried_once_per_user_agent() -> Result<(), Box<dyn std::error::Error>> {
    let server = PageServer::start(usize::MAX, TENNIS24_LIVE).await?;

    let result = local_fetcher(no_pauses())?.get_page(&server.url).await;
    assert!(matches!(result, Err(FeedError::SourceUnavailable(_))));

    let agents = server.user_agents();
    assert_eq!(agents, USER_AGENTS.map(str::to_string).to_vec());
    assert_eq!(agents.iter().collect::<AHashSet<_>>().len(), USER_AGENTS.len());
    Ok(())
}

#[tokio::test]
async fn recovering_page_stops_retrying() -> Result<(), Box<dyn std::error::Error>> {
    let server = PageServer::start(2, TENNIS24_LIVE).await?;

    let body = local_fetcher(no_pauses())?.get_page(&server.url).await?;
    assert_eq!(body, TENNIS24_LIVE);
    let expected: Vec<String> = USER_AGENTS[..3].iter().map(|ua| ua.to_string()).collect();
    assert_eq!(server.user_agents(), expected);
    Ok(())
}

#[tokio::test]
async fn first_success_is_one_request_with_browser_headers() -> Result<(), Box<dyn std::error::Error>> {
    let server = PageServer::start(0, TENNIS24_LIVE).await?;

    let body = local_fetcher(no_pauses())?.get_page(&server.url).await?;
    assert_eq!(body, TENNIS24_LIVE);
    assert_eq!(server.requests().len(), 1);

    assert_eq!(server.header(0, "user-agent").as_deref(), Some(USER_AGENTS[0]));
    let accept = server.header(0, "accept").unwrap_or_default();
    assert!(accept.starts_with("text/html"));
    assert_eq!(server.header(0, "accept-language").as_deref(), Some("en-US,en;q=0.5"));
    assert_eq!(server.header(0, "accept-encoding").as_deref(), Some("gzip"));
    assert!(
        server
            .header(0, "connection")
            .is_some_and(|c| c.eq_ignore_ascii_case("keep-alive"))
    );
    assert_eq!(server.header(0, "upgrade-insecure-requests").as_deref(), Some("1"));
    Ok(())
}

#[tokio::test]
async fn every_retry_runs_under_a_short_adapter_timeout() -> Result<(), Box<dyn std::error::Error>> {
    let server = PageServer::start(usize::MAX, TENNIS24_LIVE).await?;
    // Pauses of 100, 150, 200 and 250 ms, well past the 200 ms timeout below.
    let policy = RetryPolicy {
        attempts: USER_AGENTS.len(),
        base_delay: Duration::from_millis(50),
        step_delay: Duration::from_millis(50),
    };
    let adapter: Arc<dyn SourceAdapter> =
        Arc::new(HtmlAdapter::new(local_site(&server), local_fetcher(policy)?));
    let orchestrator = Orchestrator::new(SourceLists {
        live: vec![adapter],
        ..SourceLists::default()
    })
    .with_adapter_timeout(Duration::from_millis(200));

    let records = orchestrator.fetch_live_at(utc(2025, 7, 4, 12)).await;
    assert_eq!(records, MockProvider::default().generate(QueryKind::Live));
    assert_eq!(server.requests().len(), USER_AGENTS.len());
    Ok(())
}

#[tokio::test]
async fn page_recovering_on_retry_feeds_the_cascade() -> Result<(), Box<dyn std::error::Error>> {
    let server = PageServer::start(1, TENNIS24_LIVE).await?;
    let adapter: Arc<dyn SourceAdapter> =
        Arc::new(HtmlAdapter::new(local_site(&server), local_fetcher(no_pauses())?));
    let orchestrator = Orchestrator::new(SourceLists {
        live: vec![adapter],
        ..SourceLists::default()
    });

    let records = orchestrator.fetch_live_at(utc(2025, 7, 4, 12)).await;
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.source == "tennis24"));
    assert_eq!(server.requests().len(), 2);
    Ok(())
}
