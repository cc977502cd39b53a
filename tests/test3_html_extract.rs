use rusty_tennis::error::FeedError;
use rusty_tennis::model::{DEFAULT_TOURNAMENT, MatchStatus, QueryKind};
use rusty_tennis::source::html::sites::{self, LIVE_LIMIT, UPCOMING_LIMIT};
use rusty_tennis::source::html::{HtmlAdapter, parse_page};
use rusty_tennis::source::{Query, SourceAdapter};
use std::sync::Arc;

mod common;
use common::{StaticPage, day, utc};

const TENNIS24_LIVE: &str = include_str!("fixtures/tennis24_live.html");

fn live_query() -> Query {
    Query::new(QueryKind::Live, day(2025, 7, 4), utc(2025, 7, 4, 12))
}

#[test]
fn tennis24_page_yields_one_record_per_container() {
    let site = sites::tennis24();
    let records = parse_page(TENNIS24_LIVE, &site, &live_query());
    assert_eq!(records.len(), 4);

    let live = &records[0];
    assert_eq!(live.home.name, "Sinner J");
    assert_eq!(live.away.name, "Alcaraz C");
    assert_eq!(live.tournament, "Wimbledon - Men's Singles");
    assert_eq!(live.status, MatchStatus::Live);
    assert_eq!((live.home_score, live.away_score), (Some(6), Some(4)));
    assert_eq!(live.score_detail.as_deref(), Some("6-4, 3-2"));
    assert_eq!(live.source, "tennis24");
    assert_eq!(live.start_time, utc(2025, 7, 4, 12));

    let scheduled = &records[1];
    assert_eq!(scheduled.home.name, "Djokovic N");
    assert_eq!(scheduled.status, MatchStatus::Scheduled);
    assert_eq!(scheduled.home_score, Some(0));
    assert_eq!(scheduled.tournament, DEFAULT_TOURNAMENT);

    assert_eq!(records[2].status, MatchStatus::Completed);
    assert_eq!(records[3].home.name, "TBD");
}

#[test]
fn text_only_rows_split_on_delimiters() {
    let html = r#"<table>
        <tr data-match="1"><td>Rune H. - Ruud C.</td><td>6-3 6-4</td><td>Finished</td></tr>
        <tr data-match="2"><td>ITF MEN Kayseri: Yilmaz E. vs Celik A.</td><td>Jul 5</td></tr>
    </table>"#;
    let site = sites::tennis_explorer();
    let records = parse_page(html, &site, &live_query());
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].home.name, "Rune H");
    assert_eq!(records[0].away.name, "Ruud C");
    assert_eq!(records[0].status, MatchStatus::Completed);
    assert_eq!(records[0].home.country, "Denmark");

    assert_eq!(records[1].home.name, "Yilmaz E");
    assert_eq!(records[1].away.name, "Celik A");
    assert_eq!(records[1].tournament, "ITF Men's Tournament");
    assert_eq!(records[1].status, MatchStatus::Scheduled);
}

#[test]
fn text_scan_reads_rows_not_their_wrapper() {
    let html = r#"<html><body><div class="day">
        <div>Sinner J. vs Alcaraz C. 6-4 3-2</div>
        <div>Fritz T. vs Paul T. 7-5</div>
    </div></body></html>"#;
    let records = parse_page(html, &sites::tennis24(), &live_query());
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].home.name, "Sinner J");
    assert_eq!(records[0].score_detail.as_deref(), Some("6-4, 3-2"));
    assert_eq!(records[1].away.name, "Paul T");
    assert_eq!(records[1].score_detail.as_deref(), Some("7-5"));
}

#[test]
fn element_limits_depend_on_query_kind() {
    let rows: String = (0..20)
        .map(|n| format!(r#"<div class="match-item">Player{n} Alpha vs Other{n} Beta 6-{}</div>"#, n % 7))
        .collect();
    let html = format!("<html><body>{rows}</body></html>");
    let site = sites::live_tennis_eu();

    assert_eq!(parse_page(&html, &site, &live_query()).len(), LIVE_LIMIT);
    let upcoming = Query::new(QueryKind::Upcoming, day(2025, 7, 4), utc(2025, 7, 4, 12));
    assert_eq!(parse_page(&html, &site, &upcoming).len(), UPCOMING_LIMIT);
}

#[tokio::test]
async fn adapter_fetches_the_page_for_the_query_kind() -> Result<(), Box<dyn std::error::Error>> {
    let page = Arc::new(StaticPage::new(TENNIS24_LIVE));
    let adapter = HtmlAdapter::new(sites::tennis24(), page.clone());

    let live = adapter.fetch(&live_query()).await?;
    assert_eq!(live.len(), 4);
    let upcoming = Query::new(QueryKind::Upcoming, day(2025, 7, 4), utc(2025, 7, 4, 12));
    adapter.fetch(&upcoming).await?;

    assert_eq!(
        *page.fetched.lock().expect("lock"),
        vec![
            "https://www.tennis24.com/".to_string(),
            "https://www.tennis24.com/fixtures/".to_string()
        ]
    );
    Ok(())
}

#[tokio::test]
async fn site_without_a_page_for_the_kind_is_unavailable() {
    let page = Arc::new(StaticPage::new(TENNIS24_LIVE));
    let adapter = HtmlAdapter::new(sites::tennis_explorer(), page.clone());
    let upcoming = Query::new(QueryKind::Upcoming, day(2025, 7, 4), utc(2025, 7, 4, 12));

    let result = adapter.fetch(&upcoming).await;
    assert!(matches!(result, Err(FeedError::SourceUnavailable(_))));
    assert!(page.fetched.lock().expect("lock").is_empty());
}
