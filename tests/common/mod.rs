#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusty_tennis::error::FeedError;
use rusty_tennis::model::{MatchRecord, MatchStatus, Participant, derive_record_id};
use rusty_tennis::source::api::EventsClient;
use rusty_tennis::source::html::PageFetcher;
use rusty_tennis::source::{Query, SourceAdapter};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const EVENTS_FIXTURE: &str = include_str!("../fixtures/events_2025_07_04.json");

pub fn events_fixture() -> Value {
    serde_json::from_str(EVENTS_FIXTURE).expect("fixture is valid json")
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid test timestamp")
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn record(home: &str, away: &str, status: MatchStatus, source: &str) -> MatchRecord {
    let start_time = utc(2025, 7, 4, 12);
    MatchRecord {
        id: derive_record_id(home, away, &start_time),
        home: Participant::named(home),
        away: Participant::named(away),
        tournament: "Wimbledon".to_string(),
        venue: "Centre Court".to_string(),
        start_time,
        home_score: Some(1),
        away_score: Some(0),
        score_detail: Some("6-4, 2-1".to_string()),
        status,
        source: source.to_string(),
    }
}

/// Serves the same document for every date and remembers which dates it was
/// asked for.
pub struct FixtureEventsClient {
    pub json: Value,
    pub requested: Mutex<Vec<NaiveDate>>,
}

impl FixtureEventsClient {
    pub fn new(json: Value) -> Self {
        Self {
            json,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EventsClient for FixtureEventsClient {
    async fn get_events(&self, date: NaiveDate) -> Result<Value, FeedError> {
        self.requested.lock().expect("lock").push(date);
        Ok(self.json.clone())
    }
}

pub struct StaticPage {
    pub body: String,
    pub fetched: Mutex<Vec<String>>,
}

impl StaticPage {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            fetched: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for StaticPage {
    async fn get_page(&self, url: &str) -> Result<String, FeedError> {
        self.fetched.lock().expect("lock").push(url.to_string());
        Ok(self.body.clone())
    }
}

/// Adapter returning a fixed outcome, optionally only for one date and
/// optionally after a delay, counting its calls.
pub struct ScriptedAdapter {
    pub name: String,
    pub outcome: Result<Vec<MatchRecord>, FeedError>,
    pub only_on: Option<NaiveDate>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
    pub dates: Mutex<Vec<NaiveDate>>,
}

impl ScriptedAdapter {
    pub fn returning(name: &str, records: Vec<MatchRecord>) -> Self {
        Self {
            name: name.to_string(),
            outcome: Ok(records),
            only_on: None,
            delay: None,
            calls: AtomicUsize::new(0),
            dates: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &str, err: FeedError) -> Self {
        Self {
            outcome: Err(err),
            ..Self::returning(name, Vec::new())
        }
    }

    pub fn empty(name: &str) -> Self {
        Self::returning(name, Vec::new())
    }

    pub fn only_on(mut self, date: NaiveDate) -> Self {
        self.only_on = Some(date);
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.dates.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SourceAdapter for ScriptedAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<MatchRecord>, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dates.lock().expect("lock").push(query.date);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(only_on) = self.only_on
            && only_on != query.date
        {
            return Ok(Vec::new());
        }
        self.outcome.clone()
    }
}

/// Request headers as received, names lowercased.
pub type Headers = Vec<(String, String)>;

/// HTTP/1.1 server on a local port, one request per connection. The first
/// `failures` requests get a 503, later ones get `body`.
pub struct PageServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Headers>>>,
}

impl PageServer {
    pub async fn start(failures: usize, body: &'static str) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(answer(socket, Arc::clone(&log), failures, body));
            }
        });
        Ok(Self { url, requests })
    }

    pub fn requests(&self) -> Vec<Headers> {
        self.requests.lock().expect("lock").clone()
    }

    pub fn header(&self, request: usize, name: &str) -> Option<String> {
        self.requests()
            .get(request)?
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    pub fn user_agents(&self) -> Vec<String> {
        (0..self.requests().len())
            .filter_map(|n| self.header(n, "user-agent"))
            .collect()
    }
}

async fn answer(
    mut socket: TcpStream,
    log: Arc<Mutex<Vec<Headers>>>,
    failures: usize,
    body: &'static str,
) {
    let Some(headers) = read_head(&mut socket).await else {
        return;
    };
    let served = {
        let mut log = log.lock().expect("lock");
        log.push(headers);
        log.len()
    };
    let response = if served <= failures {
        "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            .to_string()
    } else {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    };
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_head(socket: &mut TcpStream) -> Option<Headers> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    Some(
        head.split("\r\n")
            .skip(1)
            .take_while(|line| !line.is_empty())
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect(),
    )
}
