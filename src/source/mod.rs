pub mod api;
pub mod html;

use crate::error::FeedError;
use crate::model::{MatchRecord, QueryKind};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;

/// What an adapter is asked for on one attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Query {
    pub kind: QueryKind,
    /// Calendar day to fetch. Sweeps move this while keeping `kind`.
    pub date: NaiveDate,
    /// Reference time used for records whose source has no start time.
    pub now: DateTime<Utc>,
}

impl Query {
    #[must_use]
    pub fn new(kind: QueryKind, date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self { kind, date, now }
    }

    #[must_use]
    pub fn on(self, date: NaiveDate) -> Self {
        Self { date, ..self }
    }
}

/// One upstream source. Implementations fetch and parse; they report every
/// failure as a [`FeedError`] and leave the fallback decision to the caller.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn name(&self) -> &str;

    /// Time the orchestrator allows one `fetch`, given its configured
    /// per-adapter timeout. Adapters that retry internally widen it so every
    /// attempt fits.
    fn budget(&self, adapter_timeout: Duration) -> Duration {
        adapter_timeout
    }

    async fn fetch(&self, query: &Query) -> Result<Vec<MatchRecord>, FeedError>;
}
