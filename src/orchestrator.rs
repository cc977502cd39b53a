//! Ordered fallback across sources.
//!
//! Each query kind has its own ordered adapter list. Adapters are tried one at
//! a time and the first one whose validated output is non-empty wins; results
//! are never merged. When the whole list comes up empty, live and upcoming
//! queries sweep neighbouring days through the structured API, and after that
//! the mock dataset is returned. Callers always get a list back.

use crate::error::FeedError;
use crate::mock::MockProvider;
use crate::model::{MatchRecord, QueryKind};
use crate::source::{Query, SourceAdapter};
use crate::validate::validate;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_SWEEP_DAYS: u32 = 7;

/// Adapter lists per query kind plus the adapter used for day sweeps.
#[derive(Clone, Default)]
pub struct SourceLists {
    pub live: Vec<Arc<dyn SourceAdapter>>,
    pub upcoming: Vec<Arc<dyn SourceAdapter>>,
    pub by_date: Vec<Arc<dyn SourceAdapter>>,
    pub sweep: Option<Arc<dyn SourceAdapter>>,
}

impl SourceLists {
    fn for_kind(&self, kind: QueryKind) -> &[Arc<dyn SourceAdapter>] {
        match kind {
            QueryKind::Live => &self.live,
            QueryKind::Upcoming => &self.upcoming,
            QueryKind::ByDate => &self.by_date,
        }
    }
}

enum Attempt {
    Records(Vec<MatchRecord>),
    Empty,
    /// Deadline passed or caller cancelled; skip everything left.
    Stop,
}

pub struct Orchestrator {
    sources: SourceLists,
    adapter_timeout: Duration,
    deadline: Option<Duration>,
    sweep_days: u32,
    mock: MockProvider,
    cancel: CancellationToken,
}

impl Orchestrator {
    #[must_use]
    pub fn new(sources: SourceLists) -> Self {
        Self {
            sources,
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
            deadline: None,
            sweep_days: DEFAULT_SWEEP_DAYS,
            mock: MockProvider::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_adapter_timeout(mut self, adapter_timeout: Duration) -> Self {
        self.adapter_timeout = adapter_timeout;
        self
    }

    /// Bound on one whole `fetch*` call, sweep included.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    #[must_use]
    pub fn with_sweep_days(mut self, sweep_days: u32) -> Self {
        self.sweep_days = sweep_days;
        self
    }

    #[must_use]
    pub fn with_mock(mut self, mock: MockProvider) -> Self {
        self.mock = mock;
        self
    }

    /// Once `cancel` fires, in-flight and remaining attempts are abandoned
    /// and the mock set is returned.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub async fn fetch_live(&self) -> Vec<MatchRecord> {
        self.fetch_live_at(Utc::now()).await
    }

    pub async fn fetch_live_at(&self, now: DateTime<Utc>) -> Vec<MatchRecord> {
        self.fetch_at(QueryKind::Live, now.date_naive(), now).await
    }

    pub async fn fetch_upcoming(&self) -> Vec<MatchRecord> {
        self.fetch_upcoming_at(Utc::now()).await
    }

    pub async fn fetch_upcoming_at(&self, now: DateTime<Utc>) -> Vec<MatchRecord> {
        self.fetch_at(QueryKind::Upcoming, now.date_naive(), now).await
    }

    /// Matches on one calendar day. A day/month/year that is not a real date
    /// gets the mock by-date set.
    pub async fn fetch_by_date(&self, day: u32, month: u32, year: i32) -> Vec<MatchRecord> {
        self.fetch_by_date_at(day, month, year, Utc::now()).await
    }

    pub async fn fetch_by_date_at(
        &self,
        day: u32,
        month: u32,
        year: i32,
        now: DateTime<Utc>,
    ) -> Vec<MatchRecord> {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => self.fetch_at(QueryKind::ByDate, date, now).await,
            None => {
                warn!(day, month, year, "invalid date, using mock by-date set");
                self.mock.generate(QueryKind::ByDate)
            }
        }
    }

    pub async fn fetch(&self, kind: QueryKind, date: NaiveDate) -> Vec<MatchRecord> {
        self.fetch_at(kind, date, Utc::now()).await
    }

    pub async fn fetch_at(
        &self,
        kind: QueryKind,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Vec<MatchRecord> {
        // A deadline too far out to represent is no deadline.
        let deadline_at = self.deadline.and_then(|d| Instant::now().checked_add(d));
        let query = Query::new(kind, date, now);
        info!(%kind, %date, "fetching matches");

        match self.cascade(&query, deadline_at).await {
            Attempt::Records(records) => return records,
            Attempt::Stop => return self.fall_back_to_mock(kind),
            Attempt::Empty => {}
        }

        if let Attempt::Records(records) = self.sweep(&query, deadline_at).await {
            return records;
        }
        self.fall_back_to_mock(kind)
    }

    async fn cascade(&self, query: &Query, deadline_at: Option<Instant>) -> Attempt {
        for adapter in self.sources.for_kind(query.kind) {
            match self.attempt(adapter.as_ref(), query, deadline_at).await {
                Attempt::Empty => {}
                done => return done,
            }
        }
        Attempt::Empty
    }

    /// Live queries look back, upcoming ones look ahead, one day at a time.
    async fn sweep(&self, query: &Query, deadline_at: Option<Instant>) -> Attempt {
        let Some(source) = &self.sources.sweep else {
            return Attempt::Empty;
        };
        let step = |days: u32| -> Option<NaiveDate> {
            let days = Days::new(u64::from(days));
            match query.kind {
                QueryKind::Live => query.date.checked_sub_days(days),
                QueryKind::Upcoming => query.date.checked_add_days(days),
                QueryKind::ByDate => None,
            }
        };

        for days in 1..=self.sweep_days {
            let Some(date) = step(days) else {
                return Attempt::Empty;
            };
            info!(source = source.name(), kind = %query.kind, %date, "sweeping");
            match self.attempt(source.as_ref(), &query.on(date), deadline_at).await {
                Attempt::Empty => {}
                done => return done,
            }
        }
        Attempt::Empty
    }

    async fn attempt(
        &self,
        adapter: &dyn SourceAdapter,
        query: &Query,
        deadline_at: Option<Instant>,
    ) -> Attempt {
        let own = adapter.budget(self.adapter_timeout);
        let budget = match deadline_at {
            Some(at) => {
                let remaining = at.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    warn!(source = adapter.name(), "overall deadline passed, skipping remaining sources");
                    return Attempt::Stop;
                }
                remaining.min(own)
            }
            None => own,
        };

        debug!(source = adapter.name(), date = %query.date, ?budget, "trying source");
        let outcome = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                warn!(source = adapter.name(), "cancelled");
                return Attempt::Stop;
            }
            outcome = timeout(budget, adapter.fetch(query)) => outcome,
        };

        let records = match outcome {
            Ok(Ok(records)) => records,
            Ok(Err(err)) => {
                warn!(source = adapter.name(), "source failed: {err}");
                return Attempt::Empty;
            }
            Err(_) => {
                warn!(source = adapter.name(), "{}", FeedError::Timeout(budget));
                return Attempt::Empty;
            }
        };

        let fetched = records.len();
        let valid = validate(records, query.kind);
        if valid.is_empty() {
            info!(source = adapter.name(), fetched, "no usable records");
            return Attempt::Empty;
        }
        info!(source = adapter.name(), fetched, kept = valid.len(), "using source");
        Attempt::Records(valid)
    }

    fn fall_back_to_mock(&self, kind: QueryKind) -> Vec<MatchRecord> {
        warn!(%kind, version = self.mock.version(), "no source produced data, using mock dataset");
        self.mock.generate(kind)
    }
}
