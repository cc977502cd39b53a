use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_COUNTRY: &str = "Unknown";
pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const DEFAULT_TOURNAMENT: &str = "Tennis Tournament";
pub const DEFAULT_VENUE: &str = "Tennis Court";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
    Cancelled,
    Postponed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Live => "LIVE",
            MatchStatus::Completed => "COMPLETED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Postponed => "POSTPONED",
        };
        write!(f, "{s}")
    }
}

/// Which result set a caller asked for. Also the context handed to the
/// status classifier when a source gives no usable status.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Live,
    Upcoming,
    ByDate,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryKind::Live => "live",
            QueryKind::Upcoming => "upcoming",
            QueryKind::ByDate => "by-date",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub country: String,
}

impl Participant {
    /// Country falls back to the surname table lookup.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            country: crate::normalize::country_of(name).to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String,
    pub home: Participant,
    pub away: Participant,
    pub tournament: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub score_detail: Option<String>,
    pub status: MatchStatus,
    pub source: String,
}
