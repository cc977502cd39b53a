//! Last-resort dataset used when every live source comes back empty.
//!
//! The rows are explicit, versioned data. Nothing here is random or depends on
//! the wall clock, so callers and tests can compare against it exactly.

use crate::model::{
    MatchRecord, MatchStatus, Participant, QueryKind, default_score, derive_record_id,
};
use chrono::{DateTime, Duration, Utc};

pub const MOCK_SOURCE: &str = "mock";

/// 2025-07-04T12:00:00Z; every row's start time is an offset from this.
const ANCHOR_TIMESTAMP: i64 = 1_751_630_400;

struct MockRow {
    home: &'static str,
    away: &'static str,
    tournament: &'static str,
    venue: &'static str,
    offset_minutes: i64,
    score: Option<(i32, i32)>,
    detail: Option<&'static str>,
    status: MatchStatus,
}

pub struct MockDataset {
    pub version: &'static str,
    live: &'static [MockRow],
    upcoming: &'static [MockRow],
    by_date: &'static [MockRow],
}

pub static DATASET_V1: MockDataset = MockDataset {
    version: "2025.07-1",
    live: &[
        MockRow {
            home: "Jannik Sinner",
            away: "Alex de Minaur",
            tournament: "Wimbledon",
            venue: "Centre Court",
            offset_minutes: -150,
            score: Some((2, 1)),
            detail: Some("6-4, 4-6, 6-3, 2-1"),
            status: MatchStatus::Live,
        },
        MockRow {
            home: "Carlos Alcaraz",
            away: "Grigor Dimitrov",
            tournament: "Wimbledon",
            venue: "Court 1",
            offset_minutes: -90,
            score: Some((1, 0)),
            detail: Some("6-2, 3-1"),
            status: MatchStatus::Live,
        },
        MockRow {
            home: "Daniil Medvedev",
            away: "Stefanos Tsitsipas",
            tournament: "Wimbledon",
            venue: "Court 2",
            offset_minutes: -120,
            score: Some((2, 0)),
            detail: Some("7-6, 6-4, 1-0"),
            status: MatchStatus::Live,
        },
        MockRow {
            home: "Alexander Zverev",
            away: "Casper Ruud",
            tournament: "Wimbledon",
            venue: "Court 3",
            offset_minutes: -100,
            score: Some((1, 1)),
            detail: Some("6-7, 6-4, 2-2"),
            status: MatchStatus::Live,
        },
        MockRow {
            home: "Holger Rune",
            away: "Felix Auger-Aliassime",
            tournament: "Wimbledon",
            venue: "Court 12",
            offset_minutes: -45,
            score: Some((0, 1)),
            detail: Some("3-6, 1-1"),
            status: MatchStatus::Live,
        },
    ],
    upcoming: &[
        MockRow {
            home: "Novak Djokovic",
            away: "Taylor Fritz",
            tournament: "Wimbledon",
            venue: "Centre Court",
            offset_minutes: 60,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
        MockRow {
            home: "Elena Rybakina",
            away: "Petra Kvitova",
            tournament: "Wimbledon",
            venue: "Court 2",
            offset_minutes: 120,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
        MockRow {
            home: "Ons Jabeur",
            away: "Marketa Vondrousova",
            tournament: "Wimbledon",
            venue: "Court 12",
            offset_minutes: 180,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
        MockRow {
            home: "Andrey Rublev",
            away: "Karen Khachanov",
            tournament: "Wimbledon",
            venue: "Court 18",
            offset_minutes: 240,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
        MockRow {
            home: "Felix Auger-Aliassime",
            away: "Cameron Norrie",
            tournament: "Wimbledon",
            venue: "Court 3",
            offset_minutes: 300,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
    ],
    by_date: &[
        MockRow {
            home: "Iga Swiatek",
            away: "Aryna Sabalenka",
            tournament: "Wimbledon",
            venue: "Centre Court",
            offset_minutes: -240,
            score: Some((2, 1)),
            detail: Some("6-4, 3-6, 7-5"),
            status: MatchStatus::Completed,
        },
        MockRow {
            home: "Tommy Paul",
            away: "Ben Shelton",
            tournament: "Wimbledon",
            venue: "Court 1",
            offset_minutes: -200,
            score: Some((3, 0)),
            detail: Some("6-3, 6-4, 7-6"),
            status: MatchStatus::Completed,
        },
        MockRow {
            home: "Lorenzo Musetti",
            away: "Ugo Humbert",
            tournament: "Wimbledon",
            venue: "Court 2",
            offset_minutes: -60,
            score: Some((1, 1)),
            detail: Some("6-3, 4-6, 2-3"),
            status: MatchStatus::Live,
        },
        MockRow {
            home: "Coco Gauff",
            away: "Jessica Pegula",
            tournament: "Wimbledon",
            venue: "Court 3",
            offset_minutes: 90,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
        MockRow {
            home: "Sebastian Korda",
            away: "Frances Tiafoe",
            tournament: "Wimbledon",
            venue: "Court 18",
            offset_minutes: 150,
            score: None,
            detail: None,
            status: MatchStatus::Scheduled,
        },
    ],
};

impl MockDataset {
    fn rows(&self, kind: QueryKind) -> &'static [MockRow] {
        match kind {
            QueryKind::Live => self.live,
            QueryKind::Upcoming => self.upcoming,
            QueryKind::ByDate => self.by_date,
        }
    }
}

#[derive(Clone, Copy)]
pub struct MockProvider {
    dataset: &'static MockDataset,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(&DATASET_V1)
    }
}

impl MockProvider {
    #[must_use]
    pub fn new(dataset: &'static MockDataset) -> Self {
        Self { dataset }
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        self.dataset.version
    }

    #[must_use]
    pub fn generate(&self, kind: QueryKind) -> Vec<MatchRecord> {
        let anchor = DateTime::<Utc>::from_timestamp(ANCHOR_TIMESTAMP, 0).unwrap_or_default();
        self.dataset
            .rows(kind)
            .iter()
            .map(|row| {
                let start_time = anchor + Duration::minutes(row.offset_minutes);
                let (home_score, away_score) = row.score.unzip();
                MatchRecord {
                    id: derive_record_id(row.home, row.away, &start_time),
                    home: Participant::named(row.home),
                    away: Participant::named(row.away),
                    tournament: row.tournament.to_string(),
                    venue: row.venue.to_string(),
                    start_time,
                    home_score: default_score(home_score, row.status),
                    away_score: default_score(away_score, row.status),
                    score_detail: row.detail.map(str::to_string),
                    status: row.status,
                    source: MOCK_SOURCE.to_string(),
                }
            })
            .collect()
    }
}
