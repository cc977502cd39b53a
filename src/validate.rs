use crate::error::FeedError;
use crate::model::{MatchRecord, MatchStatus, QueryKind, UNKNOWN_PLAYER};
use ahash::AHashSet;
use tracing::debug;

/// Names adapters fall back to when a source gives nothing usable.
const PLACEHOLDER_NAMES: &[&str] = &[
    UNKNOWN_PLAYER,
    "Unknown Player 1",
    "Unknown Player 2",
    "Player 1",
    "Player 2",
];

const MIN_NAME_LEN: usize = 4;

fn is_real_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= MIN_NAME_LEN
        && !PLACEHOLDER_NAMES.iter().any(|p| p.eq_ignore_ascii_case(name))
}

/// # Errors
///
/// Will return `Err(FeedError::RecordInvalid)` naming the first problem found:
/// a missing or placeholder participant name, or a negative score.
pub fn check(record: &MatchRecord) -> Result<(), FeedError> {
    for (side, participant) in [("home", &record.home), ("away", &record.away)] {
        if !is_real_name(&participant.name) {
            return Err(FeedError::RecordInvalid(format!(
                "{side} participant {:?}",
                participant.name
            )));
        }
    }
    for (side, score) in [("home", record.home_score), ("away", record.away_score)] {
        if let Some(score) = score
            && score < 0
        {
            return Err(FeedError::RecordInvalid(format!("{side} score {score}")));
        }
    }
    Ok(())
}

/// Structural check of a single record, independent of the query.
#[must_use]
pub fn is_valid(record: &MatchRecord) -> bool {
    check(record).is_ok()
}

/// Whether a record belongs in the result set for `kind`. Finished matches,
/// including retirements, never show up as live. Upcoming keeps only matches
/// that have not started yet.
#[must_use]
pub fn admits(record: &MatchRecord, kind: QueryKind) -> bool {
    match kind {
        QueryKind::Live => record.status != MatchStatus::Completed,
        QueryKind::Upcoming => {
            matches!(record.status, MatchStatus::Scheduled | MatchStatus::Postponed)
        }
        QueryKind::ByDate => true,
    }
}

/// Keep valid, admitted records; drop repeated ids, first one wins.
#[must_use]
pub fn validate(records: Vec<MatchRecord>, kind: QueryKind) -> Vec<MatchRecord> {
    let mut seen = AHashSet::new();
    records
        .into_iter()
        .filter(|record| {
            if let Err(err) = check(record) {
                debug!(id = %record.id, "dropping record: {err}");
                return false;
            }
            if !admits(record, kind) {
                debug!(
                    home = %record.home.name,
                    away = %record.away.name,
                    status = %record.status,
                    query = %kind,
                    "skipping record outside query"
                );
                return false;
            }
            seen.insert(record.id.clone())
        })
        .collect()
}
