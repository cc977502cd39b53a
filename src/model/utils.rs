use chrono::{DateTime, Utc};
use std::hash::{BuildHasher, Hash, Hasher};

// Fixed seeds keep derived ids stable between runs and processes.
const ID_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Deterministic id for records whose source has none.
#[must_use]
pub fn derive_record_id(home: &str, away: &str, start_time: &DateTime<Utc>) -> String {
    let state = ahash::RandomState::with_seeds(ID_SEEDS[0], ID_SEEDS[1], ID_SEEDS[2], ID_SEEDS[3]);
    let mut hasher = state.build_hasher();
    home.to_lowercase().hash(&mut hasher);
    away.to_lowercase().hash(&mut hasher);
    start_time.timestamp().hash(&mut hasher);
    format!("m-{:016x}", hasher.finish())
}

/// Sets won default to zero only for matches that have not started.
#[must_use]
pub fn default_score(score: Option<i32>, status: crate::model::MatchStatus) -> Option<i32> {
    match (score, status) {
        (Some(s), _) => Some(s),
        (None, crate::model::MatchStatus::Scheduled) => Some(0),
        (None, _) => None,
    }
}
