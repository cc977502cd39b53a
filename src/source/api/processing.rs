use crate::error::FeedError;
use crate::model::{
    DEFAULT_TOURNAMENT, DEFAULT_VENUE, MatchRecord, Participant, QueryKind, UNKNOWN_PLAYER,
    default_score, derive_record_id,
};
use crate::normalize::clean;
use crate::status::{classify, context_default};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

const MAX_PERIODS: usize = 5;

/// Walk `{ "events": [...] }` and map every event object to a record.
///
/// # Errors
///
/// Will return `Err` if the document is not an object or has no `events`
/// array. Individual events that are not objects are skipped.
pub fn process_events_json(
    root: &Value,
    context: QueryKind,
    now: DateTime<Utc>,
    source: &str,
) -> Result<Vec<MatchRecord>, FeedError> {
    let events = root
        .get("events")
        .and_then(Value::as_array)
        .ok_or_else(|| FeedError::SourceParse(format!("{source}: no events array in response")))?;

    let mut records = Vec::with_capacity(events.len());
    for (idx, event) in events.iter().enumerate() {
        if !event.is_object() {
            warn!(source, idx, "skipping event that is not an object");
            continue;
        }
        records.push(process_event(event, context, now, source));
    }
    debug!(source, events = events.len(), records = records.len(), "processed events");
    Ok(records)
}

#[must_use]
pub fn process_event(
    event: &Value,
    context: QueryKind,
    now: DateTime<Utc>,
    source: &str,
) -> MatchRecord {
    let tournament = str_at(event, &["tournament", "name"])
        .filter(|t| !t.trim().is_empty())
        .map_or_else(|| DEFAULT_TOURNAMENT.to_string(), |t| t.trim().to_string());

    let venue = str_at(event, &["venue", "name"])
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().to_string())
        .or_else(|| str_at(event, &["tournament", "name"]).map(|t| t.trim().to_string()))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_VENUE.to_string());

    let home_name = player_name(event, "homeTeam");
    let away_name = player_name(event, "awayTeam");

    let status = match event.get("status") {
        Some(status) => classify(
            str_at(status, &["type"]),
            str_at(status, &["description"]),
            context,
        ),
        None => context_default(context),
    };

    let start_time = event
        .get("startTimestamp")
        .and_then(Value::as_i64)
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .unwrap_or(now);

    let home_score = current_score(event, "homeScore");
    let away_score = current_score(event, "awayScore");

    let id = event
        .get("id")
        .and_then(scalar_to_string)
        .unwrap_or_else(|| derive_record_id(&home_name, &away_name, &start_time));

    MatchRecord {
        id,
        home: Participant::named(&home_name),
        away: Participant::named(&away_name),
        tournament,
        venue,
        start_time,
        home_score: default_score(home_score, status),
        away_score: default_score(away_score, status),
        score_detail: score_detail(event),
        status,
        source: source.to_string(),
    }
}

fn player_name(event: &Value, side: &str) -> String {
    let cleaned = str_at(event, &[side, "name"]).map(clean).unwrap_or_default();
    if cleaned.is_empty() {
        UNKNOWN_PLAYER.to_string()
    } else {
        cleaned
    }
}

fn current_score(event: &Value, side: &str) -> Option<i32> {
    event
        .get(side)
        .and_then(|s| s.get("current"))
        .and_then(value_to_i32)
}

/// `"6-4, 3-6, 2-1 | 30-15"`: set periods with any games played, then the
/// current point when both sides have one.
#[must_use]
pub fn score_detail(event: &Value) -> Option<String> {
    let home = event.get("homeScore")?;
    let away = event.get("awayScore")?;

    let sets: Vec<String> = (1..=MAX_PERIODS)
        .filter_map(|n| {
            let key = format!("period{n}");
            let h = home.get(&key).and_then(value_to_i32)?;
            let a = away.get(&key).and_then(value_to_i32)?;
            (h > 0 || a > 0).then(|| format!("{h}-{a}"))
        })
        .collect();
    let mut detail = sets.join(", ");

    let home_point = home.get("point").and_then(scalar_to_string).unwrap_or_default();
    let away_point = away.get("point").and_then(scalar_to_string).unwrap_or_default();
    if !home_point.is_empty() && !away_point.is_empty() {
        if !detail.is_empty() {
            detail.push_str(" | ");
        }
        detail.push_str(&format!("{home_point}-{away_point}"));
    }

    (!detail.is_empty()).then_some(detail)
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |node, key| node.get(*key))
        .and_then(Value::as_str)
}

fn value_to_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
