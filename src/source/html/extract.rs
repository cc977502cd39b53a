//! Turning the text of one scraped match container into a record.
//!
//! Scraped markup carries no structure we can rely on, so everything here is a
//! heuristic over the element's flattened text. In particular the status of a
//! row without an explicit marker is guessed from whether it shows a date or
//! time: rows with one are taken as scheduled, the rest as live.

use super::patterns::{all_texts, element_text, first_text};
use super::sites::SiteConfig;
use crate::model::{MatchRecord, MatchStatus, Participant, QueryKind, default_score, derive_record_id};
use crate::normalize::clean;
use crate::source::Query;
use crate::status::classify;
use regex::Regex;
use scraper::ElementRef;
use std::sync::OnceLock;

const DELIMITERS: [&str; 3] = [" vs ", " v ", " - "];
const NAME_TOKENS: usize = 2;

/// Marker phrase → status code understood by the classifier. Checked in
/// order, so a finished row that still says "live" somewhere is finished.
const STATUS_MARKERS: &[(&str, &str)] = &[
    ("finished", "finished"),
    ("ended", "ended"),
    ("postponed", "postponed"),
    ("cancelled", "cancelled"),
    ("canceled", "cancelled"),
    ("in progress", "inprogress"),
    ("live", "live"),
];

fn score_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})-(\d{1,2})\b")
            .expect("Invalid regex pattern - this is a programming error")
    })
}

fn date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)\b\d{1,2}/\d{1,2}\b|\b\d{1,2}:\d{2}\b|\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b",
        )
        .expect("Invalid regex pattern - this is a programming error")
    })
}

fn word_regex(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .expect("Invalid regex pattern - this is a programming error")
}

fn marker_regexes() -> &'static [(Regex, &'static str)] {
    static REGEXES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        STATUS_MARKERS
            .iter()
            .map(|(phrase, code)| (word_regex(phrase), *code))
            .collect()
    })
}

/// Split `"... Home A. vs Away B. ..."` on the first delimiter found and keep
/// the two word tokens nearest the delimiter on each side. Tokens without a
/// letter (scores, times) are ignored.
#[must_use]
pub fn split_participants(text: &str) -> Option<(String, String)> {
    let lower = text.to_ascii_lowercase();
    let (pos, delim) = DELIMITERS
        .iter()
        .find_map(|d| lower.find(d).map(|pos| (pos, *d)))?;

    let (left, right) = (&text[..pos], &text[pos + delim.len()..]);
    let has_letter = |t: &&str| t.chars().any(char::is_alphabetic);

    let mut left_tokens: Vec<&str> = left
        .split_whitespace()
        .rev()
        .filter(has_letter)
        .take(NAME_TOKENS)
        .collect();
    left_tokens.reverse();
    let right_tokens: Vec<&str> = right
        .split_whitespace()
        .filter(has_letter)
        .take(NAME_TOKENS)
        .collect();

    let home = clean(&left_tokens.join(" "));
    let away = clean(&right_tokens.join(" "));
    (!home.is_empty() && !away.is_empty()).then_some((home, away))
}

/// `(home, away, detail)`: the first `n-m` token gives the scores and every
/// token joined by `", "` gives the detail.
#[must_use]
pub fn parse_scores(text: &str) -> (Option<i32>, Option<i32>, Option<String>) {
    let pairs: Vec<(i32, i32)> = score_regex()
        .captures_iter(text)
        .filter_map(|c| Some((c[1].parse().ok()?, c[2].parse().ok()?)))
        .collect();

    let Some(&(home, away)) = pairs.first() else {
        return (None, None, None);
    };
    let detail = pairs
        .iter()
        .map(|(h, a)| format!("{h}-{a}"))
        .collect::<Vec<_>>()
        .join(", ");
    (Some(home), Some(away), Some(detail))
}

#[must_use]
pub fn has_date_token(text: &str) -> bool {
    date_regex().is_match(text)
}

/// First keyword table entry whose needle appears in `text`.
#[must_use]
pub fn tournament_from_keywords(
    text: &str,
    keywords: &[(&'static str, &'static str)],
) -> Option<&'static str> {
    keywords
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, tournament)| *tournament)
}

/// Status from explicit markers when present, else the date/time guess.
#[must_use]
pub fn infer_status(text: &str, context: QueryKind) -> MatchStatus {
    let marker = marker_regexes()
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, code)| *code);

    match marker {
        Some(code) => classify(Some(code), Some(text), context),
        None if text.to_lowercase().contains("retired") => {
            classify(None, Some(text), context)
        }
        None if has_date_token(text) => MatchStatus::Scheduled,
        None => MatchStatus::Live,
    }
}

/// Build a record from one match container, or `None` when no pair of
/// participants can be found in it.
#[must_use]
pub fn record_from_element(el: ElementRef<'_>, site: &SiteConfig, query: &Query) -> Option<MatchRecord> {
    let text = element_text(el);
    if text.is_empty() {
        return None;
    }

    let from_selector = site
        .participant_selector
        .map(|css| all_texts(el, css))
        .filter(|names| names.len() >= 2)
        .map(|names| (clean(&names[0]), clean(&names[1])))
        .filter(|(h, a)| !h.is_empty() && !a.is_empty());
    let (home, away) = from_selector.or_else(|| split_participants(&text))?;

    let tournament = site
        .tournament_selector
        .and_then(|css| first_text(el, css))
        .or_else(|| tournament_from_keywords(&text, site.tournament_keywords).map(str::to_string))
        .unwrap_or_else(|| site.default_tournament.to_string());

    let status = infer_status(&text, query.kind);
    let (home_score, away_score, score_detail) = parse_scores(&text);
    let start_time = query.now;

    Some(MatchRecord {
        id: derive_record_id(&home, &away, &start_time),
        home: Participant::named(&home),
        away: Participant::named(&away),
        tournament,
        venue: site.default_venue.to_string(),
        start_time,
        home_score: default_score(home_score, status),
        away_score: default_score(away_score, status),
        score_detail,
        status,
        source: site.name.to_string(),
    })
}
