use crate::model::UNKNOWN_COUNTRY;
use regex::Regex;
use std::sync::OnceLock;

/// Surname → country. Closed table; anything not listed is `"Unknown"`.
const COUNTRY_BY_SURNAME: &[(&str, &str)] = &[
    ("djokovic", "Serbia"),
    ("alcaraz", "Spain"),
    ("nadal", "Spain"),
    ("swiatek", "Poland"),
    ("hurkacz", "Poland"),
    ("gauff", "USA"),
    ("fritz", "USA"),
    ("pegula", "USA"),
    ("keys", "USA"),
    ("williams", "USA"),
    ("paul", "USA"),
    ("shelton", "USA"),
    ("tiafoe", "USA"),
    ("korda", "USA"),
    ("sinner", "Italy"),
    ("musetti", "Italy"),
    ("medvedev", "Russia"),
    ("rublev", "Russia"),
    ("khachanov", "Russia"),
    ("sharapova", "Russia"),
    ("tsitsipas", "Greece"),
    ("zverev", "Germany"),
    ("ruud", "Norway"),
    ("rune", "Denmark"),
    ("sabalenka", "Belarus"),
    ("jabeur", "Tunisia"),
    ("vondrousova", "Czech Republic"),
    ("kvitova", "Czech Republic"),
    ("pliskova", "Czech Republic"),
    ("ostapenko", "Latvia"),
    ("rybakina", "Kazakhstan"),
    ("federer", "Switzerland"),
    ("murray", "Great Britain"),
    ("raducanu", "Great Britain"),
    ("norrie", "Great Britain"),
    ("dimitrov", "Bulgaria"),
    ("de minaur", "Australia"),
    ("auger-aliassime", "Canada"),
    ("humbert", "France"),
    ("halep", "Romania"),
];

fn parenthetical() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\([^)]*\)").expect("Invalid regex pattern - this is a programming error")
    })
}

/// Clean a scraped or API-provided player name.
///
/// Drops parenthetical content (seeds, nationalities), turns `"Last, First"`
/// into `"First Last"`, removes digits and anything that is not a letter,
/// space, hyphen or apostrophe, then collapses whitespace. Running it twice
/// gives the same result as running it once.
#[must_use]
pub fn clean(raw: &str) -> String {
    let without_parens = parenthetical().replace_all(raw, " ");

    let reordered = match without_parens.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => without_parens.into_owned(),
    };

    let kept: String = reordered
        .chars()
        .map(|c| {
            if c.is_alphabetic() || c == '-' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Best-effort country for a player name, from the surname table.
#[must_use]
pub fn country_of(name: &str) -> &'static str {
    let padded = format!(" {} ", name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" "));
    COUNTRY_BY_SURNAME
        .iter()
        .find(|(surname, _)| padded.contains(&format!(" {surname} ")))
        .map_or(UNKNOWN_COUNTRY, |(_, country)| country)
}
