use super::patterns::SelectorPattern;
use crate::model::{DEFAULT_TOURNAMENT, DEFAULT_VENUE, QueryKind};

pub const LIVE_LIMIT: usize = 12;
pub const UPCOMING_LIMIT: usize = 8;
pub const ENOUGH_ELEMENTS: usize = 10;

/// Everything that differs between scraped sites. Sites are data: adding one
/// means adding a `SiteConfig`, not another adapter type.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub name: &'static str,
    pub live_url: Option<&'static str>,
    pub upcoming_url: Option<&'static str>,
    /// Tried in order; collection stops once `enough` elements are found.
    pub patterns: &'static [SelectorPattern],
    pub participant_selector: Option<&'static str>,
    pub tournament_selector: Option<&'static str>,
    /// `(needle, tournament)`; first needle found in the element text wins.
    pub tournament_keywords: &'static [(&'static str, &'static str)],
    pub default_tournament: &'static str,
    pub default_venue: &'static str,
    pub live_limit: usize,
    pub upcoming_limit: usize,
    pub enough: usize,
}

impl SiteConfig {
    #[must_use]
    pub fn url_for(&self, kind: QueryKind) -> Option<&'static str> {
        match kind {
            QueryKind::Live => self.live_url,
            QueryKind::Upcoming => self.upcoming_url,
            QueryKind::ByDate => None,
        }
    }

    #[must_use]
    pub fn limit_for(&self, kind: QueryKind) -> usize {
        match kind {
            QueryKind::Upcoming => self.upcoming_limit,
            QueryKind::Live | QueryKind::ByDate => self.live_limit,
        }
    }
}

/// Case-sensitive needles, checked in order, so the specific entries sit
/// ahead of the generic tour names.
pub const TOURNAMENT_KEYWORDS: &[(&str, &str)] = &[
    ("ITF MEN", "ITF Men's Tournament"),
    ("ITF WOMEN", "ITF Women's Tournament"),
    ("Kayseri", "ITF Kayseri"),
    ("Wimbledon", "Wimbledon"),
    ("Roland Garros", "Roland Garros"),
    ("US Open", "US Open"),
    ("Australian Open", "Australian Open"),
    ("Challenger", "ATP Challenger"),
    ("ATP", "ATP Tour"),
    ("WTA", "WTA Tour"),
];

const fn site(name: &'static str, patterns: &'static [SelectorPattern]) -> SiteConfig {
    SiteConfig {
        name,
        live_url: None,
        upcoming_url: None,
        patterns,
        participant_selector: None,
        tournament_selector: None,
        tournament_keywords: TOURNAMENT_KEYWORDS,
        default_tournament: DEFAULT_TOURNAMENT,
        default_venue: DEFAULT_VENUE,
        live_limit: LIVE_LIMIT,
        upcoming_limit: UPCOMING_LIMIT,
        enough: ENOUGH_ELEMENTS,
    }
}

const TENNIS24_PATTERNS: &[SelectorPattern] = &[
    SelectorPattern::Css("div[id*='g_1_']"),
    SelectorPattern::Css("tr[id*='g_1_']"),
    SelectorPattern::Css(".event__match"),
    SelectorPattern::Css("tr.event__match--live"),
    SelectorPattern::TextScan {
        scope: "div, tr, td",
        any_of: &["vs", "set 1", "set 2"],
        require_digit: true,
    },
];

const TENNISEXPLORER_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css(
    ".match, .live-match, tr[data-match]",
)];
const FLASHSCORE_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css(
    ".event__match, .match-row, [data-testid*='match']",
)];
const LIVE_TENNIS_EU_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css(
    ".match-item, .live-match, .tennis-match",
)];
const BETSAPI_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css("table tr")];
const ESPN_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css(
    ".Table__TR, .scoreboard-row, .schedule-row, .match-row",
)];
const BBC_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css(
    ".sp-c-fixture, .live-match, .fixture-match, .match-fixture",
)];
const ATP_PATTERNS: &[SelectorPattern] = &[SelectorPattern::Css(
    ".scores-results-content, .live-score, .match-score, .upcoming-match, .match-schedule",
)];

#[must_use]
pub const fn tennis24() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://www.tennis24.com/"),
        upcoming_url: Some("https://www.tennis24.com/fixtures/"),
        participant_selector: Some(".event__participant, .participant__participantName"),
        tournament_selector: Some(".event__title"),
        ..site("tennis24", TENNIS24_PATTERNS)
    }
}

#[must_use]
pub const fn tennis_explorer() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://www.tennisexplorer.com/matches/"),
        ..site("tennisexplorer", TENNISEXPLORER_PATTERNS)
    }
}

#[must_use]
pub const fn flashscore() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://www.flashscore.com/tennis/"),
        participant_selector: Some(".participant__participantName, .team-name, .player-name"),
        ..site("flashscore", FLASHSCORE_PATTERNS)
    }
}

#[must_use]
pub const fn live_tennis_eu() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://live-tennis.eu/en"),
        ..site("live-tennis.eu", LIVE_TENNIS_EU_PATTERNS)
    }
}

#[must_use]
pub const fn betsapi_wimbledon() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://betsapi.com/l/11071/Wimbledon"),
        default_tournament: "Wimbledon 2025",
        default_venue: "All England Lawn Tennis Club",
        ..site("betsapi", BETSAPI_PATTERNS)
    }
}

#[must_use]
pub const fn espn() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://www.espn.com/tennis/scoreboard"),
        upcoming_url: Some("https://www.espn.com/tennis/schedule"),
        participant_selector: Some(".Table__TD .AnchorLink, .team-name, .competitor-name"),
        tournament_selector: Some(".tournament-name, .event-name, .competition-name"),
        ..site("espn", ESPN_PATTERNS)
    }
}

#[must_use]
pub const fn bbc_sport() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://www.bbc.com/sport/tennis/live-scores"),
        upcoming_url: Some("https://www.bbc.com/sport/tennis/fixtures"),
        participant_selector: Some(".sp-c-fixture__team-name, .team-name, .player-name"),
        tournament_selector: Some(".sp-c-fixture__competition"),
        ..site("bbc", BBC_PATTERNS)
    }
}

#[must_use]
pub const fn atp_tour() -> SiteConfig {
    SiteConfig {
        live_url: Some("https://www.atptour.com/en/scores/current"),
        upcoming_url: Some("https://www.atptour.com/en/scores/current"),
        participant_selector: Some(".player-name, .competitor, .athlete"),
        default_tournament: "ATP Tour",
        ..site("atp", ATP_PATTERNS)
    }
}

/// Scraped fallbacks for live queries, in cascade order.
#[must_use]
pub fn live_sites() -> Vec<SiteConfig> {
    vec![
        tennis24(),
        tennis_explorer(),
        flashscore(),
        live_tennis_eu(),
        betsapi_wimbledon(),
        espn(),
        bbc_sport(),
        atp_tour(),
    ]
}

/// Scraped fallbacks for upcoming queries, in cascade order.
#[must_use]
pub fn upcoming_sites() -> Vec<SiteConfig> {
    vec![tennis24(), espn(), bbc_sport(), atp_tour()]
}
