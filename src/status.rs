use crate::model::{MatchStatus, QueryKind};

/// Map a source's status vocabulary onto [`MatchStatus`].
///
/// A description mentioning a retirement always wins: the match is over even
/// when the code still says it is in progress. Unknown or missing codes fall
/// back on the query context.
#[must_use]
pub fn classify(code: Option<&str>, description: Option<&str>, context: QueryKind) -> MatchStatus {
    if description.is_some_and(mentions_retirement) {
        return MatchStatus::Completed;
    }

    let code = code.map(|c| c.trim().to_lowercase()).unwrap_or_default();
    match code.as_str() {
        "finished" | "ended" => MatchStatus::Completed,
        "inprogress" | "live" => MatchStatus::Live,
        "postponed" => MatchStatus::Postponed,
        "cancelled" => MatchStatus::Cancelled,
        "notstarted" | "scheduled" => MatchStatus::Scheduled,
        _ => context_default(context),
    }
}

#[must_use]
pub fn context_default(context: QueryKind) -> MatchStatus {
    match context {
        QueryKind::Live => MatchStatus::Live,
        QueryKind::Upcoming | QueryKind::ByDate => MatchStatus::Scheduled,
    }
}

fn mentions_retirement(description: &str) -> bool {
    description.to_lowercase().contains("retired")
}
