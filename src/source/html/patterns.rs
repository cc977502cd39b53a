use ahash::AHashSet;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Text scans skip anything longer than this; a match container is a row,
/// not a page section.
const MAX_SCAN_TEXT: usize = 240;

/// One way of locating match containers on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorPattern {
    /// A CSS selector (comma lists allowed).
    Css(&'static str),
    /// Every element under `scope` whose text contains one of `any_of`
    /// (case-insensitive), optionally also a digit.
    TextScan {
        scope: &'static str,
        any_of: &'static [&'static str],
        require_digit: bool,
    },
}

impl SelectorPattern {
    fn selector(&self) -> &'static str {
        match self {
            SelectorPattern::Css(css) => css,
            SelectorPattern::TextScan { scope, .. } => scope,
        }
    }

    fn is_text_scan(&self) -> bool {
        matches!(self, SelectorPattern::TextScan { .. })
    }

    fn accepts(&self, text: &str) -> bool {
        match self {
            SelectorPattern::Css(_) => true,
            SelectorPattern::TextScan {
                any_of,
                require_digit,
                ..
            } => {
                if text.len() > MAX_SCAN_TEXT {
                    return false;
                }
                let lower = text.to_lowercase();
                any_of.iter().any(|needle| lower.contains(needle))
                    && (!require_digit || lower.chars().any(|c| c.is_ascii_digit()))
            }
        }
    }
}

/// Collapsed, single-spaced text content of an element.
#[must_use]
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `patterns` in order, gathering distinct elements, and stop after the
/// first pattern that brings the total to `enough`. Patterns whose selector
/// does not parse are logged and skipped.
///
/// A text scan never takes an element that contains another accepted one;
/// the innermost rows win over their wrappers.
#[must_use]
pub fn collect_elements<'a>(
    doc: &'a Html,
    patterns: &[SelectorPattern],
    enough: usize,
) -> Vec<ElementRef<'a>> {
    let mut seen = AHashSet::new();
    let mut found = Vec::new();

    for pattern in patterns {
        let selector = match Selector::parse(pattern.selector()) {
            Ok(selector) => selector,
            Err(e) => {
                warn!(selector = pattern.selector(), "invalid selector: {e}");
                continue;
            }
        };

        let before = found.len();
        let candidates: Vec<ElementRef<'a>> = doc
            .select(&selector)
            .filter(|el| pattern.accepts(&element_text(*el)))
            .collect();
        let nested: AHashSet<_> = if pattern.is_text_scan() {
            let accepted: AHashSet<_> = candidates.iter().map(|&el| (*el).id()).collect();
            candidates
                .iter()
                .filter(|&&el| {
                    (*el)
                        .descendants()
                        .skip(1)
                        .any(|n| accepted.contains(&n.id()) || seen.contains(&n.id()))
                })
                .map(|&el| (*el).id())
                .collect()
        } else {
            AHashSet::new()
        };

        for el in candidates {
            // Node identity, not the `id` attribute.
            let node = (*el).id();
            if !nested.contains(&node) && seen.insert(node) {
                found.push(el);
            }
        }
        debug!(
            selector = pattern.selector(),
            matched = found.len() - before,
            "selector pattern evaluated"
        );

        if found.len() >= enough {
            break;
        }
    }
    found
}

/// Text of the first element under `scope` matching `css`, if any.
#[must_use]
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    all_texts(scope, css).into_iter().next()
}

/// Non-empty texts of every element under `scope` matching `css`.
#[must_use]
pub fn all_texts(scope: ElementRef<'_>, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        warn!(selector = css, "invalid selector");
        return Vec::new();
    };
    scope
        .select(&selector)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}
