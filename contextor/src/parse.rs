//! Splits a model reply into the answer body and its citations.
//!
//! The reply format is requested by [`crate::prompt`] but never enforced by
//! the model, so parsing is lenient and has no failure path: anything it
//! cannot read simply yields fewer citations.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::api_types::Citation;

/// Separates the answer body from the citation list.
pub const SOURCES_MARKER: &str = "Sources:";
/// Label in front of the url on each citation line.
pub const SOURCE_LABEL: &str = "Source:";
/// Label in front of the quote on each citation line.
pub const TEXT_LABEL: &str = "Text:";

/// Placeholder text for urls scraped from the answer body.
pub const FALLBACK_LINK_TEXT: &str = "Link referenced in answer.";

/// `URL: <url>, Text: <quote>` or `Source: <url>, Text: <quote>`, optionally
/// behind a `-`, `*` or `1.` list marker.
static CITATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[-*]|\d+[.)])?\s*(?:URL|Source)\s*:\s*(\S+),\s*Text\s*:\s*(.*)$")
        .expect("valid citation regex")
});

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

const QUOTES: &[char] = &['"', '\u{201C}', '\u{201D}'];
const URL_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '>', '"', '\'', '*'];

/// Answer body and citations extracted from a raw model reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub answer: String,
    pub links: Vec<Citation>,
}

/// Parse a raw model reply.
///
/// 1. Everything before the first `Sources:` (trimmed) is the answer.
/// 2. Each line after the marker matching the citation pattern becomes a
///    [`Citation`], with surrounding whitespace and quotes trimmed from the text.
/// 3. If no line matched, every bare `http(s)://` url in the answer becomes a
///    citation with [`FALLBACK_LINK_TEXT`].
///
/// # Example
/// ```
/// use contextor::parse_answer;
/// let p = parse_answer("Answer text\nSources:\nSource: http://a, Text: \"quote\"");
/// assert_eq!(p.answer, "Answer text");
/// assert_eq!(p.links[0].url, "http://a");
/// assert_eq!(p.links[0].text, "quote");
/// ```
pub fn parse_answer(raw: &str) -> ParsedAnswer {
    let (body, sources) = match raw.split_once(SOURCES_MARKER) {
        Some((body, rest)) => (body, Some(rest)),
        None => (raw, None),
    };
    let answer = body.trim().to_string();

    let mut links: Vec<Citation> = sources
        .map(|s| {
            s.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .filter_map(parse_citation_line)
                .collect()
        })
        .unwrap_or_default();

    if links.is_empty() {
        links = scrape_urls(&answer);
    }

    ParsedAnswer { answer, links }
}

fn parse_citation_line(line: &str) -> Option<Citation> {
    let caps = CITATION_LINE.captures(line)?;
    let url = caps
        .get(1)?
        .as_str()
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim_end_matches(',');
    if url.is_empty() {
        return None;
    }
    let text = caps
        .get(2)
        .map(|m| m.as_str().trim().trim_matches(QUOTES).trim())
        .unwrap_or_default();
    Some(Citation::new(url, text))
}

fn scrape_urls(answer: &str) -> Vec<Citation> {
    let mut seen = HashSet::new();
    BARE_URL
        .find_iter(answer)
        .map(|m| m.as_str().trim_end_matches(URL_TRAILING))
        .filter(|u| !u.ends_with("://"))
        .filter(|u| seen.insert(*u))
        .map(|u| Citation::new(u, FALLBACK_LINK_TEXT))
        .collect()
}
