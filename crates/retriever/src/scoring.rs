use crate::index::{CurrentIntelDocument, DataFileEntry, RagDocument};
use crate::time::year_of_unix_ms;

/// Signal weights. More distinct matching signals always means a higher
/// score; exact values only matter relative to each other.
const TITLE_MATCH: u32 = 3;
const TITLE_WORD_MATCH: u32 = 1;
const KEYWORD_MATCH: u32 = 2;
const USE_WHEN_MATCH: u32 = 1;
const INTEL_TAG_MATCH: u32 = 2;
const JURISDICTION_BOOST: u32 = 3;
const UPCOMING_BOOST: u32 = 2;

/// Words shorter than this are too common to count as title signals.
const MIN_SIGNAL_WORD_LEN: usize = 4;

pub fn score_document(query_lc: &str, doc: &RagDocument) -> u32 {
    let mut score = 0;

    let title_lc = doc.title.to_lowercase();
    if !title_lc.is_empty() && query_lc.contains(&title_lc) {
        score += TITLE_MATCH;
    } else {
        score += title_lc
            .split_whitespace()
            .filter(|w| w.len() >= MIN_SIGNAL_WORD_LEN && query_lc.contains(w))
            .count() as u32
            * TITLE_WORD_MATCH;
    }

    score += doc
        .keywords
        .iter()
        .filter(|k| query_lc.contains(&k.to_lowercase()))
        .count() as u32
        * KEYWORD_MATCH;

    score += doc
        .use_when
        .iter()
        .filter(|hint| query_lc.contains(&hint.to_lowercase()))
        .count() as u32
        * USE_WHEN_MATCH;

    score
}

pub fn data_file_matches(query_lc: &str, entry: &DataFileEntry) -> bool {
    if entry
        .use_for
        .iter()
        .any(|phrase| query_lc.contains(&phrase.to_lowercase()))
    {
        return true;
    }
    entry
        .description
        .to_lowercase()
        .split_whitespace()
        .any(|w| w.len() >= MIN_SIGNAL_WORD_LEN && query_lc.contains(w))
}

pub fn score_intel(
    query_lc: &str,
    jurisdiction: Option<&str>,
    now_ms: u64,
    doc: &CurrentIntelDocument,
) -> u32 {
    let mut score = 0;

    score += doc
        .keywords
        .iter()
        .filter(|k| query_lc.contains(&k.to_lowercase()))
        .count() as u32
        * INTEL_TAG_MATCH;

    score += doc
        .relevance
        .iter()
        .filter(|tag| query_lc.contains(&tag.to_lowercase()))
        .count() as u32
        * INTEL_TAG_MATCH;

    if let Some(jurisdiction) = jurisdiction {
        let wanted = jurisdiction.to_lowercase();
        if doc
            .jurisdictions
            .iter()
            .any(|j| j.to_lowercase() == wanted)
        {
            score += JURISDICTION_BOOST;
        }
    }

    if doc.doc_type.as_deref() == Some("upcoming") && is_forward_looking(query_lc, now_ms) {
        score += UPCOMING_BOOST;
    }

    score
}

/// Queries about the future: the word "upcoming" or a year token at or
/// past the current calendar year.
fn is_forward_looking(query_lc: &str, now_ms: u64) -> bool {
    if query_lc.contains("upcoming") {
        return true;
    }
    let current_year = year_of_unix_ms(now_ms);
    query_lc
        .split(|c: char| !c.is_ascii_digit())
        .filter(|token| token.len() == 4)
        .filter_map(|token| token.parse::<i32>().ok())
        .any(|year| year >= current_year)
}

/// Stable sort by score descending and truncate. Ties keep index order.
pub fn rank_and_truncate<T>(mut scored: Vec<(T, u32)>, max_items: usize) -> Vec<T> {
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(max_items);
    scored.into_iter().map(|(item, _)| item).collect()
}
