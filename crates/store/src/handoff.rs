use crate::session::SessionStore;
use crate::unix_now_ms;
use log::debug;
use serde::{Deserialize, Serialize};
use warroom_protocol::NavigableTool;

/// Storage keys for the cross-tool precinct handoff. Written by the page
/// being navigated away from, consumed exactly once by the receiving page.
const SOURCE_KEY: &str = "warroom.handoff.source";
const PRECINCTS_KEY: &str = "warroom.handoff.precincts";
const TIMESTAMP_KEY: &str = "warroom.handoff.timestamp";

/// Entries older than this are stale and ignored; a navigation that sat in
/// a background tab for hours must not resurrect an old selection.
pub const HANDOFF_FRESHNESS_MS: u64 = 2 * 60 * 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrossToolHandoff {
    pub source: NavigableTool,
    pub precincts: Vec<String>,
    pub written_at_unix_ms: u64,
}

pub fn write_handoff(store: &dyn SessionStore, source: NavigableTool, precincts: &[String]) {
    let encoded = serde_json::to_string(precincts).unwrap_or_else(|_| "[]".to_string());
    store.set(SOURCE_KEY, source.as_str());
    store.set(PRECINCTS_KEY, &encoded);
    store.set(TIMESTAMP_KEY, &unix_now_ms().to_string());
}

/// Read and consume the handoff record. Returns `None` when absent, stale
/// (older than [`HANDOFF_FRESHNESS_MS`]), or unparseable; the keys are
/// cleared in every one of those cases so a bad record is never read twice.
#[must_use]
pub fn read_handoff(store: &dyn SessionStore) -> Option<CrossToolHandoff> {
    let result = read_handoff_at(store, unix_now_ms());
    clear_handoff(store);
    result
}

fn read_handoff_at(store: &dyn SessionStore, now_ms: u64) -> Option<CrossToolHandoff> {
    let source = NavigableTool::parse(&store.get(SOURCE_KEY)?)?;
    let written_at: u64 = store.get(TIMESTAMP_KEY)?.parse().ok()?;
    if now_ms.saturating_sub(written_at) > HANDOFF_FRESHNESS_MS {
        debug!("cross-tool handoff from {source} is stale, ignoring");
        return None;
    }
    let precincts: Vec<String> = serde_json::from_str(&store.get(PRECINCTS_KEY)?).ok()?;
    Some(CrossToolHandoff {
        source,
        precincts,
        written_at_unix_ms: written_at,
    })
}

pub fn clear_handoff(store: &dyn SessionStore) {
    store.remove(SOURCE_KEY);
    store.remove(PRECINCTS_KEY);
    store.remove(TIMESTAMP_KEY);
}
