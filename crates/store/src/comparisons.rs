use crate::session::SessionStore;
use log::warn;
use warroom_protocol::SavedComparison;

const COMPARISONS_KEY: &str = "warroom.saved-comparisons";

/// Load the full saved-comparison list. A missing or corrupt entry reads
/// as an empty list.
#[must_use]
pub fn saved_comparisons(store: &dyn SessionStore) -> Vec<SavedComparison> {
    let Some(raw) = store.get(COMPARISONS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(err) => {
            warn!("saved comparisons entry is corrupt, dropping: {err}");
            Vec::new()
        }
    }
}

fn persist(store: &dyn SessionStore, list: &[SavedComparison]) {
    match serde_json::to_string(list) {
        Ok(encoded) => store.set(COMPARISONS_KEY, &encoded),
        Err(err) => warn!("failed to encode saved comparisons: {err}"),
    }
}

/// Append one comparison. The whole list is read-modify-written, matching
/// the single-key local-storage layout; a comparison with an id already in
/// the list replaces the earlier record.
pub fn save_comparison(store: &dyn SessionStore, comparison: SavedComparison) {
    let mut list = saved_comparisons(store);
    list.retain(|c| c.id != comparison.id);
    list.push(comparison);
    persist(store, &list);
}

/// Remove one comparison by id. Returns whether anything was removed.
pub fn delete_comparison(store: &dyn SessionStore, id: &str) -> bool {
    let mut list = saved_comparisons(store);
    let before = list.len();
    list.retain(|c| c.id != id);
    let removed = list.len() != before;
    if removed {
        persist(store, &list);
    }
    removed
}

pub fn clear_comparisons(store: &dyn SessionStore) {
    store.remove(COMPARISONS_KEY);
}
