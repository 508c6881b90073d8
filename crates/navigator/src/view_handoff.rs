use log::debug;
use warroom_protocol::MapViewState;
use warroom_store::SessionStore;

/// Keys carrying the transient map view across a full page navigation.
const LAYER_KEY: &str = "warroom.mapview.layer";
const METRIC_KEY: &str = "warroom.mapview.metric";
const HIGHLIGHTS_KEY: &str = "warroom.mapview.highlights";
const CENTER_KEY: &str = "warroom.mapview.center";
const ZOOM_KEY: &str = "warroom.mapview.zoom";

const ALL_KEYS: [&str; 5] = [LAYER_KEY, METRIC_KEY, HIGHLIGHTS_KEY, CENTER_KEY, ZOOM_KEY];

/// Stash the current map view right before navigating away. Absent fields
/// clear any previously stashed value so a partial stash cannot mix with
/// an older one.
pub fn stash_map_view(store: &dyn SessionStore, view: &MapViewState) {
    set_or_remove(store, LAYER_KEY, view.layer.clone());
    set_or_remove(store, METRIC_KEY, view.metric.clone());
    set_or_remove(
        store,
        HIGHLIGHTS_KEY,
        if view.highlights.is_empty() {
            None
        } else {
            serde_json::to_string(&view.highlights).ok()
        },
    );
    set_or_remove(
        store,
        CENTER_KEY,
        view.center.and_then(|c| serde_json::to_string(&c).ok()),
    );
    set_or_remove(store, ZOOM_KEY, view.zoom.map(|z| z.to_string()));
}

fn set_or_remove(store: &dyn SessionStore, key: &str, value: Option<String>) {
    match value {
        Some(value) => store.set(key, &value),
        None => store.remove(key),
    }
}

/// Restore and consume a stashed map view. Returns `None` when nothing
/// usable was stashed; a malformed entry clears all keys so it is never
/// seen twice, matching the stale-context guard on the precinct handoff.
#[must_use]
pub fn restore_map_view(store: &dyn SessionStore) -> Option<MapViewState> {
    let layer = store.get(LAYER_KEY);
    let metric = store.get(METRIC_KEY);
    let highlights_raw = store.get(HIGHLIGHTS_KEY);
    let center_raw = store.get(CENTER_KEY);
    let zoom_raw = store.get(ZOOM_KEY);

    for key in ALL_KEYS {
        store.remove(key);
    }

    let highlights = match highlights_raw {
        Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(highlights) => highlights,
            Err(err) => {
                debug!("stashed highlights are malformed, dropping stash: {err}");
                return None;
            }
        },
        None => Vec::new(),
    };
    let center = match center_raw {
        Some(raw) => match serde_json::from_str::<[f64; 2]>(&raw) {
            Ok(center) => Some(center),
            Err(err) => {
                debug!("stashed center is malformed, dropping stash: {err}");
                return None;
            }
        },
        None => None,
    };
    let zoom = match zoom_raw {
        Some(raw) => match raw.parse::<f64>() {
            Ok(zoom) => Some(zoom),
            Err(_) => {
                debug!("stashed zoom is malformed, dropping stash");
                return None;
            }
        },
        None => None,
    };

    let state = MapViewState {
        layer,
        metric,
        highlights,
        center,
        zoom,
    };
    if state.is_empty() {
        None
    } else {
        Some(state)
    }
}
