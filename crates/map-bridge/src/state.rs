use crate::command::{FilterRange, OverlaySpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical map state, owned exclusively by the bridge and read through
/// defensive clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MapState {
    pub center: [f64; 2],
    pub zoom: f64,
    /// Most recent highlights, newest last, capped by the bridge config.
    pub highlighted_features: Vec<String>,
    pub filters: BTreeMap<String, FilterRange>,
    /// Set semantics: membership matters, insertion order does not.
    pub visible_layers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap: Option<OverlaySpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choropleth: Option<OverlaySpec>,
}

impl MapState {
    #[must_use]
    pub fn at(center: [f64; 2], zoom: f64) -> Self {
        Self {
            center,
            zoom,
            highlighted_features: Vec::new(),
            filters: BTreeMap::new(),
            visible_layers: Vec::new(),
            heatmap: None,
            choropleth: None,
        }
    }
}
