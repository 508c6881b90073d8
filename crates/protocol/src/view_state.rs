use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Transient map view state stashed by a page right before a cross-tool
/// navigation and restored once by the receiving page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MapViewState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl MapViewState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layer.is_none()
            && self.metric.is_none()
            && self.highlights.is_empty()
            && self.center.is_none()
            && self.zoom.is_none()
    }
}
