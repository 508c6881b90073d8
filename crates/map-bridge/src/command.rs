use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Highlight styling forwarded to the adapter's graphics layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStyle {
    pub fill_color: String,
    pub outline_color: String,
    pub outline_width: f64,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            fill_color: "rgba(255, 215, 0, 0.35)".to_string(),
            outline_color: "#FFD700".to_string(),
            outline_width: 2.0,
        }
    }
}

/// A highlight command accepts one id or a list of ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum HighlightTarget {
    One(String),
    Many(Vec<String>),
}

impl HighlightTarget {
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        match self {
            HighlightTarget::One(id) => vec![id.clone()],
            HighlightTarget::Many(ids) => ids.clone(),
        }
    }
}

/// Half-open numeric range applied to a metric filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FilterRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Heatmap/choropleth specification. The slot in [`crate::MapState`] is
/// replaced wholesale, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct OverlaySpec {
    pub metric: String,
    pub layer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// A single discrete map command. Constructed by a parser or a caller,
/// executed once by the bridge, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MapCommand {
    /// Go to an explicit zoom level, or one level in from the current one.
    Zoom {
        #[serde(skip_serializing_if = "Option::is_none")]
        zoom: Option<f64>,
    },
    /// Recenter without changing zoom. A pan with no center is a no-op.
    Pan {
        #[serde(skip_serializing_if = "Option::is_none")]
        center: Option<[f64; 2]>,
    },
    /// Animated navigation. Center precedence: explicit `center`, then the
    /// midpoint of `bounds` (`[west, south, east, north]`), then the
    /// centroid of the named `target` jurisdiction, then the default.
    FlyTo {
        #[serde(skip_serializing_if = "Option::is_none")]
        center: Option<[f64; 2]>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bounds: Option<[f64; 4]>,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        zoom: Option<f64>,
        /// `Some(false)` forces a zero-duration transition.
        #[serde(skip_serializing_if = "Option::is_none")]
        animation: Option<bool>,
    },
    Highlight {
        target: HighlightTarget,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<HighlightStyle>,
    },
    ClearHighlight,
    Filter {
        metric: String,
        data: FilterRange,
    },
    /// With a metric, removes that filter only; without, clears them all.
    ClearFilter {
        #[serde(skip_serializing_if = "Option::is_none")]
        metric: Option<String>,
    },
    ShowLayer {
        layer: String,
    },
    HideLayer {
        layer: String,
    },
    ShowHeatmap {
        metric: String,
        layer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    ShowChoropleth {
        metric: String,
        layer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    /// Reset highlights, filters, layers, and overlays, then fly home.
    Clear,
}

impl MapCommand {
    /// Short name used in logs and `command-executed` events.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            MapCommand::Zoom { .. } => "zoom",
            MapCommand::Pan { .. } => "pan",
            MapCommand::FlyTo { .. } => "flyTo",
            MapCommand::Highlight { .. } => "highlight",
            MapCommand::ClearHighlight => "clearHighlight",
            MapCommand::Filter { .. } => "filter",
            MapCommand::ClearFilter { .. } => "clearFilter",
            MapCommand::ShowLayer { .. } => "showLayer",
            MapCommand::HideLayer { .. } => "hideLayer",
            MapCommand::ShowHeatmap { .. } => "showHeatmap",
            MapCommand::ShowChoropleth { .. } => "showChoropleth",
            MapCommand::Clear => "clear",
        }
    }
}
