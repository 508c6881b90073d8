use crate::command::{HighlightStyle, HighlightTarget, MapCommand};

/// Fly to a named jurisdiction; the bridge resolves the centroid at
/// execution time so an unknown name degrades to the default center.
#[must_use]
pub fn fly_to_jurisdiction(name: &str, zoom: Option<f64>) -> MapCommand {
    MapCommand::FlyTo {
        center: None,
        bounds: None,
        target: Some(name.to_string()),
        zoom,
        animation: None,
    }
}

/// Highlight a set of precincts with the default gold style unless a
/// custom style is given.
#[must_use]
pub fn highlight_precincts(ids: Vec<String>, style: Option<HighlightStyle>) -> MapCommand {
    MapCommand::Highlight {
        target: HighlightTarget::Many(ids),
        style: Some(style.unwrap_or_default()),
    }
}

/// Heatmap over the precinct layer unless another layer is named.
#[must_use]
pub fn heatmap_command(metric: &str, layer: Option<&str>) -> MapCommand {
    MapCommand::ShowHeatmap {
        metric: metric.to_string(),
        layer: layer.unwrap_or("precincts").to_string(),
        style: None,
    }
}

/// Choropleth with a sequential scale by default; pass `diverging` for
/// metrics centered on a midpoint (e.g. partisan lean).
#[must_use]
pub fn choropleth_command(metric: &str, layer: Option<&str>, diverging: bool) -> MapCommand {
    MapCommand::ShowChoropleth {
        metric: metric.to_string(),
        layer: layer.unwrap_or("precincts").to_string(),
        style: Some(if diverging { "diverging" } else { "sequential" }.to_string()),
    }
}
