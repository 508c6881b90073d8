use crate::command::HighlightStyle;
use async_trait::async_trait;
use thiserror::Error;

/// Failure surfaced by the external map adapter. The bridge converts
/// these into `error` events; they never propagate to command callers.
#[derive(Error, Debug)]
#[error("map view error: {0}")]
pub struct MapViewError(pub String);

pub type ViewResult = std::result::Result<(), MapViewError>;

/// Adapter over the live GIS view. Implementations wrap the rendering
/// SDK; tests use a recording mock.
#[async_trait]
pub trait MapView: Send + Sync {
    /// Navigate to `center` at `zoom` over `duration_ms` (zero means an
    /// instant jump).
    async fn go_to(&self, center: [f64; 2], zoom: f64, duration_ms: u64) -> ViewResult;

    /// Replace the highlight graphics with `ids` (clear-then-add).
    async fn set_highlights(&self, ids: &[String], style: &HighlightStyle) -> ViewResult;

    /// Remove all highlight graphics.
    async fn clear_graphics(&self) -> ViewResult;

    /// Current camera position, sampled when the view is registered.
    fn current_center(&self) -> [f64; 2];
    fn current_zoom(&self) -> f64;
}
