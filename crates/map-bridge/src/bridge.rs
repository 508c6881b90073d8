use crate::command::{FilterRange, HighlightStyle, HighlightTarget, MapCommand, OverlaySpec};
use crate::events::{BridgeEvent, EventBus};
use crate::jurisdictions::jurisdiction_center;
use crate::state::MapState;
use crate::view::MapView;
use log::debug;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    pub default_center: [f64; 2],
    pub default_zoom: f64,
    pub animation_duration_ms: u64,
    /// Most-recent highlights kept; older ones are dropped to bound
    /// memory and render cost.
    pub highlight_cap: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_center: [-84.55, 42.6],
            default_zoom: 10.0,
            animation_duration_ms: 800,
            highlight_cap: 100,
        }
    }
}

/// Executor for discrete map commands.
///
/// One bridge is constructed at application start and shared; the map
/// adapter is injected once the view mounts. Commands never return errors
/// to the caller: a missing precondition is a logged no-op and an adapter
/// rejection becomes an [`BridgeEvent::Error`].
pub struct MapBridge {
    config: BridgeConfig,
    state: Mutex<MapState>,
    view: Mutex<Option<Arc<dyn MapView>>>,
    events: EventBus,
}

impl MapBridge {
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            state: Mutex::new(MapState::at(config.default_center, config.default_zoom)),
            view: Mutex::new(None),
            events: EventBus::new(),
            config,
        }
    }

    /// Register the live map adapter, syncing its current camera into the
    /// bridge state rather than overwriting the camera with defaults.
    pub fn set_map_view(&self, view: Arc<dyn MapView>) {
        {
            let mut state = self.state.lock().expect("map state lock");
            state.center = view.current_center();
            state.zoom = view.current_zoom();
        }
        *self.view.lock().expect("map view lock") = Some(view);
    }

    pub fn clear_map_view(&self) {
        *self.view.lock().expect("map view lock") = None;
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.view.lock().expect("map view lock").is_some()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    /// Defensive copy; callers cannot mutate bridge state through it.
    #[must_use]
    pub fn get_state(&self) -> MapState {
        self.state.lock().expect("map state lock").clone()
    }

    #[must_use]
    pub fn get_highlighted_features(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("map state lock")
            .highlighted_features
            .clone()
    }

    /// Test-isolation hook: back to defaults, adapter deregistered.
    pub fn reset(&self) {
        self.clear_map_view();
        *self.state.lock().expect("map state lock") =
            MapState::at(self.config.default_center, self.config.default_zoom);
    }

    /// Execute a batch strictly in order. Each command is fully settled,
    /// adapter call and events included, before the next begins.
    pub async fn execute_commands(&self, commands: &[MapCommand]) {
        for command in commands {
            self.execute_command(command).await;
        }
    }

    pub async fn execute_command(&self, command: &MapCommand) {
        match command {
            MapCommand::Zoom { zoom } => self.zoom(*zoom).await,
            MapCommand::Pan { center } => self.pan(*center).await,
            MapCommand::FlyTo {
                center,
                bounds,
                target,
                zoom,
                animation,
            } => {
                self.fly_to(*center, *bounds, target.as_deref(), *zoom, *animation)
                    .await;
            }
            MapCommand::Highlight { target, style } => self.highlight(target, style.as_ref()).await,
            MapCommand::ClearHighlight => self.clear_highlight().await,
            MapCommand::Filter { metric, data } => self.apply_filter(metric, *data),
            MapCommand::ClearFilter { metric } => self.clear_filter(metric.as_deref()),
            MapCommand::ShowLayer { layer } => self.set_layer_visible(layer, true),
            MapCommand::HideLayer { layer } => self.set_layer_visible(layer, false),
            MapCommand::ShowHeatmap {
                metric,
                layer,
                style,
            } => self.set_heatmap(metric, layer, style.clone()),
            MapCommand::ShowChoropleth {
                metric,
                layer,
                style,
            } => self.set_choropleth(metric, layer, style.clone()),
            MapCommand::Clear => self.clear_all().await,
        }
        self.events.emit(BridgeEvent::CommandExecuted {
            command: command.clone(),
        });
    }

    fn registered_view(&self) -> Option<Arc<dyn MapView>> {
        self.view.lock().expect("map view lock").clone()
    }

    fn emit_state(&self) {
        self.emit_state_with_style(None);
    }

    fn emit_state_with_style(&self, highlight_style: Option<HighlightStyle>) {
        self.events.emit(BridgeEvent::StateChanged {
            state: self.get_state(),
            highlight_style,
        });
    }

    async fn go_to(&self, view: &Arc<dyn MapView>, center: [f64; 2], zoom: f64, duration_ms: u64) {
        if let Err(err) = view.go_to(center, zoom, duration_ms).await {
            self.events.emit(BridgeEvent::Error {
                message: err.to_string(),
            });
        }
    }

    async fn zoom(&self, level: Option<f64>) {
        let Some(view) = self.registered_view() else {
            debug!("zoom ignored: no map view registered");
            return;
        };
        let (center, target) = {
            let mut state = self.state.lock().expect("map state lock");
            let target = level.unwrap_or(state.zoom + 1.0);
            state.zoom = target;
            (state.center, target)
        };
        self.go_to(&view, center, target, self.config.animation_duration_ms)
            .await;
        self.emit_state();
    }

    async fn pan(&self, center: Option<[f64; 2]>) {
        let Some(center) = center else {
            debug!("pan ignored: no center given");
            return;
        };
        let Some(view) = self.registered_view() else {
            debug!("pan ignored: no map view registered");
            return;
        };
        let zoom = {
            let mut state = self.state.lock().expect("map state lock");
            state.center = center;
            state.zoom
        };
        self.go_to(&view, center, zoom, self.config.animation_duration_ms)
            .await;
        self.emit_state();
    }

    async fn fly_to(
        &self,
        center: Option<[f64; 2]>,
        bounds: Option<[f64; 4]>,
        target: Option<&str>,
        zoom: Option<f64>,
        animation: Option<bool>,
    ) {
        let Some(view) = self.registered_view() else {
            debug!("flyTo ignored: no map view registered");
            return;
        };
        let resolved_center = center
            .or_else(|| bounds.map(|b| [(b[0] + b[2]) / 2.0, (b[1] + b[3]) / 2.0]))
            .or_else(|| target.and_then(jurisdiction_center))
            .unwrap_or(self.config.default_center);
        let resolved_zoom = zoom.unwrap_or(self.config.default_zoom);
        let duration = if animation == Some(false) {
            0
        } else {
            self.config.animation_duration_ms
        };
        {
            let mut state = self.state.lock().expect("map state lock");
            state.center = resolved_center;
            state.zoom = resolved_zoom;
        }
        self.go_to(&view, resolved_center, resolved_zoom, duration).await;
        self.emit_state();
    }

    async fn highlight(&self, target: &HighlightTarget, style: Option<&HighlightStyle>) {
        let current = {
            let mut state = self.state.lock().expect("map state lock");
            state.highlighted_features.extend(target.ids());
            let len = state.highlighted_features.len();
            if len > self.config.highlight_cap {
                state
                    .highlighted_features
                    .drain(..len - self.config.highlight_cap);
            }
            state.highlighted_features.clone()
        };
        if let Some(view) = self.registered_view() {
            let effective = style.cloned().unwrap_or_default();
            if let Err(err) = view.set_highlights(&current, &effective).await {
                self.events.emit(BridgeEvent::Error {
                    message: err.to_string(),
                });
            }
        }
        self.emit_state_with_style(style.cloned());
    }

    async fn clear_highlight(&self) {
        self.state
            .lock()
            .expect("map state lock")
            .highlighted_features
            .clear();
        if let Some(view) = self.registered_view() {
            if let Err(err) = view.clear_graphics().await {
                self.events.emit(BridgeEvent::Error {
                    message: err.to_string(),
                });
            }
        }
        self.emit_state();
    }

    fn apply_filter(&self, metric: &str, data: FilterRange) {
        self.state
            .lock()
            .expect("map state lock")
            .filters
            .insert(metric.to_string(), data);
        self.emit_state();
    }

    fn clear_filter(&self, metric: Option<&str>) {
        {
            let mut state = self.state.lock().expect("map state lock");
            match metric {
                Some(metric) => {
                    state.filters.remove(metric);
                }
                None => state.filters.clear(),
            }
        }
        self.emit_state();
    }

    fn set_layer_visible(&self, layer: &str, visible: bool) {
        {
            let mut state = self.state.lock().expect("map state lock");
            if visible {
                if !state.visible_layers.iter().any(|l| l == layer) {
                    state.visible_layers.push(layer.to_string());
                }
            } else {
                state.visible_layers.retain(|l| l != layer);
            }
        }
        self.emit_state();
    }

    fn set_heatmap(&self, metric: &str, layer: &str, style: Option<String>) {
        self.state.lock().expect("map state lock").heatmap = Some(OverlaySpec {
            metric: metric.to_string(),
            layer: layer.to_string(),
            style,
        });
        self.emit_state();
    }

    fn set_choropleth(&self, metric: &str, layer: &str, style: Option<String>) {
        self.state.lock().expect("map state lock").choropleth = Some(OverlaySpec {
            metric: metric.to_string(),
            layer: layer.to_string(),
            style,
        });
        self.emit_state();
    }

    async fn clear_all(&self) {
        {
            let mut state = self.state.lock().expect("map state lock");
            state.highlighted_features.clear();
            state.filters.clear();
            state.visible_layers.clear();
            state.heatmap = None;
            state.choropleth = None;
            state.center = self.config.default_center;
            state.zoom = self.config.default_zoom;
        }
        if let Some(view) = self.registered_view() {
            if let Err(err) = view.clear_graphics().await {
                self.events.emit(BridgeEvent::Error {
                    message: err.to_string(),
                });
            }
            self.go_to(
                &view,
                self.config.default_center,
                self.config.default_zoom,
                self.config.animation_duration_ms,
            )
            .await;
        }
        self.emit_state();
    }
}

impl Default for MapBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MapViewError, ViewResult};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        GoTo { center: [f64; 2], zoom: f64, duration_ms: u64 },
        SetHighlights(Vec<String>),
        ClearGraphics,
    }

    #[derive(Default)]
    struct RecordingView {
        calls: Mutex<Vec<Call>>,
        fail: bool,
    }

    impl RecordingView {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MapView for RecordingView {
        async fn go_to(&self, center: [f64; 2], zoom: f64, duration_ms: u64) -> ViewResult {
            if self.fail {
                return Err(MapViewError("goTo rejected".to_string()));
            }
            self.calls.lock().unwrap().push(Call::GoTo {
                center,
                zoom,
                duration_ms,
            });
            Ok(())
        }

        async fn set_highlights(&self, ids: &[String], _style: &HighlightStyle) -> ViewResult {
            self.calls
                .lock()
                .unwrap()
                .push(Call::SetHighlights(ids.to_vec()));
            Ok(())
        }

        async fn clear_graphics(&self) -> ViewResult {
            self.calls.lock().unwrap().push(Call::ClearGraphics);
            Ok(())
        }

        fn current_center(&self) -> [f64; 2] {
            [-84.5, 42.7]
        }

        fn current_zoom(&self) -> f64 {
            11.0
        }
    }

    fn bridge_with_view() -> (MapBridge, Arc<RecordingView>) {
        let bridge = MapBridge::new(BridgeConfig::default());
        let view = Arc::new(RecordingView::default());
        bridge.set_map_view(Arc::clone(&view) as Arc<dyn MapView>);
        (bridge, view)
    }

    #[tokio::test]
    async fn set_map_view_samples_camera() {
        let (bridge, _view) = bridge_with_view();
        let state = bridge.get_state();
        assert_eq!(state.center, [-84.5, 42.7]);
        assert_eq!(state.zoom, 11.0);
        assert!(bridge.is_ready());
    }

    #[tokio::test]
    async fn highlight_caps_at_most_recent_hundred() {
        let (bridge, _view) = bridge_with_view();
        let targets: Vec<String> = (0..150).map(|i| format!("P{i:03}")).collect();
        bridge
            .execute_command(&MapCommand::Highlight {
                target: HighlightTarget::Many(targets),
                style: None,
            })
            .await;

        let highlighted = bridge.get_highlighted_features();
        assert_eq!(highlighted.len(), 100);
        assert_eq!(highlighted.first().unwrap(), "P050");
        assert_eq!(highlighted.last().unwrap(), "P149");
    }

    #[tokio::test]
    async fn highlight_appends_across_commands() {
        let (bridge, view) = bridge_with_view();
        for id in ["P001", "P002"] {
            bridge
                .execute_command(&MapCommand::Highlight {
                    target: HighlightTarget::One(id.to_string()),
                    style: None,
                })
                .await;
        }
        assert_eq!(bridge.get_highlighted_features(), vec!["P001", "P002"]);
        // Adapter sees the full replacement list each time.
        assert_eq!(
            view.calls().last().unwrap(),
            &Call::SetHighlights(vec!["P001".to_string(), "P002".to_string()])
        );
    }

    #[tokio::test]
    async fn batch_executes_strictly_in_order() {
        let (bridge, view) = bridge_with_view();
        bridge
            .execute_commands(&[
                MapCommand::Zoom { zoom: Some(12.0) },
                MapCommand::Zoom { zoom: Some(14.0) },
                MapCommand::Zoom { zoom: Some(16.0) },
            ])
            .await;
        let zooms: Vec<f64> = view
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::GoTo { zoom, .. } => Some(*zoom),
                _ => None,
            })
            .collect();
        assert_eq!(zooms, vec![12.0, 14.0, 16.0]);
    }

    #[tokio::test]
    async fn zoom_without_level_steps_in_by_one() {
        let (bridge, _view) = bridge_with_view();
        bridge.execute_command(&MapCommand::Zoom { zoom: None }).await;
        assert_eq!(bridge.get_state().zoom, 12.0);
    }

    #[tokio::test]
    async fn pan_without_center_is_a_no_op() {
        let (bridge, view) = bridge_with_view();
        bridge.execute_command(&MapCommand::Pan { center: None }).await;
        assert!(view.calls().is_empty());
    }

    #[tokio::test]
    async fn camera_commands_without_view_resolve_silently() {
        let bridge = MapBridge::new(BridgeConfig::default());
        bridge.execute_command(&MapCommand::Zoom { zoom: Some(15.0) }).await;
        bridge
            .execute_command(&MapCommand::Pan {
                center: Some([-84.4, 42.7]),
            })
            .await;
        // No view registered: the camera is untouched.
        assert_eq!(bridge.get_state().zoom, 10.0);
    }

    #[tokio::test]
    async fn fly_to_bounds_midpoint_beats_named_target() {
        let (bridge, view) = bridge_with_view();
        bridge
            .execute_command(&MapCommand::FlyTo {
                center: None,
                bounds: Some([-84.8, 42.5, -84.3, 42.9]),
                target: Some("lansing".to_string()),
                zoom: None,
                animation: None,
            })
            .await;
        assert_eq!(
            view.calls(),
            vec![Call::GoTo {
                center: [-84.55, 42.7],
                zoom: 10.0,
                duration_ms: 800,
            }]
        );
    }

    #[tokio::test]
    async fn fly_to_named_jurisdiction_and_no_animation() {
        let (bridge, view) = bridge_with_view();
        bridge
            .execute_command(&MapCommand::FlyTo {
                center: None,
                bounds: None,
                target: Some("East Lansing".to_string()),
                zoom: Some(13.0),
                animation: Some(false),
            })
            .await;
        assert_eq!(
            view.calls(),
            vec![Call::GoTo {
                center: [-84.4839, 42.737],
                zoom: 13.0,
                duration_ms: 0,
            }]
        );
    }

    #[tokio::test]
    async fn layer_visibility_is_idempotent() {
        let (bridge, _view) = bridge_with_view();
        for _ in 0..2 {
            bridge
                .execute_command(&MapCommand::ShowLayer {
                    layer: "precincts".to_string(),
                })
                .await;
        }
        assert_eq!(bridge.get_state().visible_layers, vec!["precincts"]);
        for _ in 0..2 {
            bridge
                .execute_command(&MapCommand::HideLayer {
                    layer: "precincts".to_string(),
                })
                .await;
        }
        assert!(bridge.get_state().visible_layers.is_empty());
    }

    #[tokio::test]
    async fn filter_upserts_and_clears_by_metric() {
        let (bridge, _view) = bridge_with_view();
        bridge
            .execute_command(&MapCommand::Filter {
                metric: "turnout".to_string(),
                data: FilterRange {
                    min: Some(0.4),
                    max: None,
                },
            })
            .await;
        bridge
            .execute_command(&MapCommand::Filter {
                metric: "donations".to_string(),
                data: FilterRange {
                    min: None,
                    max: Some(500.0),
                },
            })
            .await;
        bridge
            .execute_command(&MapCommand::ClearFilter {
                metric: Some("turnout".to_string()),
            })
            .await;
        let state = bridge.get_state();
        assert_eq!(state.filters.len(), 1);
        assert!(state.filters.contains_key("donations"));

        bridge.execute_command(&MapCommand::ClearFilter { metric: None }).await;
        assert!(bridge.get_state().filters.is_empty());
    }

    #[tokio::test]
    async fn clear_resets_everything_and_flies_home() {
        let (bridge, view) = bridge_with_view();
        bridge
            .execute_command(&MapCommand::Highlight {
                target: HighlightTarget::Many(vec!["P001".to_string(), "P002".to_string()]),
                style: None,
            })
            .await;
        bridge
            .execute_command(&MapCommand::Filter {
                metric: "turnout".to_string(),
                data: FilterRange::default(),
            })
            .await;
        bridge.execute_command(&MapCommand::Clear).await;

        let state = bridge.get_state();
        assert_eq!(state.highlighted_features.len(), 0);
        assert!(state.filters.is_empty());
        assert_eq!(state.center, [-84.55, 42.6]);
        assert_eq!(state.zoom, 10.0);
        assert_eq!(
            view.calls().last().unwrap(),
            &Call::GoTo {
                center: [-84.55, 42.6],
                zoom: 10.0,
                duration_ms: 800,
            }
        );
    }

    #[tokio::test]
    async fn heatmap_slot_is_replaced_wholesale() {
        let (bridge, _view) = bridge_with_view();
        bridge
            .execute_command(&MapCommand::ShowHeatmap {
                metric: "turnout".to_string(),
                layer: "precincts".to_string(),
                style: Some("warm".to_string()),
            })
            .await;
        bridge
            .execute_command(&MapCommand::ShowHeatmap {
                metric: "donations".to_string(),
                layer: "zips".to_string(),
                style: None,
            })
            .await;
        let heatmap = bridge.get_state().heatmap.unwrap();
        assert_eq!(heatmap.metric, "donations");
        assert_eq!(heatmap.layer, "zips");
        assert_eq!(heatmap.style, None);
    }

    #[tokio::test]
    async fn adapter_rejection_becomes_error_event() {
        let bridge = MapBridge::new(BridgeConfig::default());
        bridge.set_map_view(Arc::new(RecordingView::failing()) as Arc<dyn MapView>);
        let mut events = bridge.subscribe();

        bridge.execute_command(&MapCommand::Zoom { zoom: Some(12.0) }).await;

        let mut saw_error = false;
        while let Ok(event) = events.try_recv() {
            if let BridgeEvent::Error { message } = event {
                assert!(message.contains("goTo rejected"));
                saw_error = true;
            }
        }
        assert!(saw_error);
    }

    #[tokio::test]
    async fn state_changed_events_carry_snapshots() {
        let (bridge, _view) = bridge_with_view();
        let mut events = bridge.subscribe();
        bridge
            .execute_command(&MapCommand::ShowLayer {
                layer: "turfs".to_string(),
            })
            .await;

        let mut saw_state = false;
        while let Ok(event) = events.try_recv() {
            if let BridgeEvent::StateChanged { state, .. } = event {
                assert_eq!(state.visible_layers, vec!["turfs"]);
                saw_state = true;
            }
        }
        assert!(saw_state);
    }

    #[tokio::test]
    async fn highlight_state_event_forwards_the_command_style() {
        let (bridge, _view) = bridge_with_view();
        let mut events = bridge.subscribe();
        let style = HighlightStyle {
            fill_color: "rgba(0, 0, 255, 0.2)".to_string(),
            outline_color: "#0000FF".to_string(),
            outline_width: 1.0,
        };
        bridge
            .execute_command(&MapCommand::Highlight {
                target: HighlightTarget::One("P001".to_string()),
                style: Some(style.clone()),
            })
            .await;
        bridge
            .execute_command(&MapCommand::ShowLayer {
                layer: "precincts".to_string(),
            })
            .await;

        let mut styles = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let BridgeEvent::StateChanged { highlight_style, .. } = event {
                styles.push(highlight_style);
            }
        }
        // The highlight change carries the command style; the layer change
        // carries none.
        assert_eq!(styles, vec![Some(style), None]);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let (bridge, _view) = bridge_with_view();
        bridge
            .execute_command(&MapCommand::ShowLayer {
                layer: "precincts".to_string(),
            })
            .await;
        bridge.reset();
        assert!(!bridge.is_ready());
        assert_eq!(
            bridge.get_state(),
            MapState::at([-84.55, 42.6], 10.0)
        );
    }
}
