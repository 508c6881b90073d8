//! Command executor for the live map.
//!
//! The bridge owns the canonical [`MapState`], drives an injected
//! [`MapView`] adapter, and broadcasts [`BridgeEvent`]s to whoever is
//! listening. Commands come from three places: typed callers, the
//! `[MAP:...]` directives the AI assistant embeds in its prose, and the
//! pure command builders.

mod bridge;
mod builders;
mod command;
mod events;
mod jurisdictions;
mod parse;
mod state;
mod view;

pub use bridge::{BridgeConfig, MapBridge};
pub use builders::{
    choropleth_command, fly_to_jurisdiction, heatmap_command, highlight_precincts,
};
pub use command::{FilterRange, HighlightStyle, HighlightTarget, MapCommand, OverlaySpec};
pub use events::{BridgeEvent, EventBus};
pub use jurisdictions::jurisdiction_center;
pub use parse::parse_commands_from_response;
pub use state::MapState;
pub use view::{MapView, MapViewError, ViewResult};
