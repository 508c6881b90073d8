//! Shared types for the warroom cross-tool core.
//!
//! Everything here is plain data: the tool/view enums, the URL parameter
//! bag and its query-string codec, and the records exchanged between the
//! navigator, the state manager, and the stores. No I/O lives in this
//! crate.

mod params;
mod records;
mod tool;
mod view_state;

pub use params::{has_params, parse_query, to_query_string, ToolUrlParams, ViewMode};
pub use records::{ExplorationEntry, SavedComparison};
pub use tool::{NavigableTool, NavigationContext};
pub use view_state::MapViewState;
