//! Process-wide application state shared across tool pages: per-tool
//! context records, the current tool, and the exploration log the AI
//! assistant uses for continuity. Fan-out to subscribers is synchronous;
//! listeners are side-effect-only and get an immutable snapshot.

mod manager;

pub use manager::{StateEvent, StateManager, StateSnapshot, Subscription};
