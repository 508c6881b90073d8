//! Key-value stores standing in for browser session/local storage, plus
//! the two persistence concerns layered on them: the short-lived
//! cross-tool handoff record and the saved-comparison list.

mod comparisons;
mod error;
mod handoff;
mod session;

pub use comparisons::{clear_comparisons, delete_comparison, save_comparison, saved_comparisons};
pub use error::{Result, StoreError};
pub use handoff::{
    clear_handoff, read_handoff, write_handoff, CrossToolHandoff, HANDOFF_FRESHNESS_MS,
};
pub use session::{FileStore, MemoryStore, SessionStore};

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the unix epoch.
#[must_use]
pub fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
