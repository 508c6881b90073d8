use crate::tool::NavigableTool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user-saved side-by-side comparison, persisted locally as a list under
/// a single storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SavedComparison {
    pub id: String,
    pub left_entity_id: String,
    pub right_entity_id: String,
    pub left_entity_name: String,
    pub right_entity_name: String,
    /// Granularity of the compared entities (precincts, municipalities,
    /// state house districts, ...).
    pub boundary_type: String,
    pub saved_at_unix_ms: u64,
}

/// One entry in the exploration log the state manager keeps so the AI
/// assistant can reconstruct what the user has been doing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ExplorationEntry {
    pub tool: NavigableTool,
    pub action: String,
    pub timestamp_unix_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}
