use crate::params::ToolUrlParams;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The closed set of top-level tool pages a navigation command may target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NavigableTool {
    Segments,
    Donors,
    Canvass,
    Compare,
    PoliticalAi,
}

impl NavigableTool {
    pub const ALL: [NavigableTool; 5] = [
        NavigableTool::Segments,
        NavigableTool::Donors,
        NavigableTool::Canvass,
        NavigableTool::Compare,
        NavigableTool::PoliticalAi,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NavigableTool::Segments => "segments",
            NavigableTool::Donors => "donors",
            NavigableTool::Canvass => "canvass",
            NavigableTool::Compare => "compare",
            NavigableTool::PoliticalAi => "political-ai",
        }
    }

    /// Router path for the tool page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            NavigableTool::Segments => "/segments",
            NavigableTool::Donors => "/donors",
            NavigableTool::Canvass => "/canvass",
            NavigableTool::Compare => "/compare",
            NavigableTool::PoliticalAi => "/political-ai",
        }
    }

    /// Strict lookup against the closed set. Unrecognized names return
    /// `None`; callers treat that as "not a navigation target".
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for NavigableTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed navigation intent: which tool to open and with what parameters.
/// Produced by parsing a `navigate:` command and consumed immediately by
/// the router call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct NavigationContext {
    pub tool: NavigableTool,
    pub params: ToolUrlParams,
}
