use crate::urls::build_navigate_command;
use serde_json::{json, Value};
use warroom_protocol::{NavigableTool, ToolUrlParams};

/// Context fields the suggestion table keys on. Pages fill in whatever
/// their tool knows; absent fields simply suppress the suggestions that
/// need them.
#[derive(Debug, Clone, Default)]
pub struct CrossToolContext {
    pub segment_name: Option<String>,
    pub matching_precincts: Vec<String>,
    pub top_zips: Vec<String>,
    pub turf_precincts: Vec<String>,
    pub left_entity: Option<String>,
    pub right_entity: Option<String>,
}

/// A "continue in another tool" suggestion: a human label, a `navigate:`
/// action string, and metadata for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub label: String,
    pub action: String,
    pub metadata: Value,
}

/// Fixed decision table from (source tool, available context) to
/// follow-up suggestions. A source with nothing usable yields an empty
/// list; this never fails.
#[must_use]
pub fn continue_in_suggestions(
    source: NavigableTool,
    context: &CrossToolContext,
) -> Vec<Suggestion> {
    match source {
        NavigableTool::Segments => from_segments(context),
        NavigableTool::Donors => from_donors(context),
        NavigableTool::Canvass => from_canvass(context),
        NavigableTool::Compare => from_compare(context),
        NavigableTool::PoliticalAi => Vec::new(),
    }
}

fn from_segments(context: &CrossToolContext) -> Vec<Suggestion> {
    if context.matching_precincts.is_empty() {
        return Vec::new();
    }
    let segment = context
        .segment_name
        .clone()
        .unwrap_or_else(|| "current".to_string());
    let params = ToolUrlParams {
        precincts: Some(context.matching_precincts.clone()),
        segment: Some(segment.clone()),
        ..Default::default()
    };
    vec![
        Suggestion {
            label: "Continue in Canvassing".to_string(),
            action: build_navigate_command(NavigableTool::Canvass, &params),
            metadata: json!({
                "source": "segments",
                "segment": segment,
                "precinctCount": context.matching_precincts.len(),
            }),
        },
        Suggestion {
            label: "Analyze donors in these precincts".to_string(),
            action: build_navigate_command(
                NavigableTool::Donors,
                &ToolUrlParams {
                    precincts: Some(context.matching_precincts.clone()),
                    ..Default::default()
                },
            ),
            metadata: json!({
                "source": "segments",
                "precinctCount": context.matching_precincts.len(),
            }),
        },
    ]
}

fn from_donors(context: &CrossToolContext) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    if context.top_zips.len() >= 2 {
        let params = ToolUrlParams {
            left: Some(context.top_zips[0].clone()),
            right: Some(context.top_zips[1].clone()),
            ..Default::default()
        };
        suggestions.push(Suggestion {
            label: format!(
                "Compare {} vs {}",
                context.top_zips[0], context.top_zips[1]
            ),
            action: build_navigate_command(NavigableTool::Compare, &params),
            metadata: json!({ "source": "donors", "boundaryType": "zips" }),
        });
    }
    if !context.top_zips.is_empty() {
        let params = ToolUrlParams {
            zips: Some(context.top_zips.clone()),
            ..Default::default()
        };
        suggestions.push(Suggestion {
            label: "Build a segment from these ZIPs".to_string(),
            action: build_navigate_command(NavigableTool::Segments, &params),
            metadata: json!({ "source": "donors", "zipCount": context.top_zips.len() }),
        });
    }
    suggestions
}

fn from_canvass(context: &CrossToolContext) -> Vec<Suggestion> {
    if context.turf_precincts.is_empty() {
        return Vec::new();
    }
    let params = ToolUrlParams {
        precincts: Some(context.turf_precincts.clone()),
        ..Default::default()
    };
    vec![Suggestion {
        label: "Ask the AI about these turfs".to_string(),
        action: build_navigate_command(NavigableTool::PoliticalAi, &params),
        metadata: json!({
            "source": "canvass",
            "precinctCount": context.turf_precincts.len(),
        }),
    }]
}

fn from_compare(context: &CrossToolContext) -> Vec<Suggestion> {
    let (Some(left), Some(right)) = (&context.left_entity, &context.right_entity) else {
        return Vec::new();
    };
    let params = ToolUrlParams {
        left: Some(left.clone()),
        right: Some(right.clone()),
        ..Default::default()
    };
    vec![Suggestion {
        label: "Ask the AI to explain this comparison".to_string(),
        action: build_navigate_command(NavigableTool::PoliticalAi, &params),
        metadata: json!({ "source": "compare" }),
    }]
}
