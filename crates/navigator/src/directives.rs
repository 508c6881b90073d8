use log::debug;
use serde_json::Value;

/// A structured UI side effect requested inline by the assistant, e.g.
/// `[ACTION:setComparison:{"left":"P001","right":"P002"}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDirective {
    pub action_type: String,
    pub payload: Value,
}

/// Parse the trailing `[ACTION:<type>:<json>]` directive out of assistant
/// text, returning the directive and the text with it stripped.
///
/// At most one directive is honored per response and it must be the final
/// non-whitespace content; a directive buried mid-text is left alone so
/// it renders as prose rather than silently firing. Malformed JSON means
/// no directive.
#[must_use]
pub fn parse_action_directive(text: &str) -> Option<(ActionDirective, String)> {
    let trimmed = text.trim_end();
    if !trimmed.ends_with(']') {
        return None;
    }
    let start = trimmed.rfind("[ACTION:")?;
    let directive = &trimmed[start..];
    let inner = directive
        .strip_prefix("[ACTION:")?
        .strip_suffix(']')?;
    let (action_type, json) = inner.split_once(':')?;
    if action_type.is_empty() || action_type.contains(char::is_whitespace) {
        return None;
    }
    let payload = match serde_json::from_str(json) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("ignoring action directive with malformed JSON: {err}");
            return None;
        }
    };
    let stripped = trimmed[..start].trim_end().to_string();
    Some((
        ActionDirective {
            action_type: action_type.to_string(),
            payload,
        },
        stripped,
    ))
}
