use warroom_protocol::{to_query_string, NavigableTool, ToolUrlParams};

/// Router path for a tool plus its encoded parameters.
#[must_use]
pub fn build_url(tool: NavigableTool, params: &ToolUrlParams) -> String {
    format!("{}{}", tool.path(), to_query_string(params))
}

/// The `navigate:` command string the assistant emits to request a
/// cross-tool jump. Inverse of [`crate::parse_navigate_command`].
#[must_use]
pub fn build_navigate_command(tool: NavigableTool, params: &ToolUrlParams) -> String {
    format!("navigate:{}{}", tool.as_str(), to_query_string(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_combines_path_and_query() {
        let params = ToolUrlParams {
            precincts: Some(vec!["P001".into(), "P002".into()]),
            segment: Some("high-gotv".into()),
            ..Default::default()
        };
        assert_eq!(
            build_url(NavigableTool::Canvass, &params),
            "/canvass?precincts=P001,P002&segment=high-gotv"
        );
    }

    #[test]
    fn empty_params_yield_a_bare_path() {
        assert_eq!(
            build_url(NavigableTool::Donors, &ToolUrlParams::default()),
            "/donors"
        );
        assert_eq!(
            build_navigate_command(NavigableTool::Donors, &ToolUrlParams::default()),
            "navigate:donors"
        );
    }
}
