use warroom_protocol::{parse_query, NavigableTool, NavigationContext};

/// Parse a `navigate:<tool>[?<query>]` command emitted by the assistant.
///
/// Returns `None` unless the string carries the literal `navigate:` prefix
/// and names a tool from the closed set. A single leading slash on the
/// tool segment is tolerated (`navigate:/canvass` and `navigate:canvass`
/// are equivalent). Bad parameter values are omitted by the query parser,
/// never escalated to a failed parse.
#[must_use]
pub fn parse_navigate_command(command: &str) -> Option<NavigationContext> {
    let rest = command.strip_prefix("navigate:")?;
    let (tool_part, query) = match rest.split_once('?') {
        Some((tool, query)) => (tool, Some(query)),
        None => (rest, None),
    };
    let tool_name = tool_part.strip_prefix('/').unwrap_or(tool_part);
    let tool = NavigableTool::parse(tool_name)?;
    let params = query.map(parse_query).unwrap_or_default();
    Some(NavigationContext { tool, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use warroom_protocol::{to_query_string, ToolUrlParams, ViewMode};

    #[test]
    fn rejects_missing_prefix_and_unknown_tools() {
        assert_eq!(parse_navigate_command("go:segments"), None);
        assert_eq!(parse_navigate_command("navigate:not-a-real-tool"), None);
    }

    #[test]
    fn tolerates_a_single_leading_slash() {
        let parsed = parse_navigate_command("navigate:/canvass?precincts=P001").unwrap();
        assert_eq!(parsed.tool, NavigableTool::Canvass);
        assert_eq!(parsed.params.precincts, Some(vec!["P001".to_string()]));
    }

    #[test]
    fn bare_tool_parses_with_empty_params() {
        let parsed = parse_navigate_command("navigate:donors").unwrap();
        assert_eq!(parsed.tool, NavigableTool::Donors);
        assert_eq!(parsed.params, ToolUrlParams::default());
    }

    #[test]
    fn invalid_view_is_omitted_not_fatal() {
        let parsed = parse_navigate_command("navigate:donors?view=bogus").unwrap();
        assert_eq!(parsed.params.view, None);
    }

    #[test]
    fn invalid_numbers_are_omitted() {
        let parsed =
            parse_navigate_command("navigate:canvass?volunteers=some&year=2026").unwrap();
        assert_eq!(parsed.params.volunteers, None);
        assert_eq!(parsed.params.year, Some(2026));
    }

    #[test]
    fn command_round_trips_through_the_codec() {
        let params = ToolUrlParams {
            precincts: Some(vec!["P001".into(), "P002".into()]),
            segment: Some("high gotv".into()),
            view: Some(ViewMode::Committees),
            volunteers: Some(0),
            ..Default::default()
        };
        let command = format!("navigate:canvass{}", to_query_string(&params));
        let parsed = parse_navigate_command(&command).unwrap();
        assert_eq!(parsed.tool, NavigableTool::Canvass);
        assert_eq!(parsed.params, params);
    }
}
