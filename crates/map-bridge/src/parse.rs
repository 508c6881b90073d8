use crate::command::{HighlightTarget, MapCommand};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static MAP_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[MAP:([A-Za-z]+)\s*([^\]]*)\]").expect("map directive regex"));

/// Scan assistant prose for `[MAP:<verb> <args>]` directives and return
/// the recognized commands in order of appearance. Unrecognized verbs and
/// malformed arguments are skipped; a bad directive never breaks the
/// surrounding text.
#[must_use]
pub fn parse_commands_from_response(text: &str) -> Vec<MapCommand> {
    MAP_DIRECTIVE
        .captures_iter(text)
        .filter_map(|caps| {
            let verb = caps.get(1).map_or("", |m| m.as_str());
            let args = caps.get(2).map_or("", |m| m.as_str()).trim();
            parse_directive(verb, args)
        })
        .collect()
}

fn parse_directive(verb: &str, args: &str) -> Option<MapCommand> {
    match verb {
        "flyTo" => {
            if args.is_empty() {
                return None;
            }
            Some(MapCommand::FlyTo {
                center: None,
                bounds: None,
                target: Some(args.to_string()),
                zoom: None,
                animation: None,
            })
        }
        "highlight" => {
            let ids: Vec<String> = args
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if ids.is_empty() {
                return None;
            }
            Some(MapCommand::Highlight {
                target: HighlightTarget::Many(ids),
                style: None,
            })
        }
        "heatmap" => {
            if args.is_empty() {
                return None;
            }
            Some(MapCommand::ShowHeatmap {
                metric: args.to_string(),
                layer: "precincts".to_string(),
                style: None,
            })
        }
        "zoom" => match args.parse::<f64>() {
            Ok(level) => Some(MapCommand::Zoom { zoom: Some(level) }),
            Err(_) => {
                debug!("skipping zoom directive with non-numeric level {args:?}");
                None
            }
        },
        "clear" => Some(MapCommand::Clear),
        other => {
            debug!("skipping unrecognized map directive verb {other:?}");
            None
        }
    }
}
