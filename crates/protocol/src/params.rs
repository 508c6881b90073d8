use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Named dashboard views accepted by the `view` parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub enum ViewMode {
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "timeSeries")]
    TimeSeries,
    #[serde(rename = "occupations")]
    Occupations,
    #[serde(rename = "committees")]
    Committees,
    #[serde(rename = "ies")]
    Ies,
    #[serde(rename = "lapsed")]
    Lapsed,
    #[serde(rename = "upgrade")]
    Upgrade,
}

impl ViewMode {
    pub const ALL: [ViewMode; 7] = [
        ViewMode::Zip,
        ViewMode::TimeSeries,
        ViewMode::Occupations,
        ViewMode::Committees,
        ViewMode::Ies,
        ViewMode::Lapsed,
        ViewMode::Upgrade,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewMode::Zip => "zip",
            ViewMode::TimeSeries => "timeSeries",
            ViewMode::Occupations => "occupations",
            ViewMode::Committees => "committees",
            ViewMode::Ies => "ies",
            ViewMode::Lapsed => "lapsed",
            ViewMode::Upgrade => "upgrade",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

/// Flat bag of optional URL parameters passed between tool pages.
///
/// Absent fields are omitted from any serialized form; zero and the empty
/// string are valid values and survive a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ToolUrlParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precincts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turfs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volunteers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

/// Percent-encode a scalar value for a query string.
fn encode_scalar(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Comma-join an array and percent-encode the joined string as a unit.
/// Commas stay literal so the receiving side can split on them; a comma
/// inside an individual member is therefore not separable. Known
/// limitation, kept for symmetry with the page-level URL hooks.
fn encode_array(values: &[String]) -> String {
    let joined = values.join(",");
    urlencoding::encode(&joined).replace("%2C", ",")
}

/// Serialize a parameter bag to `?k=v&k2=v2...`.
///
/// `None` fields and empty arrays are dropped. Returns `""` when nothing
/// survives filtering.
#[must_use]
pub fn to_query_string(params: &ToolUrlParams) -> String {
    let mut pairs: Vec<String> = Vec::new();

    push_array(&mut pairs, "precincts", params.precincts.as_deref());
    push_array(&mut pairs, "zips", params.zips.as_deref());
    push_array(&mut pairs, "turfs", params.turfs.as_deref());

    push_scalar(&mut pairs, "segment", params.segment.as_deref());
    if let Some(view) = params.view {
        pairs.push(format!("view={}", view.as_str()));
    }
    push_scalar(&mut pairs, "left", params.left.as_deref());
    push_scalar(&mut pairs, "right", params.right.as_deref());
    push_scalar(&mut pairs, "filter", params.filter.as_deref());
    push_scalar(&mut pairs, "metric", params.metric.as_deref());

    push_number(&mut pairs, "volunteers", params.volunteers);
    push_number(&mut pairs, "year", params.year);
    push_number(&mut pairs, "month", params.month);

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// Whether anything was passed at all.
///
/// This is a presence check, not a validity check: a field holding an
/// empty array still counts. Serializing such a bag may yield `""` even
/// though `has_params` returned true; that asymmetry is deliberate and
/// matched to the page-level callers.
#[must_use]
pub fn has_params(params: &ToolUrlParams) -> bool {
    params.precincts.is_some()
        || params.zips.is_some()
        || params.turfs.is_some()
        || params.segment.is_some()
        || params.view.is_some()
        || params.left.is_some()
        || params.right.is_some()
        || params.filter.is_some()
        || params.metric.is_some()
        || params.volunteers.is_some()
        || params.year.is_some()
        || params.month.is_some()
}

fn push_array(pairs: &mut Vec<String>, key: &str, values: Option<&[String]>) {
    if let Some(values) = values {
        if !values.is_empty() {
            pairs.push(format!("{key}={}", encode_array(values)));
        }
    }
}

fn push_scalar(pairs: &mut Vec<String>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push(format!("{key}={}", encode_scalar(value)));
    }
}

fn push_number(pairs: &mut Vec<String>, key: &str, value: Option<u32>) {
    if let Some(value) = value {
        pairs.push(format!("{key}={value}"));
    }
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(Cow::into_owned)
}

/// Split a raw (still-encoded) array value on commas, decode each segment,
/// and drop segments that decode to the empty string.
fn parse_array(raw: &str) -> Option<Vec<String>> {
    let values: Vec<String> = raw
        .split(',')
        .filter_map(decode)
        .filter(|s| !s.is_empty())
        .collect();
    Some(values)
}

/// Parse a query string (with or without the leading `?`) back into a
/// parameter bag. Unknown keys are ignored; a value that fails its
/// type-specific parse (bad number, unrecognized view) is omitted rather
/// than treated as an error.
#[must_use]
pub fn parse_query(query: &str) -> ToolUrlParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = ToolUrlParams::default();
    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let Some((key, raw)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "precincts" => params.precincts = parse_array(raw),
            "zips" => params.zips = parse_array(raw),
            "turfs" => params.turfs = parse_array(raw),
            "segment" => params.segment = decode(raw),
            "view" => params.view = decode(raw).and_then(|v| ViewMode::parse(&v)),
            "left" => params.left = decode(raw),
            "right" => params.right = decode(raw),
            "filter" => params.filter = decode(raw),
            "metric" => params.metric = decode(raw),
            "volunteers" => params.volunteers = parse_number(raw),
            "year" => params.year = parse_number(raw),
            "month" => params.month = parse_number(raw),
            _ => {}
        }
    }
    params
}

fn parse_number(raw: &str) -> Option<u32> {
    decode(raw).and_then(|v| v.parse().ok())
}
