/// Centroids for the jurisdictions the assistant refers to by name.
/// Lookup is case-insensitive; unknown names fall through to the
/// configured default center.
const JURISDICTIONS: &[(&str, [f64; 2])] = &[
    ("ingham county", [-84.55, 42.6]),
    ("lansing", [-84.5555, 42.7325]),
    ("east lansing", [-84.4839, 42.737]),
    ("meridian township", [-84.4194, 42.7118]),
    ("delhi township", [-84.5708, 42.634]),
    ("delta township", [-84.6651, 42.7218]),
    ("williamston", [-84.2831, 42.6889]),
    ("mason", [-84.4436, 42.5792]),
    ("okemos", [-84.4275, 42.7223]),
    ("haslett", [-84.4011, 42.747]),
    ("holt", [-84.5153, 42.6406]),
    ("michigan", [-84.5, 44.25]),
];

#[must_use]
pub fn jurisdiction_center(name: &str) -> Option<[f64; 2]> {
    let needle = name.trim().to_lowercase();
    JURISDICTIONS
        .iter()
        .find(|(key, _)| *key == needle)
        .map(|(_, center)| *center)
}
