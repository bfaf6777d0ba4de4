use gpolyutil::{split_url, Result};

/// The query parameters a routing request actually needs.
pub const DEFAULT_KEEP_KEYS: &[&str] = &["from", "to", "rb.veh", "transport_mode"];
pub const DEFAULT_SUFFIX: &str = "wt=json&clientid=mappy";

/// Rewrites a logged request as `{path}?{kept params}&{suffix}`, dropping the host and every
/// query parameter not in `keep`.
pub fn complete_url(url: &str, keep: &[&str], suffix: &str) -> Result<String> {
    let split = split_url(url, |key| keep.contains(&key))?;
    let query = split.query_string();
    Ok(match (query.is_empty(), suffix.is_empty()) {
        (false, false) => format!("{}?{}&{}", split.path, query, suffix),
        (false, true) => format!("{}?{}", split.path, query),
        (true, false) => format!("{}?{}", split.path, suffix),
        (true, true) => split.path,
    })
}
