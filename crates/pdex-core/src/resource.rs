//! Upstream resource-URL handling.

/// Derive a catalog id from a canonical resource URL.
///
/// The list endpoint identifies entries only by URL, with the id as the
/// trailing numeric path segment (`.../pokemon/25/`). This function is
/// the single place that depends on that shape.
pub fn id_from_resource_url(url: &str) -> Option<u32> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    segment.parse::<u32>().ok().filter(|id| *id > 0)
}
