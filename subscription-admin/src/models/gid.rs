//! Global resource ids (`gid://shopify/<Type>/<id>`).

const GID_PREFIX: &str = "gid://shopify/";

/// Build a GID from a resource type and numeric id.
pub fn compose_gid(kind: &str, id: u64) -> String {
    format!("{}{}/{}", GID_PREFIX, kind, id)
}

/// Extract the trailing id from a GID, dropping any query string.
///
/// Values that are not GIDs are returned unchanged.
pub fn parse_gid(gid: &str) -> &str {
    let Some(rest) = gid.strip_prefix(GID_PREFIX) else {
        return gid;
    };
    let rest = rest.split('?').next().unwrap_or(rest);
    rest.rsplit('/').next().unwrap_or(rest)
}

/// Numeric id of a GID, when the trailing segment is numeric.
pub fn parse_numeric_gid(gid: &str) -> Option<u64> {
    parse_gid(gid).parse().ok()
}
