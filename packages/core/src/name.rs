//! Display names for references.

use crate::handle::{HandleScheme, TreeHandle};
use crate::path;
use crate::DisplayNameResolver;

/// A human-facing file name for `reference`.
///
/// `content` references are looked up through `metadata` first. When that
/// misses, or for any other scheme, the last segment of the decoded path is
/// used. Returns `None` only when the reference is not a URI or its path is
/// not valid UTF-8.
pub fn display_name(reference: &str, metadata: &dyn DisplayNameResolver) -> Option<String> {
    let handle = TreeHandle::parse(reference).ok()?;

    if handle.scheme() == HandleScheme::Content {
        if let Some(name) = metadata.resolve_display_name(reference) {
            return Some(name);
        }
    }

    let decoded = handle.decoded_path().ok()?;
    Some(path::file_name(&decoded).to_string())
}
