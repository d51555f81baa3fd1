//! String path algebra over `/`-separated paths.
//!
//! These helpers work on plain strings rather than `std::path::Path` because
//! the inputs are provider document paths and device mount points, which are
//! always `/`-separated regardless of the host platform.

/// The path separator.
pub const SEPARATOR: char = '/';

/// Join path segments with exactly one separator between them.
///
/// Empty segments are dropped and the result carries no trailing separator. A
/// leading separator on the first segment is kept, so absolute paths stay
/// absolute. A result made only of separators collapses to `/`.
///
/// ```rust
/// use volpath_core::path::join;
///
/// assert_eq!(join(&["/storage/emulated/0", "Documents/"]), "/storage/emulated/0/Documents");
/// assert_eq!(join(&["a/", "b"]), "a/b");
/// assert_eq!(join::<&str>(&[]), "");
/// ```
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();

    for segment in segments.iter().map(AsRef::as_ref).filter(|s| !s.is_empty()) {
        if joined.is_empty() {
            joined.push_str(segment);
            continue;
        }

        let tail = segment.trim_start_matches(SEPARATOR);
        if tail.is_empty() {
            continue;
        }

        joined.truncate(joined.trim_end_matches(SEPARATOR).len());
        joined.push(SEPARATOR);
        joined.push_str(tail);
    }

    let end = joined.trim_end_matches(SEPARATOR).len();
    if end == 0 && !joined.is_empty() {
        return SEPARATOR.to_string();
    }
    joined.truncate(end);
    joined
}

/// Go up one level.
///
/// A single trailing separator is ignored, so `a/b/c/` and `a/b/c` share the
/// parent `a/b`. Returns an empty string when no separator remains.
pub fn parent(path: &str) -> String {
    let stripped = path.strip_suffix(SEPARATOR).unwrap_or(path);
    match stripped.rfind(SEPARATOR) {
        Some(index) => stripped[..index].to_string(),
        None => String::new(),
    }
}

/// The part of `descendant` below `ancestor`.
///
/// # Panics
///
/// `descendant` must start with `ancestor` followed by a separator. Debug
/// builds assert this; release builds panic only when the slice is out of
/// range.
pub fn relative(ancestor: &str, descendant: &str) -> String {
    debug_assert!(
        descendant.starts_with(ancestor)
            && descendant[ancestor.len()..].starts_with(SEPARATOR),
        "{:?} is not below {:?}",
        descendant,
        ancestor
    );
    descendant[ancestor.len() + 1..].to_string()
}

/// Plain prefix test: does `child` start with `parent`?
pub fn is_child_of(child: &str, parent: &str) -> bool {
    child.starts_with(parent)
}

/// The last segment of a path (the whole input when it has no separator).
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Strip every trailing separator.
pub fn trim_trailing_separators(path: &str) -> &str {
    path.trim_end_matches(SEPARATOR)
}

/// Collapse separator runs and drop the trailing separator.
///
/// A path made only of separators normalizes to `/`.
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for c in path.chars() {
        if c == SEPARATOR {
            if !previous_was_separator {
                normalized.push(c);
            }
            previous_was_separator = true;
        } else {
            normalized.push(c);
            previous_was_separator = false;
        }
    }
    if normalized.len() > 1 && normalized.ends_with(SEPARATOR) {
        normalized.pop();
    }
    normalized
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9._-]{1,8}"
    }

    proptest! {
        /// Two separator-free segments join with exactly one separator.
        #[test]
        fn prop_join_pair(a in segment(), b in segment()) {
            prop_assert_eq!(join(&[&a, &b]), format!("{}/{}", a, b));
        }

        /// Regrouping non-empty segment lists does not change the result.
        #[test]
        fn prop_join_associative(
            a in prop::collection::vec(segment(), 1..4),
            b in prop::collection::vec(segment(), 1..4),
            c in prop::collection::vec(segment(), 1..4),
        ) {
            let left = join(&[join(&[join(&a), join(&b)]), join(&c)]);
            let right = join(&[join(&a), join(&[join(&b), join(&c)])]);
            let flat: Vec<String> = a.iter().chain(&b).chain(&c).cloned().collect();
            prop_assert_eq!(&left, &right);
            prop_assert_eq!(&left, &join(&flat));
        }

        /// The parent of a joined path is the join of everything but the last segment.
        #[test]
        fn prop_parent_of_join(parts in prop::collection::vec(segment(), 1..6)) {
            let full = join(&parts);
            prop_assert_eq!(parent(&full), join(&parts[..parts.len() - 1]));
            prop_assert_eq!(parent(&format!("{}/", full)), join(&parts[..parts.len() - 1]));
        }

        /// `relative` undoes `join` with an ancestor.
        #[test]
        fn prop_relative_of_join(
            ancestor in prop::collection::vec(segment(), 1..4),
            rest in prop::collection::vec(segment(), 1..4),
        ) {
            let ancestor = join(&ancestor);
            let rest = join(&rest);
            prop_assert_eq!(relative(&ancestor, &join(&[&ancestor, &rest])), rest);
        }
    }
}
