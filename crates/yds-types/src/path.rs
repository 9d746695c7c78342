//! Element-path expressions.
//!
//! An element path addresses an element within a working directory tree.
//! It is an ordered sequence of segments, each either a *property*
//! segment (bare name, dot-separated) or an *index* segment (bracketed
//! name or integer):
//!
//! ```text
//! model.address.city
//! model.phones[2]
//! [first].rest
//! ```
//!
//! A leading `.` is tolerated (`.a.b` equals `a.b`), and `a.b` and
//! `a[b]` address the same element. The empty path addresses the working
//! directory's own object document.

/// Split an element path into its segments.
///
/// Returns `None` when the path grammar is malformed: an empty segment,
/// an unterminated bracket, or a stray delimiter inside a segment.
/// The empty path is the caller's concern and also returns `None` here.
///
/// # Examples
///
/// ```
/// use yds_types::parse_segments;
///
/// assert_eq!(parse_segments("a.b"), Some(vec!["a".into(), "b".into()]));
/// assert_eq!(parse_segments("a[0].c"), Some(vec!["a".into(), "0".into(), "c".into()]));
/// assert_eq!(parse_segments(".a"), Some(vec!["a".into()]));
/// assert_eq!(parse_segments("a[0"), None);
/// assert_eq!(parse_segments("a..b"), None);
/// ```
pub fn parse_segments(path: &str) -> Option<Vec<String>> {
    let mut rest = path;
    // A single leading dot is ignored.
    if let Some(stripped) = rest.strip_prefix('.') {
        rest = stripped;
    }
    let mut segments = Vec::new();
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('[') {
            let end = after.find(']')?;
            let segment = &after[..end];
            if segment.is_empty() || segment.contains(['.', '[', ']']) {
                return None;
            }
            segments.push(segment.to_string());
            rest = &after[end + 1..];
        } else {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let segment = &rest[..end];
            if segment.is_empty() || segment.contains(']') {
                return None;
            }
            segments.push(segment.to_string());
            rest = &rest[end..];
        }
        // Consume the dot separating this segment from the next; a
        // trailing dot leaves an empty final segment and is malformed.
        if let Some(stripped) = rest.strip_prefix('.') {
            if stripped.is_empty() {
                return None;
            }
            rest = stripped;
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Split an element path into `(parent_path, child_key)`.
///
/// The last `.`-segment or last bracketed segment is the child; the rest
/// is the parent. A single-segment path has the empty parent path, which
/// addresses the working directory's own document.
///
/// # Examples
///
/// ```
/// use yds_types::split_parent;
///
/// assert_eq!(split_parent("model.address.city"), ("model.address".into(), "city".into()));
/// assert_eq!(split_parent("model.phones[2]"), ("model.phones".into(), "2".into()));
/// assert_eq!(split_parent("model"), ("".into(), "model".into()));
/// ```
pub fn split_parent(path: &str) -> (String, String) {
    if path.ends_with(']') {
        if let Some(open) = path.rfind('[') {
            let parent = &path[..open];
            let child = &path[open + 1..path.len() - 1];
            return (parent.to_string(), child.to_string());
        }
    }
    if let Some(dot) = path.rfind('.') {
        (path[..dot].to_string(), path[dot + 1..].to_string())
    } else {
        (String::new(), path.to_string())
    }
}
