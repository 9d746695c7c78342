//! The element value model.
//!
//! An [`Element`] is the universal in-memory value of the store: an object
//! (ordered key→value mapping), a list (ordered sequence), a scalar
//! (string, number, boolean, null), or a *complex string* — a string
//! containing a line break, semantically a scalar but stored out-of-line
//! in its own file.
//!
//! `serde_yaml::Value` backs the model directly: its `Mapping` preserves
//! insertion order, which the store relies on for exact round-tripping.

/// The universal in-memory value.
///
/// Elements exist only transiently: created by the loader or supplied by
/// a caller to the store writer. Nothing is cached between operations.
pub type Element = serde_yaml::Value;

/// Parse a reference token, returning its payload.
///
/// A reference token is the literal scalar string `((payload))`, standing
/// in for a non-scalar or complex-string child inside a document. The
/// payload is a filename relative to the document's directory.
///
/// This is the single parse function for the token grammar; every
/// component detects tokens through it.
///
/// # Examples
///
/// ```
/// use yds_types::reference_payload;
///
/// assert_eq!(reference_payload("((bio))"), Some("bio"));
/// assert_eq!(reference_payload("((sub/_this.yaml))"), Some("sub/_this.yaml"));
/// assert_eq!(reference_payload("plain"), None);
/// assert_eq!(reference_payload("(())"), Some(""));
/// ```
pub fn reference_payload(raw: &str) -> Option<&str> {
    raw.strip_prefix("((").and_then(|s| s.strip_suffix("))"))
}

/// Format a payload as a reference token: `payload` → `((payload))`.
pub fn reference_token(payload: &str) -> String {
    format!("(({payload}))")
}

/// Whether a value is a complex string: a string containing a line break.
pub fn is_complex_string(value: &Element) -> bool {
    value.as_str().is_some_and(|s| s.contains('\n'))
}

/// Whether a value is written inline into its parent document.
///
/// Scalars, nulls, simple strings, and *empty* containers stay inline;
/// complex strings and non-empty containers go out-of-line behind a
/// reference token.
pub fn is_inline(value: &Element) -> bool {
    match value {
        Element::String(s) => !s.contains('\n'),
        Element::Mapping(m) => m.is_empty(),
        Element::Sequence(s) => s.is_empty(),
        _ => true,
    }
}

/// Render a mapping key as a string.
///
/// Object keys are expected to be legal identifiers; non-string YAML keys
/// (numbers, booleans) are rendered through their scalar form.
pub fn key_string(key: &Element) -> String {
    match key {
        Element::String(s) => s.clone(),
        Element::Bool(b) => b.to_string(),
        Element::Number(n) => n.to_string(),
        Element::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
