//! Key name ↔ file name codec for complex-string files.
//!
//! A complex string stored under an object is written to a sibling file
//! named after its key. Keys are identifiers (no dots), but real file
//! names frequently carry extensions, so the codec maps between the two:
//!
//! - Leading and trailing underscore runs are left untouched.
//! - A *single* underscore — one surrounded on both sides by
//!   non-underscore characters — becomes a dot: `myKey_md_njk` maps to
//!   `myKey.md.njk`.
//! - Decoding replaces every dot with an underscore.
//!
//! The mapping is a bijection over legal keys:
//! `file_name_to_key(key_to_file_name(k)) == k` for every identifier `k`.

/// Map a complex-string key name to its file name.
///
/// # Examples
///
/// ```
/// use yds_types::keyname::key_to_file_name;
///
/// assert_eq!(key_to_file_name("bio"), "bio");
/// assert_eq!(key_to_file_name("myKey_md_njk"), "myKey.md.njk");
/// assert_eq!(key_to_file_name("_myKey__name_"), "_myKey__name_");
/// ```
pub fn key_to_file_name(key_name: &str) -> String {
    let chars: Vec<char> = key_name.chars().collect();
    let mut out = String::with_capacity(key_name.len());
    for (i, &c) in chars.iter().enumerate() {
        let single_underscore = c == '_'
            && i > 0
            && i + 1 < chars.len()
            && chars[i - 1] != '_'
            && chars[i + 1] != '_';
        out.push(if single_underscore { '.' } else { c });
    }
    out
}

/// Map a file name back to its key name: every dot becomes an underscore.
///
/// # Examples
///
/// ```
/// use yds_types::keyname::file_name_to_key;
///
/// assert_eq!(file_name_to_key("myKey.md.njk"), "myKey_md_njk");
/// ```
pub fn file_name_to_key(file_name: &str) -> String {
    file_name.replace('.', "_")
}
