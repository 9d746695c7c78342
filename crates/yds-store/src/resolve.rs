//! Element-path resolution.
//!
//! [`resolve`] classifies an element path against the on-disk tree into a
//! [`Resolution`]: the element's shape (object, list, complex string, or
//! scalar), whether the path was simple (single segment) or nested, and
//! either the resolved file path or the already-read scalar value.
//!
//! Resolution performs no mutation and follows reference tokens only as
//! far as the path demands. A token whose target is missing is `Invalid`
//! during a nested walk; the loader treats the same condition during
//! hydration as fatal corruption.

use std::fs;
use std::path::{Path, PathBuf};

use yds_types::{parse_segments, reference_payload, Element};

use crate::error::StoreResult;
use crate::naming::{follow_payload, is_doc, is_object_doc, list_doc_name, OBJECT_DOC};

/// Outcome of resolving an element path against a working directory.
///
/// A sum type matched exhaustively at every call site. Non-scalar
/// variants carry the resolved document or file path; scalar variants
/// carry the value itself, read out of the parent document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The path and working directory do not point at a valid element.
    Invalid,
    /// The empty path: the working directory's own object document.
    Empty(PathBuf),
    /// Single segment naming an object document.
    SimpleObject(PathBuf),
    /// Single segment naming a list document.
    SimpleList(PathBuf),
    /// Single segment naming an out-of-line complex string file.
    SimpleComplexString(PathBuf),
    /// Single segment naming an inline scalar (null when the key is
    /// absent, so callers can probe for yet-unset properties).
    SimpleScalar(Element),
    /// Multi-segment path ending at an object document.
    NestedObject(PathBuf),
    /// Multi-segment path ending at a list document.
    NestedList(PathBuf),
    /// Multi-segment path ending at a complex string file.
    NestedComplexString(PathBuf),
    /// Multi-segment path ending at an inline scalar.
    NestedScalar(Element),
}

/// Read and parse a structured-text document.
pub(crate) fn read_doc(path: &Path) -> StoreResult<Element> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Classify `element_path` against the tree rooted at `working_dir`.
///
/// Malformed path grammar, unknown names, and missing documents resolve
/// to [`Resolution::Invalid`]; only unexpected I/O or codec failures are
/// `Err`.
pub fn resolve(working_dir: &Path, element_path: &str) -> StoreResult<Resolution> {
    if element_path.is_empty() {
        let doc = working_dir.join(OBJECT_DOC);
        return Ok(if doc.is_file() {
            Resolution::Empty(doc)
        } else {
            Resolution::Invalid
        });
    }
    let Some(segments) = parse_segments(element_path) else {
        return Ok(Resolution::Invalid);
    };
    let first = resolve_single(working_dir, &segments[0])?;
    if segments.len() == 1 {
        return Ok(first);
    }
    resolve_nested(working_dir, &first, &segments[1..])
}

/// Single-segment resolution: the recursive base case.
fn resolve_single(working_dir: &Path, name: &str) -> StoreResult<Resolution> {
    let object_doc = working_dir.join(name).join(OBJECT_DOC);
    if object_doc.is_file() {
        return Ok(Resolution::SimpleObject(object_doc));
    }
    let list_doc = working_dir.join(list_doc_name(name));
    if list_doc.is_file() {
        return Ok(Resolution::SimpleList(list_doc));
    }
    let this_doc = working_dir.join(OBJECT_DOC);
    if !this_doc.is_file() {
        return Ok(Resolution::Invalid);
    }
    // The segment names a property of the working directory's own
    // document. An absent key is the scalar null, not an error.
    let doc = read_doc(&this_doc)?;
    let raw = doc.get(name).cloned().unwrap_or(Element::Null);
    if let Some(payload) = raw.as_str().and_then(reference_payload) {
        let target = working_dir.join(payload);
        if target.is_file() {
            return Ok(Resolution::SimpleComplexString(target));
        }
    }
    Ok(Resolution::SimpleScalar(raw))
}

/// Walk the remaining segments from the first segment's document.
fn resolve_nested(
    working_dir: &Path,
    first: &Resolution,
    rest: &[String],
) -> StoreResult<Resolution> {
    // Only a document can be walked into; a scalar or complex-string
    // first segment has no children.
    let doc_path = match first {
        Resolution::Empty(p) | Resolution::SimpleObject(p) | Resolution::SimpleList(p) => p,
        _ => return Ok(Resolution::Invalid),
    };
    let mut current = read_doc(doc_path)?;
    let mut active: PathBuf = doc_path
        .parent()
        .unwrap_or(working_dir)
        .to_path_buf();

    for (i, segment) in rest.iter().enumerate() {
        let last = i == rest.len() - 1;
        let Some(raw) = lookup(&current, segment) else {
            return Ok(Resolution::Invalid);
        };
        if let Some(payload) = raw.as_str().and_then(reference_payload) {
            let target = follow_payload(&active, payload);
            if !target.is_file() {
                // Dangling reference met during resolution.
                return Ok(Resolution::Invalid);
            }
            if last {
                return Ok(if is_object_doc(&target) {
                    Resolution::NestedObject(target)
                } else if is_doc(&target) {
                    Resolution::NestedList(target)
                } else {
                    Resolution::NestedComplexString(target)
                });
            }
            if !is_doc(&target) {
                // A complex string file mid-path has no children.
                return Ok(Resolution::Invalid);
            }
            current = read_doc(&target)?;
            active = target;
        } else if last {
            return Ok(Resolution::NestedScalar(raw));
        } else {
            // Inline containers (empty by construction, but tolerated if
            // hand-edited) can be walked in memory; inline scalars end
            // the walk.
            match raw {
                Element::Mapping(_) | Element::Sequence(_) => current = raw,
                _ => return Ok(Resolution::Invalid),
            }
        }
    }
    Ok(Resolution::Invalid)
}

/// Look up a segment in a document value: mapping key for objects,
/// integer index for sequences.
fn lookup(value: &Element, segment: &str) -> Option<Element> {
    match value {
        Element::Mapping(map) => map.get(segment).cloned(),
        Element::Sequence(seq) => segment
            .parse::<usize>()
            .ok()
            .and_then(|i| seq.get(i))
            .cloned(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// model/_this.yaml with a scalar, a complex string, a nested object,
    /// and a nested list.
    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let wd = dir.path();
        write(
            &wd.join("model/_this.yaml"),
            "name: Alice\nbio: ((bio))\naddress: ((address/_this.yaml))\nphones: ((phones.yaml))\n",
        );
        write(&wd.join("model/bio"), "l1\nl2");
        write(&wd.join("model/address/_this.yaml"), "city: Oslo\n");
        write(&wd.join("model/phones.yaml"), "- 1\n- 2\n");
        dir
    }

    #[test]
    fn empty_path_resolves_to_own_document() {
        let dir = fixture();
        let wd = dir.path().join("model");
        match resolve(&wd, "").unwrap() {
            Resolution::Empty(p) => assert_eq!(p, wd.join("_this.yaml")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_path_without_document_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve(dir.path(), "").unwrap(), Resolution::Invalid);
    }

    #[test]
    fn simple_variants() {
        let dir = fixture();
        let wd = dir.path();
        assert!(matches!(
            resolve(wd, "model").unwrap(),
            Resolution::SimpleObject(_)
        ));
        let model = wd.join("model");
        assert!(matches!(
            resolve(&model, "address").unwrap(),
            Resolution::SimpleObject(_)
        ));
        assert!(matches!(
            resolve(&model, "phones").unwrap(),
            Resolution::SimpleList(_)
        ));
        assert!(matches!(
            resolve(&model, "bio").unwrap(),
            Resolution::SimpleComplexString(_)
        ));
        assert_eq!(
            resolve(&model, "name").unwrap(),
            Resolution::SimpleScalar(Element::String("Alice".into()))
        );
    }

    #[test]
    fn absent_key_is_scalar_null() {
        let dir = fixture();
        assert_eq!(
            resolve(&dir.path().join("model"), "missing").unwrap(),
            Resolution::SimpleScalar(Element::Null)
        );
    }

    #[test]
    fn nested_variants() {
        let dir = fixture();
        let wd = dir.path();
        assert!(matches!(
            resolve(wd, "model.address").unwrap(),
            Resolution::NestedObject(_)
        ));
        assert!(matches!(
            resolve(wd, "model.phones").unwrap(),
            Resolution::NestedList(_)
        ));
        assert!(matches!(
            resolve(wd, "model.bio").unwrap(),
            Resolution::NestedComplexString(_)
        ));
        assert_eq!(
            resolve(wd, "model.address.city").unwrap(),
            Resolution::NestedScalar(Element::String("Oslo".into()))
        );
        assert_eq!(
            resolve(wd, "model.phones[1]").unwrap(),
            Resolution::NestedScalar(Element::from(2))
        );
    }

    #[test]
    fn dot_and_bracket_forms_are_equivalent() {
        let dir = fixture();
        let wd = dir.path();
        assert_eq!(
            resolve(wd, "model.address.city").unwrap(),
            resolve(wd, "model[address][city]").unwrap()
        );
    }

    #[test]
    fn invalid_paths() {
        let dir = fixture();
        let wd = dir.path();
        assert_eq!(resolve(wd, "model.[").unwrap(), Resolution::Invalid);
        assert_eq!(resolve(wd, "model..address").unwrap(), Resolution::Invalid);
        assert_eq!(resolve(wd, "model.address.missing.deeper").unwrap(), Resolution::Invalid);
        assert_eq!(resolve(wd, "nope.deeper").unwrap(), Resolution::Invalid);
        // A scalar cannot be walked into.
        assert_eq!(resolve(wd, "model.name.x").unwrap(), Resolution::Invalid);
        // Out-of-range list index.
        assert_eq!(resolve(wd, "model.phones[9]").unwrap(), Resolution::Invalid);
        assert_eq!(resolve(wd, "model.phones[x]").unwrap(), Resolution::Invalid);
    }

    #[test]
    fn dangling_reference_mid_walk_is_invalid() {
        let dir = fixture();
        let wd = dir.path();
        fs::remove_dir_all(wd.join("model/address")).unwrap();
        assert_eq!(resolve(wd, "model.address").unwrap(), Resolution::Invalid);
    }

    #[test]
    fn dangling_token_in_single_segment_stays_scalar() {
        let dir = fixture();
        let model = dir.path().join("model");
        fs::remove_file(model.join("bio")).unwrap();
        assert_eq!(
            resolve(&model, "bio").unwrap(),
            Resolution::SimpleScalar(Element::String("((bio))".into()))
        );
    }
}
