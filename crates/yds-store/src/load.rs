//! Hydration of resolved elements into memory.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use yds_types::{reference_payload, Element};

use crate::error::{OpError, StoreError, StoreResult};
use crate::naming::{DOC_SUFFIX, OBJECT_DOC};
use crate::resolve::{read_doc, resolve, Resolution};
use crate::result::YdsResult;

/// Load the element addressed by `element_path` into memory.
///
/// `depth` bounds hydration: `-1` is unbounded, `0` returns the shallow
/// view (reference tokens left untouched as raw strings), and a positive
/// depth decrements once per hydration step, stopping quietly at the
/// leaves when exceeded.
///
/// Recoverable conditions (blank working directory, invalid path) come
/// back as a failed [`YdsResult`]; a dangling reference met while
/// hydrating is on-disk corruption and is fatal.
pub fn load(working_dir: &Path, element_path: &str, depth: i32) -> StoreResult<YdsResult> {
    if working_dir.as_os_str().is_empty() {
        return Ok(YdsResult::failure(OpError::EmptyWorkingDir));
    }
    debug!(dir = %working_dir.display(), path = element_path, depth, "load");
    match resolve(working_dir, element_path)? {
        Resolution::Empty(doc)
        | Resolution::SimpleObject(doc)
        | Resolution::SimpleList(doc)
        | Resolution::NestedObject(doc)
        | Resolution::NestedList(doc) => {
            let element = load_document(&doc, depth)?;
            Ok(YdsResult::ok(element, element_path))
        }
        Resolution::SimpleScalar(value) | Resolution::NestedScalar(value) => {
            Ok(YdsResult::ok(value, element_path))
        }
        Resolution::SimpleComplexString(file) | Resolution::NestedComplexString(file) => {
            Ok(YdsResult::ok(
                Element::String(fs::read_to_string(&file)?),
                element_path,
            ))
        }
        Resolution::Invalid => Ok(YdsResult::failure(OpError::invalid_path(
            working_dir,
            element_path,
        ))),
    }
}

/// Read a document and hydrate its out-of-line children.
fn load_document(doc_path: &Path, depth: i32) -> StoreResult<Element> {
    let mut value = read_doc(doc_path)?;
    if depth != 0 {
        let child_depth = if depth > 0 { depth - 1 } else { depth };
        let dir = doc_path.parent().unwrap_or_else(|| Path::new(""));
        match &mut value {
            Element::Mapping(map) => {
                for (_, child) in map.iter_mut() {
                    hydrate_child(child, dir, child_depth, doc_path)?;
                }
            }
            Element::Sequence(seq) => {
                for child in seq.iter_mut() {
                    hydrate_child(child, dir, child_depth, doc_path)?;
                }
            }
            _ => {}
        }
    }
    Ok(value)
}

/// Replace one reference token with its referenced content.
///
/// A document payload (`.yaml`) is loaded recursively through the public
/// entry point; any other payload is a complex-string file whose bytes
/// are substituted verbatim.
fn hydrate_child(
    child: &mut Element,
    dir: &Path,
    depth: i32,
    doc_path: &Path,
) -> StoreResult<()> {
    let Some(payload) = child
        .as_str()
        .and_then(reference_payload)
        .map(str::to_string)
    else {
        return Ok(());
    };
    if payload.ends_with(DOC_SUFFIX) {
        let nested = payload_element_path(&payload);
        let inner = load(dir, &nested, depth)?;
        match inner.element {
            Some(element) if inner.success => *child = element,
            _ => {
                return Err(StoreError::DanglingReference {
                    document: doc_path.to_path_buf(),
                    payload,
                })
            }
        }
    } else {
        match fs::read_to_string(dir.join(&payload)) {
            Ok(contents) => *child = Element::String(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::DanglingReference {
                    document: doc_path.to_path_buf(),
                    payload,
                })
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Convert a document payload into the element path addressing it from
/// the payload's own directory (`sub/_this.yaml` → `sub`,
/// `nums_4B0D2F.yaml` → `nums_4B0D2F`).
fn payload_element_path(payload: &str) -> String {
    if let Some(dir) = payload.strip_suffix(&format!("/{OBJECT_DOC}")) {
        dir.replace('/', ".")
    } else {
        payload
            .strip_suffix(DOC_SUFFIX)
            .unwrap_or(payload)
            .replace('/', ".")
    }
}
