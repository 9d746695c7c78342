//! Removal of addressed elements.
//!
//! `delete_element` removes a child from its parent document and deletes
//! the child's on-disk artifacts. Removal is not transactional: the
//! artifacts go first and the parent rewrite second, so a crash between
//! the two leaves the tree inconsistent with the parent document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use yds_types::{split_parent, Element};

use crate::error::{OpError, StoreResult};
use crate::load::load;
use crate::naming::{is_list_item_name, metadata_name, DOC_SUFFIX};
use crate::resolve::{read_doc, resolve, Resolution};
use crate::result::YdsResult;

/// Delete the element addressed by `element_path`, rewriting its parent
/// document and returning a reloaded view of the parent at `depth`.
pub fn delete_element(
    working_dir: &Path,
    element_path: &str,
    depth: i32,
) -> StoreResult<YdsResult> {
    if working_dir.as_os_str().is_empty() {
        return Ok(YdsResult::failure(OpError::EmptyWorkingDir));
    }
    debug!(dir = %working_dir.display(), path = element_path, "delete");
    let Some(target) = ParentTarget::locate(working_dir, element_path)? else {
        return Ok(YdsResult::failure(OpError::invalid_path(
            working_dir,
            element_path,
        )));
    };

    match &target.child {
        Resolution::SimpleObject(doc) | Resolution::NestedObject(doc) => {
            remove_object_dir(doc)?;
        }
        Resolution::SimpleList(doc) | Resolution::NestedList(doc) => {
            remove_list_artifacts(doc)?;
        }
        Resolution::SimpleComplexString(file) | Resolution::NestedComplexString(file) => {
            fs::remove_file(file)?;
        }
        Resolution::SimpleScalar(_) | Resolution::NestedScalar(_) => {}
        // Empty cannot occur (the child key is non-blank) and Invalid
        // was rejected above.
        Resolution::Empty(_) | Resolution::Invalid => {
            return Ok(YdsResult::failure(OpError::invalid_path(
                working_dir,
                element_path,
            )))
        }
    }

    let mut parent = target.parent_element;
    remove_child(&mut parent, &target.child_key);
    fs::write(&target.parent_doc, serde_yaml::to_string(&parent)?)?;
    load(working_dir, &target.parent_path, depth)
}

/// Resolved context for a delete/clear operation: the parent document,
/// its in-memory value, and the child's resolution.
pub(crate) struct ParentTarget {
    pub parent_path: String,
    pub parent_doc: PathBuf,
    pub parent_element: Element,
    pub child_key: String,
    pub child: Resolution,
}

impl ParentTarget {
    /// Resolve parent and child, returning `None` for any recoverable
    /// invalid-path condition (malformed path, unknown element, blank
    /// child key, non-document parent).
    pub(crate) fn locate(
        working_dir: &Path,
        element_path: &str,
    ) -> StoreResult<Option<ParentTarget>> {
        let (parent_path, child_key) = split_parent(element_path);
        if child_key.is_empty() {
            // The working directory's own document has no parent slot.
            return Ok(None);
        }
        let child = resolve(working_dir, element_path)?;
        if child == Resolution::Invalid {
            return Ok(None);
        }
        let parent_doc = match resolve(working_dir, &parent_path)? {
            Resolution::Empty(doc)
            | Resolution::SimpleObject(doc)
            | Resolution::SimpleList(doc)
            | Resolution::NestedObject(doc)
            | Resolution::NestedList(doc) => doc,
            _ => return Ok(None),
        };
        let parent_element = read_doc(&parent_doc)?;
        Ok(Some(ParentTarget {
            parent_path,
            parent_doc,
            parent_element,
            child_key,
            child,
        }))
    }
}

/// Remove an object element's whole directory, given its document path.
pub(crate) fn remove_object_dir(object_doc: &Path) -> StoreResult<()> {
    if let Some(dir) = object_doc.parent() {
        fs::remove_dir_all(dir)?;
    }
    Ok(())
}

/// Remove a list document, its metadata sidecar, and every item
/// artifact in the directory.
///
/// Item artifacts all share the list's base-name prefix with generated-
/// id suffix segments, so one directory sweep covers nested objects,
/// nested lists, their dot-prefixed metadata sidecars, and
/// complex-string files alike.
pub(crate) fn remove_list_artifacts(list_doc: &Path) -> StoreResult<()> {
    let dir = list_doc.parent().unwrap_or_else(|| Path::new("."));
    let doc_name = list_doc
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let base = doc_name.strip_suffix(DOC_SUFFIX).unwrap_or(&doc_name);

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        // A nested list item's metadata sidecar is the dot-prefixed
        // form of its document name.
        let candidate = name.strip_prefix('.').unwrap_or(&name);
        if !is_list_item_name(base, candidate) {
            continue;
        }
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }

    fs::remove_file(list_doc)?;
    let metadata = dir.join(metadata_name(&doc_name));
    if metadata.is_file() {
        fs::remove_file(&metadata)?;
    }
    Ok(())
}

/// Remove the child slot from the parent value: key removal for
/// objects, splice for lists.
pub(crate) fn remove_child(parent: &mut Element, child_key: &str) {
    match parent {
        Element::Mapping(map) => {
            map.remove(child_key);
        }
        Element::Sequence(seq) => {
            if let Ok(index) = child_key.parse::<usize>() {
                if index < seq.len() {
                    seq.remove(index);
                }
            }
        }
        _ => {}
    }
}

/// Overwrite the child slot in the parent value.
pub(crate) fn set_child(parent: &mut Element, child_key: &str, value: Element) {
    match parent {
        Element::Mapping(map) => {
            map.insert(Element::String(child_key.to_string()), value);
        }
        Element::Sequence(seq) => {
            if let Ok(index) = child_key.parse::<usize>() {
                if index < seq.len() {
                    seq[index] = value;
                }
            }
        }
        _ => {}
    }
}
