//! Resetting addressed elements to their empty defaults.
//!
//! `clear` is `delete_element`'s sibling: the child's on-disk artifacts
//! are removed the same way, but the child slot stays in the parent,
//! reset to a shape-appropriate empty value. Clearing an already-empty
//! slot is a no-op, which makes the operation idempotent.

use std::fs;
use std::path::Path;

use tracing::debug;
use yds_types::Element;

use crate::delete::{remove_list_artifacts, remove_object_dir, set_child, ParentTarget};
use crate::error::{OpError, StoreResult};
use crate::load::load;
use crate::resolve::Resolution;
use crate::result::YdsResult;

/// Clear the element addressed by `element_path` to its empty default:
/// `{}` for objects, `[]` for lists, `""` for strings and complex
/// strings, `null` for numbers and booleans. Returns a reloaded view of
/// the parent at `depth`.
pub fn clear(working_dir: &Path, element_path: &str, depth: i32) -> StoreResult<YdsResult> {
    if working_dir.as_os_str().is_empty() {
        return Ok(YdsResult::failure(OpError::EmptyWorkingDir));
    }
    debug!(dir = %working_dir.display(), path = element_path, "clear");
    let Some(target) = ParentTarget::locate(working_dir, element_path)? else {
        return Ok(YdsResult::failure(OpError::invalid_path(
            working_dir,
            element_path,
        )));
    };

    let empty_value = match &target.child {
        Resolution::SimpleObject(doc) | Resolution::NestedObject(doc) => {
            remove_object_dir(doc)?;
            Element::Mapping(serde_yaml::Mapping::new())
        }
        Resolution::SimpleList(doc) | Resolution::NestedList(doc) => {
            remove_list_artifacts(doc)?;
            Element::Sequence(Vec::new())
        }
        Resolution::SimpleComplexString(file) | Resolution::NestedComplexString(file) => {
            fs::remove_file(file)?;
            Element::String(String::new())
        }
        Resolution::SimpleScalar(value) | Resolution::NestedScalar(value) => match value {
            // Already empty: idempotent no-op, nothing rewritten.
            Element::Null | Element::Mapping(_) | Element::Sequence(_) => {
                return load(working_dir, &target.parent_path, depth)
            }
            Element::String(s) if s.is_empty() => {
                return load(working_dir, &target.parent_path, depth)
            }
            Element::String(_) => Element::String(String::new()),
            _ => Element::Null,
        },
        Resolution::Empty(_) | Resolution::Invalid => {
            return Ok(YdsResult::failure(OpError::invalid_path(
                working_dir,
                element_path,
            )))
        }
    };

    let mut parent = target.parent_element;
    set_child(&mut parent, &target.child_key, empty_value);
    fs::write(&target.parent_doc, serde_yaml::to_string(&parent)?)?;
    load(working_dir, &target.parent_path, depth)
}
