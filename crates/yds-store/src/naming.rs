//! On-disk naming rules.
//!
//! Every convention about how elements map to file names lives here: the
//! document suffix, the object-document name, list metadata sidecars,
//! complex-string file names, generated-id item names, and how reference
//! payloads are resolved against the active file path.

use std::path::{Path, PathBuf};

use yds_types::{is_generated_id, keyname};

/// File name of an object document inside its element's directory.
pub const OBJECT_DOC: &str = "_this.yaml";

/// Suffix shared by all structured-text documents. Load-bearing: nested
/// resolution classifies a reference target as an object document, a
/// list document, or a plain complex-string file by its name shape.
pub const DOC_SUFFIX: &str = ".yaml";

/// The document file name for a list element.
pub fn list_doc_name(element_name: &str) -> String {
    format!("{element_name}{DOC_SUFFIX}")
}

/// The metadata sidecar name for a document file name: dot-prefixed and
/// co-named (`nums.yaml` → `.nums.yaml`).
pub fn metadata_name(doc_file_name: &str) -> String {
    format!(".{doc_file_name}")
}

/// Reference payload for a nested object or list element.
///
/// Object containers name children after their key; list containers
/// append a generated id to the list's own name. Objects point at their
/// document inside the child directory, lists at the document file
/// itself.
pub fn object_or_list_filename(element_name: &str, is_list: bool, id: Option<&str>) -> String {
    let suffix = id.map(|id| format!("_{id}")).unwrap_or_default();
    if is_list {
        format!("{element_name}{suffix}{DOC_SUFFIX}")
    } else {
        format!("{element_name}{suffix}/{OBJECT_DOC}")
    }
}

/// File name for a complex string stored under an object container:
/// the key run through the key-name codec.
pub fn complex_string_filename_for_key(key: &str) -> String {
    keyname::key_to_file_name(key)
}

/// File name for a complex string stored under a list container.
///
/// Plain list names get the id appended (`notes` → `notes_<id>`). A
/// compound name whose final underscore segment is not itself a
/// generated id encodes a base+extension pair, and the id is inserted
/// before the extension (`notes_md` → `notes_<id>.md`).
pub fn complex_string_filename_for_list(list_name: &str, id: &str) -> String {
    match list_name.rsplit_once('_') {
        Some((_, last)) if is_generated_id(last) => format!("{list_name}_{id}"),
        Some((base, ext)) => format!("{base}_{id}.{ext}"),
        None => format!("{list_name}_{id}"),
    }
}

/// Recover the element name from a generated reference payload
/// (`sub/_this.yaml` → `sub`, `nums_4B0D2F.yaml` → `nums_4B0D2F`).
pub fn element_name_from_filename(file_name: &str) -> &str {
    if let Some(dir) = file_name.strip_suffix(&format!("/{OBJECT_DOC}")) {
        dir
    } else {
        file_name.strip_suffix(DOC_SUFFIX).unwrap_or(file_name)
    }
}

/// Whether a path names an object document.
pub fn is_object_doc(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == OBJECT_DOC)
}

/// Whether a path names a structured-text document (object or list).
pub fn is_doc(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "yaml")
}

/// Resolve a reference payload against the active file path.
///
/// The active path is either a directory or a document file; when it
/// already points at a document, one trailing component is stripped
/// first so the payload stays relative to the document's directory.
pub fn follow_payload(active: &Path, payload: &str) -> PathBuf {
    if is_doc(active) {
        active
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(payload)
    } else {
        active.join(payload)
    }
}

/// Whether a directory entry is an item artifact of the named list.
///
/// Item artifacts carry the list's base name plus one or more
/// generated-id suffix segments, either extension-less or with the
/// document suffix (`nums_4B0D2F`, `nums_4B0D2F.yaml`,
/// `nums_4B0D2F_7A1D77`). Any other extension belongs to a sibling
/// compound list (`nums_4B0D2F.md` is an item of `nums_md`, not of
/// `nums`). Lists with a compound base name yield extension-preserving
/// complex-string items (`notes_md` → `notes_4B0D2F.md`).
pub fn is_list_item_name(list_base: &str, entry_name: &str) -> bool {
    if let Some(rest) = entry_name
        .strip_prefix(list_base)
        .and_then(|r| r.strip_prefix('_'))
    {
        let (ids, extension) = match rest.split_once('.') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        if matches!(extension, None | Some("yaml"))
            && !ids.is_empty()
            && ids.split('_').all(is_generated_id)
        {
            return true;
        }
    }
    // Compound-base complex strings: "<head>_<id>.<ext>" for list
    // "<head>_<ext>".
    if let Some((head, ext)) = list_base.rsplit_once('_') {
        if !is_generated_id(ext) {
            if let Some(rest) = entry_name
                .strip_prefix(head)
                .and_then(|r| r.strip_prefix('_'))
            {
                if let Some((ids, entry_ext)) = rest.rsplit_once('.') {
                    if entry_ext == ext && !ids.is_empty() && ids.split('_').all(is_generated_id) {
                        return true;
                    }
                }
            }
        }
    }
    false
}
