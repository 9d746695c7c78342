//! Serialization of in-memory elements to the on-disk tree.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use yds_types::{
    is_inline, key_string, reference_token, Element, IdGenerator,
};

use crate::error::{OpError, StoreResult};
use crate::naming::{
    complex_string_filename_for_key, complex_string_filename_for_list, element_name_from_filename,
    list_doc_name, metadata_name, object_or_list_filename, OBJECT_DOC,
};
use crate::result::YdsResult;

/// Reserved words that are not legal element names: identifiers that
/// collide with common language keywords in consumers of the format.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "arguments", "async", "await", "boolean", "break", "byte", "case", "catch",
    "char", "class", "const", "continue", "debugger", "default", "delete", "do", "double",
    "else", "enum", "eval", "export", "extends", "false", "final", "finally", "float", "for",
    "function", "goto", "if", "implements", "import", "in", "instanceof", "int", "interface",
    "let", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "typeof", "using", "var", "void", "volatile", "while", "with",
    "yield",
];

/// Sidecar recording how many identifiers a list has consumed, so a
/// later append can skip past them instead of reusing ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ListMetadata {
    #[serde(rename = "idCounter")]
    id_counter: i64,
}

/// Whether a name is a legal top-level element name: alphanumeric,
/// underscore, or dollar, not starting with a digit, not a reserved
/// word.
fn is_legal_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let legal_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$');
    legal_start
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&name)
}

/// Serialize `element` as `name` into an *empty* working directory.
///
/// Fails (recoverably, with no partial write) when the working directory
/// does not exist, is non-empty, or the name is illegal.
pub fn store(element: &Element, working_dir: &Path, name: &str) -> StoreResult<YdsResult> {
    if !working_dir.is_dir() {
        return Ok(YdsResult::failure_with(
            element.clone(),
            OpError::MissingWorkingDir(working_dir.display().to_string()),
        ));
    }
    if fs::read_dir(working_dir)?.next().is_some() {
        return Ok(YdsResult::failure_with(
            element.clone(),
            OpError::NonEmptyWorkingDir(working_dir.display().to_string()),
        ));
    }
    if !is_legal_element_name(name) {
        return Ok(YdsResult::failure_with(
            element.clone(),
            OpError::InvalidElementName(name.to_string()),
        ));
    }
    debug!(dir = %working_dir.display(), name, "store");
    let mut idgen = IdGenerator::default();
    store_yaml(element, working_dir, name, -1, &mut idgen)
}

/// The recursive serialization primitive behind [`store`].
///
/// Writes `element` as `name` under `working_dir` without the empty-
/// directory precondition. `depth == 0` is the shallow write: reference
/// tokens are emitted without their referenced files, and loading such a
/// tree faults on the dangling references. Identifier draws for
/// list-item naming come from the caller's `idgen`.
pub fn store_yaml(
    element: &Element,
    working_dir: &Path,
    name: &str,
    depth: i32,
    idgen: &mut IdGenerator,
) -> StoreResult<YdsResult> {
    let container_is_list = element.is_sequence();
    let (dir_path, doc_name): (PathBuf, String) = if container_is_list {
        (working_dir.to_path_buf(), list_doc_name(name))
    } else {
        let dir = working_dir.join(name);
        if depth != 0 && !dir.exists() {
            fs::create_dir(&dir)?;
        }
        (dir, OBJECT_DOC.to_string())
    };

    let mut ctx = EntryContext {
        dir_path: &dir_path,
        container_name: name,
        container_is_list,
        depth,
        idgen,
        id_counter: 0,
    };
    let serialized = match element {
        Element::Mapping(map) => {
            let mut out = serde_yaml::Mapping::new();
            for (key, value) in map {
                out.insert(key.clone(), ctx.serialize_entry(&key_string(key), value)?);
            }
            Element::Mapping(out)
        }
        Element::Sequence(seq) => {
            // A list document strips keys: positional sequence only.
            let mut out = Vec::with_capacity(seq.len());
            for value in seq {
                out.push(ctx.serialize_entry("", value)?);
            }
            Element::Sequence(out)
        }
        other => other.clone(),
    };
    let id_counter = ctx.id_counter;

    if id_counter > 0 {
        let metadata = ListMetadata { id_counter };
        fs::write(
            dir_path.join(metadata_name(&doc_name)),
            serde_yaml::to_string(&metadata)?,
        )?;
    }
    if depth != 0 || container_is_list {
        fs::write(dir_path.join(&doc_name), serde_yaml::to_string(&serialized)?)?;
    }

    Ok(YdsResult::ok(element.clone(), name))
}

/// Per-container serialization state: the target directory, the
/// container's name and kind, the remaining depth, and the id draw
/// counter.
struct EntryContext<'a> {
    dir_path: &'a Path,
    container_name: &'a str,
    container_is_list: bool,
    depth: i32,
    idgen: &'a mut IdGenerator,
    id_counter: i64,
}

impl EntryContext<'_> {
    fn next_id(&mut self) -> String {
        let id = self
            .idgen
            .generate_ids(1, self.id_counter)
            .pop()
            .unwrap_or_default();
        self.id_counter += 1;
        id
    }

    /// Serialize one child entry, returning the value to write into the
    /// parent document: inline values unchanged, out-of-line values as
    /// reference tokens (writing the referenced artifact unless the
    /// depth budget is exhausted).
    fn serialize_entry(&mut self, key: &str, value: &Element) -> StoreResult<Element> {
        if is_inline(value) {
            return Ok(value.clone());
        }
        if let Element::String(complex) = value {
            let file_name = if self.container_is_list {
                let id = self.next_id();
                complex_string_filename_for_list(self.container_name, &id)
            } else {
                complex_string_filename_for_key(key)
            };
            if self.depth != 0 {
                fs::write(self.dir_path.join(&file_name), complex)?;
            }
            return Ok(Element::String(reference_token(&file_name)));
        }
        // Non-empty object or list child.
        let child_is_list = value.is_sequence();
        let file_name = if self.container_is_list {
            let id = self.next_id();
            object_or_list_filename(self.container_name, child_is_list, Some(&id))
        } else {
            object_or_list_filename(key, child_is_list, None)
        };
        if self.depth != 0 {
            let child_depth = if self.depth > 0 { self.depth - 1 } else { self.depth };
            store_yaml(
                value,
                self.dir_path,
                element_name_from_filename(&file_name),
                child_depth,
                self.idgen,
            )?;
        }
        Ok(Element::String(reference_token(&file_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load;
    use std::fs;

    fn parse(yaml: &str) -> Element {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn legal_and_illegal_names() {
        assert!(is_legal_element_name("model"));
        assert!(is_legal_element_name("_model2"));
        assert!(is_legal_element_name("$ref"));
        assert!(!is_legal_element_name(""));
        assert!(!is_legal_element_name("1model"));
        assert!(!is_legal_element_name("my-model"));
        assert!(!is_legal_element_name("my model"));
        for word in ["class", "null", "while", "this"] {
            assert!(!is_legal_element_name(word), "{word} should be reserved");
        }
    }

    #[test]
    fn missing_working_dir_fails_without_writing() {
        let result = store(
            &parse("a: 1"),
            Path::new("/nonexistent/yds/dir"),
            "model",
        )
        .unwrap();
        assert!(!result.success);
        assert!(result.message.starts_with("Error: Invalid path"));
        assert!(result.element.is_some());
    }

    #[test]
    fn non_empty_working_dir_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("occupied"), "x").unwrap();
        let result = store(&parse("a: 1"), dir.path(), "model").unwrap();
        assert!(!result.success);
        assert!(result
            .message
            .starts_with("Error: Working directory path is non-empty"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn illegal_name_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = store(&parse("a: 1"), dir.path(), "1model").unwrap();
        assert!(!result.success);
        assert!(result.message.starts_with("Error: Invalid element name"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn object_with_complex_string() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("name: Alice\nbio: \"l1\\nl2\"");
        let result = store(&element, dir.path(), "model").unwrap();
        assert!(result.success);
        assert_eq!(result.message, "model");

        let doc = fs::read_to_string(dir.path().join("model/_this.yaml")).unwrap();
        assert_eq!(doc, "name: Alice\nbio: ((bio))\n");
        let bio = fs::read_to_string(dir.path().join("model/bio")).unwrap();
        assert_eq!(bio, "l1\nl2");
    }

    #[test]
    fn scalar_list_writes_single_document_and_no_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let result = store(&parse("[1, 2, 3]"), dir.path(), "nums").unwrap();
        assert!(result.success);
        let doc = fs::read_to_string(dir.path().join("nums.yaml")).unwrap();
        assert_eq!(doc, "- 1\n- 2\n- 3\n");
        assert!(!dir.path().join(".nums.yaml").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn list_with_complex_items_writes_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("- \"l1\\nl2\"\n- plain\n- a: 1\n");
        let result = store(&element, dir.path(), "notes").unwrap();
        assert!(result.success);
        let metadata = fs::read_to_string(dir.path().join(".notes.yaml")).unwrap();
        assert_eq!(metadata, "idCounter: 2\n");

        // The list document holds one token per out-of-line item.
        let doc: Element =
            serde_yaml::from_str(&fs::read_to_string(dir.path().join("notes.yaml")).unwrap())
                .unwrap();
        let items = doc.as_sequence().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].as_str().unwrap().starts_with("((notes_"));
        assert_eq!(items[1], Element::String("plain".into()));
        assert!(items[2].as_str().unwrap().ends_with(".yaml))"));
    }

    #[test]
    fn compound_list_name_preserves_extension() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("- \"# a\\nbody\"");
        store(&element, dir.path(), "notes_md").unwrap();
        let item = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .find(|n| n.ends_with(".md"))
            .expect("extension-preserving item file");
        assert!(item.starts_with("notes_"));
        assert_eq!(fs::read_to_string(dir.path().join(&item)).unwrap(), "# a\nbody");
    }

    #[test]
    fn empty_containers_stay_inline() {
        let dir = tempfile::tempdir().unwrap();
        store(&parse("a: {}\nb: []\nc: null\n"), dir.path(), "model").unwrap();
        let doc = fs::read_to_string(dir.path().join("model/_this.yaml")).unwrap();
        assert_eq!(doc, "a: {}\nb: []\nc: null\n");
        assert_eq!(fs::read_dir(dir.path().join("model")).unwrap().count(), 1);
    }

    #[test]
    fn nested_object_and_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse(
            "name: Alice\naddress:\n  city: Oslo\n  lines: \"a\\nb\"\nphones:\n- 1\n- 2\ntags:\n- x: 1\n",
        );
        let stored = store(&element, dir.path(), "model").unwrap();
        assert!(stored.success);
        let loaded = load(dir.path(), "model", -1).unwrap();
        assert!(loaded.success);
        assert_eq!(loaded.element.unwrap(), element);
    }

    #[test]
    fn list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("- 1\n- \"l1\\nl2\"\n- - inner\n  - 2\n- k: v\n");
        store(&element, dir.path(), "mixed").unwrap();
        let loaded = load(dir.path(), "mixed", -1).unwrap();
        assert_eq!(loaded.element.unwrap(), element);
    }

    #[test]
    fn shallow_store_emits_tokens_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("- a: 1\n- 2\n");
        let mut idgen = IdGenerator::default();
        store_yaml(&element, dir.path(), "nums", 0, &mut idgen).unwrap();
        let doc: Element =
            serde_yaml::from_str(&fs::read_to_string(dir.path().join("nums.yaml")).unwrap())
                .unwrap();
        assert!(doc[0].as_str().unwrap().starts_with("(("));
        // Only the list document and its metadata exist; the referenced
        // item was not written.
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"nums.yaml".to_string()));
        assert!(names.contains(&".nums.yaml".to_string()));
    }

    #[test]
    fn sibling_containers_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("- - 1\n- - 2\n- \"x\\ny\"\n");
        store(&element, dir.path(), "nums").unwrap();
        let doc: Element =
            serde_yaml::from_str(&fs::read_to_string(dir.path().join("nums.yaml")).unwrap())
                .unwrap();
        let tokens: Vec<&str> = doc
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(tokens.len(), 3);
        for (i, a) in tokens.iter().enumerate() {
            for b in &tokens[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let metadata = fs::read_to_string(dir.path().join(".nums.yaml")).unwrap();
        assert_eq!(metadata, "idCounter: 3\n");
    }

    #[test]
    fn deep_nesting_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let element = parse("a:\n  b:\n    c:\n      d: deep\n");
        store(&element, dir.path(), "model").unwrap();
        let leaf = load(dir.path(), "model.a.b.c.d", -1).unwrap();
        assert_eq!(leaf.element, Some(Element::String("deep".into())));
    }
}
