use std::path::PathBuf;

/// Fatal failures from store operations.
///
/// These are the "non-result-shaped" failures: unexpected filesystem
/// errors, codec errors, and on-disk corruption. They propagate as `Err`
/// and callers should treat them as unrecoverable state — no partial-
/// failure recovery or rollback is attempted.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document failed to serialize or deserialize.
    #[error("YAML codec error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A reference token's payload does not resolve to an existing file
    /// at hydration time (on-disk corruption).
    #[error("dangling reference (({payload})) in {document}")]
    DanglingReference { document: PathBuf, payload: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Recoverable, expected failure conditions.
///
/// These never become `Err`; they surface through
/// [`YdsResult`](crate::YdsResult) with `success == false` and this
/// error's rendering as the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    /// The working directory path is blank.
    #[error("Error: Cannot operate on empty working directory path")]
    EmptyWorkingDir,

    /// Malformed path grammar, missing file, unknown property, or a
    /// dangling reference met during resolution.
    #[error("Error: Invalid path to element on filesystem [{working_dir} | {element_path}]")]
    InvalidPath {
        working_dir: String,
        element_path: String,
    },

    /// The working directory for a store does not exist.
    #[error("Error: Invalid path [{0}]")]
    MissingWorkingDir(String),

    /// The top-level element name is illegal or reserved.
    #[error("Error: Invalid element name [{0}]")]
    InvalidElementName(String),

    /// The store target directory already has contents.
    #[error("Error: Working directory path is non-empty [{0}]")]
    NonEmptyWorkingDir(String),
}

impl OpError {
    /// Build the common invalid-path condition from the operation inputs.
    pub fn invalid_path(working_dir: &std::path::Path, element_path: &str) -> Self {
        OpError::InvalidPath {
            working_dir: working_dir.display().to_string(),
            element_path: element_path.to_string(),
        }
    }
}
