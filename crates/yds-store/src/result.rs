use yds_types::Element;

use crate::error::OpError;

/// Uniform outcome of a store operation.
///
/// On success `message` echoes the effective element path of the
/// operation (the parent path for delete/clear). On a recoverable
/// failure `success` is false and `message` describes the condition;
/// store failures additionally hand the caller's element back.
#[derive(Debug, Clone, PartialEq)]
pub struct YdsResult {
    pub success: bool,
    pub element: Option<Element>,
    pub message: String,
}

impl YdsResult {
    /// Successful outcome carrying the element and its effective path.
    pub fn ok(element: Element, element_path: impl Into<String>) -> Self {
        Self {
            success: true,
            element: Some(element),
            message: element_path.into(),
        }
    }

    /// Recoverable failure.
    pub fn failure(error: OpError) -> Self {
        Self {
            success: false,
            element: None,
            message: error.to_string(),
        }
    }

    /// Recoverable failure that returns the caller's element.
    pub fn failure_with(element: Element, error: OpError) -> Self {
        Self {
            success: false,
            element: Some(element),
            message: error.to_string(),
        }
    }
}
