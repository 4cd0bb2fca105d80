//! The single error kind for index administration.
//!
//! Every failure class (existence checks, mapping reads, create/delete,
//! settings and alias lookups, reindex, alias swaps, index name parsing)
//! is reported as an [`AdminError`] carrying the affected alias or index
//! name and a human-readable cause.

use serde::Serialize;
use thiserror::Error;

/// Error produced by any index administration operation.
#[derive(Error, Debug, Clone, Serialize)]
#[error("index admin error for '{name}': {cause}")]
pub struct AdminError {
    /// The alias or index name the operation was acting on.
    pub name: String,
    /// Human-readable description of what went wrong.
    pub cause: String,
}

impl AdminError {
    /// Create a new error for the given alias or index name.
    pub fn new(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_name_and_cause() {
        let error = AdminError::new("blog", "error creating index blog_v1");
        assert_eq!(
            error.to_string(),
            "index admin error for 'blog': error creating index blog_v1"
        );
    }
}
