//! Mapping template store.
//!
//! Mapping templates are named JSON documents describing an index schema.
//! The store resolves a template name to its content; read failures carry
//! the mapping's name.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AdminError;

/// Abstract store resolving mapping template names to their content.
#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Load the content of the named mapping template.
    async fn load(&self, name: &str) -> Result<String, AdminError>;
}

/// A mapping store reading templates from files in a base directory.
pub struct FileMappingStore {
    base_dir: PathBuf,
}

impl FileMappingStore {
    /// Create a store resolving template names relative to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[async_trait]
impl MappingStore for FileMappingStore {
    async fn load(&self, name: &str) -> Result<String, AdminError> {
        let path = self.base_dir.join(name);
        debug!(mapping = %name, path = %path.display(), "Loading mapping template");

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| AdminError::new(name, format!("error reading mapping template: {}", e)))
    }
}
