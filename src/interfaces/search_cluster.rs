//! Cluster transport trait definition.
//!
//! This module defines the abstract interface the lifecycle manager uses
//! to talk to the search cluster, allowing different backends (OpenSearch,
//! mock, etc.) behind the same operations.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AdminError;

/// Abstract interface for cluster-side index operations.
///
/// Every method is a single synchronous request/response exchange with the
/// cluster; the lifecycle manager sequences them and never retries. All
/// failures, including transport failures, surface as [`AdminError`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. They are assumed safe for reuse
/// across sequential calls, but no internal locking is provided for
/// concurrent lifecycle operations on the same alias.
#[async_trait]
pub trait SearchCluster: Send + Sync {
    /// Check whether an index or alias with the given name exists.
    ///
    /// A transport failure is an error, never treated as "does not exist".
    async fn exists(&self, name: &str) -> Result<bool, AdminError>;

    /// Create an index in a single atomic request.
    ///
    /// The body carries the settings, the mappings, and optionally the
    /// alias bindings to attach on creation.
    async fn create_index(&self, index: &str, body: Value) -> Result<(), AdminError>;

    /// Delete the given indices as a single batch request.
    async fn delete_indices(&self, indices: &[String]) -> Result<(), AdminError>;

    /// Resolve the concrete index names whose aliases match the given
    /// wildcard pattern (e.g. `blog*`). An empty result is not an error.
    async fn alias_indices(&self, pattern: &str) -> Result<Vec<String>, AdminError>;

    /// Fetch the settings of an index as a flat map of dotted keys.
    async fn get_settings(&self, index: &str) -> Result<HashMap<String, String>, AdminError>;

    /// Copy every document from `source` into `dest`, forcing a refresh on
    /// completion so `dest` is immediately searchable. Returns the number
    /// of documents copied.
    async fn reindex(&self, source: &str, dest: &str) -> Result<u64, AdminError>;

    /// Atomically move an alias from `old_index` to `new_index` in a
    /// single update-aliases request. No external observer ever sees the
    /// alias unbound or bound to both indices.
    async fn swap_alias(
        &self,
        alias: &str,
        old_index: &str,
        new_index: &str,
    ) -> Result<(), AdminError>;

    /// Ping the cluster to check it is reachable and responsive.
    async fn ping(&self) -> Result<(), AdminError>;
}
