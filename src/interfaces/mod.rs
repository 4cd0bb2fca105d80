//! Interface definitions for the cluster transport and mapping store.
//!
//! These traits are the seams the lifecycle manager depends on, allowing
//! test doubles and swappable backend implementations.

mod mapping_store;
mod search_cluster;

pub use mapping_store::{FileMappingStore, MappingStore};
pub use search_cluster::SearchCluster;
