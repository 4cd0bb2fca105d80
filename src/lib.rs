//! # Search Index Admin
//!
//! This crate manages the lifecycle of search-engine indices behind
//! stable logical names (aliases), so that client applications never
//! reference a physical index directly and can be upgraded or re-mapped
//! without downtime.
//!
//! Physical indices are named `{alias}[-{locale}]_v{N}`; the alias is
//! bound to exactly one version per locale at any time. Upgrading an
//! alias creates the next version unbound, reindexes all documents into
//! it, atomically swaps the alias, and deletes the old version.
//!
//! The entry point is [`IndexAdmin`], which owns a [`SearchCluster`]
//! transport (see [`OpenSearchCluster`] for the OpenSearch backend) and a
//! [`MappingStore`] resolving mapping templates by name.

pub mod admin;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod naming;
pub mod opensearch;
pub mod settings;

pub use admin::{IndexAdmin, LineageOutcome, RecreateReport};
pub use config::AdminConfig;
pub use errors::AdminError;
pub use interfaces::{FileMappingStore, MappingStore, SearchCluster};
pub use opensearch::OpenSearchCluster;
