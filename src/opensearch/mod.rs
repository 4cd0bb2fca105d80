//! OpenSearch implementation of the cluster transport.
//!
//! This module provides a concrete implementation of `SearchCluster`
//! using the official OpenSearch Rust client.

mod client;

pub use client::OpenSearchCluster;
