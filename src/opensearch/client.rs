//! OpenSearch cluster transport implementation.
//!
//! Implements [`SearchCluster`] over the OpenSearch Rust client. Each
//! method issues a single request and maps any transport or cluster-side
//! failure into an [`AdminError`] naming the affected index or alias.

use std::collections::HashMap;

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesGetAliasParts,
        IndicesGetSettingsParts,
    },
    OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::AdminError;
use crate::interfaces::SearchCluster;

/// Cluster transport backed by an OpenSearch node.
///
/// # Example
///
/// ```ignore
/// let cluster = OpenSearchCluster::new("http://localhost:9200")?;
/// let exists = cluster.exists("blog").await?;
/// ```
#[derive(Debug)]
pub struct OpenSearchCluster {
    client: OpenSearch,
}

impl OpenSearchCluster {
    /// Create a transport connected to the given OpenSearch URL.
    pub fn new(url: &str) -> Result<Self, AdminError> {
        let parsed_url =
            Url::parse(url).map_err(|e| AdminError::new(url, format!("invalid URL: {}", e)))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| AdminError::new(url, format!("error building transport: {}", e)))?;

        info!(url = %url, "Created OpenSearch cluster transport");

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Consume a failed response into an error carrying its status and body.
    async fn response_error(response: Response, name: &str, context: &str) -> AdminError {
        let status = response.status_code();
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, context = context, "Cluster request failed");
        AdminError::new(
            name,
            format!("{} failed with status {}: {}", context, status, body),
        )
    }

    /// Parse the body of a successful response as JSON.
    async fn response_json(response: Response, name: &str) -> Result<Value, AdminError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| AdminError::new(name, format!("error parsing cluster response: {}", e)))
    }
}

/// Flatten a nested settings object into dotted keys.
///
/// Scalar values keep their string form; non-string scalars and arrays are
/// rendered as JSON text.
fn flatten_settings(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_settings(&key, value, out);
            }
        }
        Value::Null => {}
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

#[async_trait]
impl SearchCluster for OpenSearchCluster {
    async fn exists(&self, name: &str) -> Result<bool, AdminError> {
        debug!(name, "Checking if index or alias exists");

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| AdminError::new(name, format!("error consulting index: {}", e)))?;

        let status = response.status_code();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 404 {
            return Ok(false);
        }
        Err(Self::response_error(response, name, "existence check").await)
    }

    async fn create_index(&self, index: &str, body: Value) -> Result<(), AdminError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| AdminError::new(index, format!("error creating index: {}", e)))?;

        if !response.status_code().is_success() {
            return Err(Self::response_error(response, index, "create index").await);
        }

        debug!(index, "Index created");
        Ok(())
    }

    async fn delete_indices(&self, indices: &[String]) -> Result<(), AdminError> {
        let names: Vec<&str> = indices.iter().map(String::as_str).collect();
        let joined = names.join(",");

        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&names))
            .send()
            .await
            .map_err(|e| AdminError::new(&joined, format!("error deleting indices: {}", e)))?;

        if !response.status_code().is_success() {
            return Err(Self::response_error(response, &joined, "delete indices").await);
        }

        debug!(indices = %joined, "Indices deleted");
        Ok(())
    }

    async fn alias_indices(&self, pattern: &str) -> Result<Vec<String>, AdminError> {
        let response = self
            .client
            .indices()
            .get_alias(IndicesGetAliasParts::Name(&[pattern]))
            .send()
            .await
            .map_err(|e| AdminError::new(pattern, format!("error resolving alias: {}", e)))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(Self::response_error(response, pattern, "alias lookup").await);
        }

        let body = Self::response_json(response, pattern).await?;
        let mut indices: Vec<String> = body
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        indices.sort();
        Ok(indices)
    }

    async fn get_settings(&self, index: &str) -> Result<HashMap<String, String>, AdminError> {
        let response = self
            .client
            .indices()
            .get_settings(IndicesGetSettingsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| AdminError::new(index, format!("error fetching settings: {}", e)))?;

        if !response.status_code().is_success() {
            return Err(Self::response_error(response, index, "get settings").await);
        }

        let body = Self::response_json(response, index).await?;
        let mut flat = HashMap::new();
        flatten_settings("", &body[index]["settings"], &mut flat);

        // Settings are stored under the "index." namespace; also expose
        // them without the prefix so both key forms resolve.
        for (key, value) in flat.clone() {
            if let Some(stripped) = key.strip_prefix("index.") {
                flat.entry(stripped.to_string()).or_insert(value);
            }
        }
        Ok(flat)
    }

    async fn reindex(&self, source: &str, dest: &str) -> Result<u64, AdminError> {
        info!(source, dest, "Reindexing all existing content");

        let response = self
            .client
            .reindex()
            .refresh(true)
            .body(json!({
                "source": { "index": source },
                "dest": { "index": dest }
            }))
            .send()
            .await
            .map_err(|e| AdminError::new(source, format!("error reindexing: {}", e)))?;

        if !response.status_code().is_success() {
            return Err(Self::response_error(response, source, "reindex").await);
        }

        let body = Self::response_json(response, source).await?;
        let total = body["total"].as_u64().unwrap_or(0);
        info!(total, dest, "Reindex completed");
        Ok(total)
    }

    async fn swap_alias(
        &self,
        alias: &str,
        old_index: &str,
        new_index: &str,
    ) -> Result<(), AdminError> {
        info!(alias, old_index, new_index, "Swapping alias");

        let response = self
            .client
            .indices()
            .update_aliases()
            .body(json!({
                "actions": [
                    { "add": { "index": new_index, "alias": alias } },
                    { "remove": { "index": old_index, "alias": alias } }
                ]
            }))
            .send()
            .await
            .map_err(|e| AdminError::new(alias, format!("error swapping alias: {}", e)))?;

        if !response.status_code().is_success() {
            return Err(Self::response_error(response, alias, "alias swap").await);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AdminError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| AdminError::new("cluster", format!("error pinging cluster: {}", e)))?;

        if !response.status_code().is_success() {
            return Err(Self::response_error(response, "cluster", "ping").await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_settings_nested_object() {
        let settings = json!({
            "index": {
                "number_of_shards": "3",
                "analysis": {
                    "analyzer": {
                        "default": { "type": "spanish" }
                    }
                }
            }
        });

        let mut flat = HashMap::new();
        flatten_settings("", &settings, &mut flat);

        assert_eq!(flat.get("index.number_of_shards"), Some(&"3".to_string()));
        assert_eq!(
            flat.get("index.analysis.analyzer.default.type"),
            Some(&"spanish".to_string())
        );
    }

    #[test]
    fn test_flatten_settings_non_string_scalars() {
        let settings = json!({ "index": { "refresh_interval": 30, "hidden": true } });

        let mut flat = HashMap::new();
        flatten_settings("", &settings, &mut flat);

        assert_eq!(flat.get("index.refresh_interval"), Some(&"30".to_string()));
        assert_eq!(flat.get("index.hidden"), Some(&"true".to_string()));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchCluster::new("not a url");

        assert!(result.is_err());
        assert!(result.unwrap_err().cause.contains("invalid URL"));
    }
}
