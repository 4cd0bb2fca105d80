//! Mapping selection and settings inheritance.
//!
//! Aliases are classified into exactly two content types: authoring
//! aliases (matching the configured pattern) and preview aliases (all
//! others). Settings inheritance lets an upgraded index keep operator
//! tuned values from the old version instead of reverting to defaults.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::config::AdminConfig;
use crate::errors::AdminError;
use crate::interfaces::SearchCluster;

/// The two supported mapping variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// Indices used for authoring content.
    Authoring,
    /// Indices used for preview/live content.
    Preview,
}

impl MappingKind {
    /// Classify an alias by matching it against the authoring name
    /// pattern. Binary: anything not matching is a preview alias.
    pub fn for_alias(alias: &str, authoring_name_pattern: &Regex) -> Self {
        if authoring_name_pattern.is_match(alias) {
            Self::Authoring
        } else {
            Self::Preview
        }
    }

    /// The configured template name for this mapping kind.
    pub fn template_name<'a>(&self, config: &'a AdminConfig) -> &'a str {
        match self {
            Self::Authoring => &config.authoring_mapping,
            Self::Preview => &config.preview_mapping,
        }
    }
}

/// Compute the settings a new index version inherits from an existing one.
///
/// Queries the cluster for the current settings of `index` and, for every
/// key present in `defaults`, keeps the observed value when it is
/// non-empty and the default otherwise. Keys not present in `defaults`
/// are never consulted or carried over.
pub async fn inherited_settings(
    cluster: &dyn SearchCluster,
    index: &str,
    defaults: &HashMap<String, String>,
) -> Result<HashMap<String, String>, AdminError> {
    let existing = cluster.get_settings(index).await?;

    let mut settings = defaults.clone();
    for key in defaults.keys() {
        if let Some(value) = existing.get(key).filter(|value| !value.is_empty()) {
            debug!(index, key, value, "Using existing setting from index");
            settings.insert(key.clone(), value.clone());
        }
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    #[test]
    fn test_mapping_kind_authoring() {
        let pattern = Regex::new(".*_authoring").unwrap();

        assert_eq!(
            MappingKind::for_alias("site_authoring", &pattern),
            MappingKind::Authoring
        );
    }

    #[test]
    fn test_mapping_kind_preview() {
        let pattern = Regex::new(".*_authoring").unwrap();

        assert_eq!(
            MappingKind::for_alias("site_preview", &pattern),
            MappingKind::Preview
        );
    }

    #[test]
    fn test_template_name_per_kind() {
        let config = AdminConfig::new(".*_authoring", "authoring.json", "preview.json").unwrap();

        assert_eq!(
            MappingKind::Authoring.template_name(&config),
            "authoring.json"
        );
        assert_eq!(MappingKind::Preview.template_name(&config), "preview.json");
    }

    /// Cluster double returning a fixed settings map for any index.
    struct FixedSettings(HashMap<String, String>);

    #[async_trait]
    impl SearchCluster for FixedSettings {
        async fn exists(&self, _name: &str) -> Result<bool, AdminError> {
            unimplemented!()
        }

        async fn create_index(&self, _index: &str, _body: Value) -> Result<(), AdminError> {
            unimplemented!()
        }

        async fn delete_indices(&self, _indices: &[String]) -> Result<(), AdminError> {
            unimplemented!()
        }

        async fn alias_indices(&self, _pattern: &str) -> Result<Vec<String>, AdminError> {
            unimplemented!()
        }

        async fn get_settings(&self, _index: &str) -> Result<HashMap<String, String>, AdminError> {
            Ok(self.0.clone())
        }

        async fn reindex(&self, _source: &str, _dest: &str) -> Result<u64, AdminError> {
            unimplemented!()
        }

        async fn swap_alias(
            &self,
            _alias: &str,
            _old_index: &str,
            _new_index: &str,
        ) -> Result<(), AdminError> {
            unimplemented!()
        }

        async fn ping(&self) -> Result<(), AdminError> {
            unimplemented!()
        }
    }

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_inherited_settings_existing_value_wins() {
        let cluster = FixedSettings(map(&[("S", "custom")]));
        let defaults = map(&[("S", "default"), ("T", "default")]);

        let settings = inherited_settings(&cluster, "blog_v1", &defaults)
            .await
            .unwrap();

        assert_eq!(settings, map(&[("S", "custom"), ("T", "default")]));
    }

    #[tokio::test]
    async fn test_inherited_settings_ignores_empty_values() {
        let cluster = FixedSettings(map(&[("S", "")]));
        let defaults = map(&[("S", "default")]);

        let settings = inherited_settings(&cluster, "blog_v1", &defaults)
            .await
            .unwrap();

        assert_eq!(settings, map(&[("S", "default")]));
    }

    #[tokio::test]
    async fn test_inherited_settings_ignores_keys_outside_defaults() {
        let cluster = FixedSettings(map(&[("S", "custom"), ("unrelated", "value")]));
        let defaults = map(&[("S", "default")]);

        let settings = inherited_settings(&cluster, "blog_v1", &defaults)
            .await
            .unwrap();

        assert_eq!(settings, map(&[("S", "custom")]));
    }
}
