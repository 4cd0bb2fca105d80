//! Configuration for the index admin.
//!
//! All patterns are compiled once at construction time, so a malformed
//! pattern is a configuration error at startup rather than a runtime
//! failure during a lifecycle operation.

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;

use crate::errors::AdminError;

/// The analyzer used when a locale matches no configured pattern.
pub const STANDARD_ANALYZER: &str = "standard";

/// The settings key that selects the default analyzer of an index.
pub const DEFAULT_ANALYZER_KEY: &str = "analysis.analyzer.default.type";

/// The version suffix used for the first version of an index.
pub const DEFAULT_INDEX_SUFFIX: &str = "_v1";

/// Default interval between readiness pings.
pub const DEFAULT_READY_CHECK_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for [`IndexAdmin`](crate::admin::IndexAdmin).
///
/// Static for the lifetime of the process: the version suffix used when
/// creating new indices, the pattern classifying authoring aliases, the
/// two mapping template names, the ordered locale-to-analyzer table, and
/// the default settings applied to every new index.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Suffix appended to the alias to form the first physical index name.
    pub index_suffix: String,
    /// Aliases matching this pattern use the authoring mapping.
    pub authoring_name_pattern: Regex,
    /// Name of the mapping template for authoring indices.
    pub authoring_mapping: String,
    /// Name of the mapping template for preview indices.
    pub preview_mapping: String,
    /// Ordered locale pattern to analyzer table; the first matching
    /// pattern wins.
    pub locale_mapping: Vec<(Regex, String)>,
    /// Default settings applied when creating indices.
    pub default_settings: HashMap<String, String>,
    /// Interval between readiness pings in `wait_until_ready`.
    pub ready_check_interval: Duration,
}

impl AdminConfig {
    /// Create a configuration with the given authoring pattern and mapping
    /// template names.
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn new(
        authoring_name_pattern: &str,
        authoring_mapping: impl Into<String>,
        preview_mapping: impl Into<String>,
    ) -> Result<Self, AdminError> {
        let authoring_name_pattern = Regex::new(authoring_name_pattern).map_err(|e| {
            AdminError::new(
                authoring_name_pattern,
                format!("invalid authoring name pattern: {}", e),
            )
        })?;

        Ok(Self {
            index_suffix: DEFAULT_INDEX_SUFFIX.to_string(),
            authoring_name_pattern,
            authoring_mapping: authoring_mapping.into(),
            preview_mapping: preview_mapping.into(),
            locale_mapping: Vec::new(),
            default_settings: HashMap::new(),
            ready_check_interval: DEFAULT_READY_CHECK_INTERVAL,
        })
    }

    /// Append a locale pattern and its analyzer to the locale table.
    ///
    /// Entries are consulted in insertion order; the first matching
    /// pattern wins.
    pub fn with_locale(
        mut self,
        locale_pattern: &str,
        analyzer: impl Into<String>,
    ) -> Result<Self, AdminError> {
        let pattern = Regex::new(locale_pattern).map_err(|e| {
            AdminError::new(locale_pattern, format!("invalid locale pattern: {}", e))
        })?;
        self.locale_mapping.push((pattern, analyzer.into()));
        Ok(self)
    }

    /// Add a default setting applied to every created index.
    pub fn with_default_setting(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_settings.insert(key.into(), value.into());
        self
    }

    /// Override the version suffix used for newly created indices.
    pub fn with_index_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.index_suffix = suffix.into();
        self
    }

    /// Override the interval between readiness pings.
    pub fn with_ready_check_interval(mut self, interval: Duration) -> Self {
        self.ready_check_interval = interval;
        self
    }
}
