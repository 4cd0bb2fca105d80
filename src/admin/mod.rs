//! Index lifecycle management.
//!
//! This module provides the main entry point for administering versioned
//! indices behind stable aliases: creating the first version of an index,
//! upgrading every lineage of an alias to a new version without downtime,
//! deleting all indices of an alias, and gating startup on cluster
//! readiness.
//!
//! The upgrade protocol per lineage is strictly sequential: create the
//! new version unbound, reindex all documents into it, atomically swap
//! the alias, then delete the old version. Clients reading through the
//! alias never observe an empty or half-populated index.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::config::{AdminConfig, DEFAULT_ANALYZER_KEY};
use crate::errors::AdminError;
use crate::interfaces::{MappingStore, SearchCluster};
use crate::naming::{self, PhysicalIndexName};
use crate::settings::{self, MappingKind};

/// Outcome of one lineage during a recreate.
#[derive(Debug, Clone, Serialize)]
pub enum LineageOutcome {
    /// The lineage was upgraded: the alias now points at `new` and `old`
    /// no longer exists.
    Upgraded { old: String, new: String },
    /// The lineage failed part-way; the recreate aborted at this point.
    /// Already-completed steps are not rolled back.
    Failed { index: String, error: AdminError },
    /// The lineage was not attempted because an earlier one failed.
    Skipped { index: String },
}

/// Per-lineage results of a recreate, in processing order.
///
/// A recreate that hits a failure aborts the remaining lineages but keeps
/// everything already upgraded, so callers need the full picture to
/// distinguish "fully upgraded", "partially upgraded", and "not upgraded".
#[derive(Debug, Clone, Serialize)]
pub struct RecreateReport {
    /// The alias the recreate was run for.
    pub alias: String,
    /// One outcome per index that was bound under the alias.
    pub lineages: Vec<LineageOutcome>,
}

impl RecreateReport {
    /// Whether every lineage was upgraded.
    pub fn is_complete(&self) -> bool {
        self.lineages
            .iter()
            .all(|outcome| matches!(outcome, LineageOutcome::Upgraded { .. }))
    }

    /// The error that aborted the recreate, if any.
    pub fn failure(&self) -> Option<&AdminError> {
        self.lineages.iter().find_map(|outcome| match outcome {
            LineageOutcome::Failed { error, .. } => Some(error),
            _ => None,
        })
    }
}

/// Manages the lifecycle of versioned indices behind stable aliases.
///
/// Owns the cluster transport and the mapping store for its lifetime;
/// operations are issued strictly sequentially, each step gated on the
/// previous step's success. No internal locking is provided: callers must
/// not run `recreate_index` and `delete_indexes` concurrently on the same
/// alias.
pub struct IndexAdmin {
    cluster: Box<dyn SearchCluster>,
    mappings: Box<dyn MappingStore>,
    config: AdminConfig,
}

impl IndexAdmin {
    /// Create a new admin over the given cluster transport and mapping
    /// store.
    pub fn new(
        cluster: Box<dyn SearchCluster>,
        mappings: Box<dyn MappingStore>,
        config: AdminConfig,
    ) -> Self {
        Self {
            cluster,
            mappings,
            config,
        }
    }

    /// Create the first version of an index for an alias, bound to the
    /// alias on creation.
    ///
    /// When a locale is given, the alias is partitioned per locale
    /// (`alias-{locale}`) and the locale's analyzer is selected through
    /// the configured locale table. Idempotent at alias-existence
    /// granularity: if the alias already exists the call is a no-op and
    /// settings are not reconciled.
    pub async fn create_index(&self, alias: &str, locale: Option<&str>) -> Result<(), AdminError> {
        let suffix = self.config.index_suffix.clone();
        self.create_version(alias, locale, &suffix, true, self.config.default_settings.clone())
            .await
    }

    /// Create one physical index version.
    ///
    /// `bind_alias` controls both the existence probe (alias vs concrete
    /// index name) and whether the alias is attached to the new index in
    /// the same create request. Recreate uses the unbound form so clients
    /// never see the new version before it is populated.
    async fn create_version(
        &self,
        alias: &str,
        locale: Option<&str>,
        suffix: &str,
        bind_alias: bool,
        mut settings: HashMap<String, String>,
    ) -> Result<(), AdminError> {
        let locale_alias = naming::locale_alias(alias, locale);
        let analyzer = naming::resolve_analyzer(&self.config.locale_mapping, locale);
        let index_name = format!("{}{}", locale_alias, suffix);

        let probe = if bind_alias {
            locale_alias.as_str()
        } else {
            index_name.as_str()
        };
        if self.cluster.exists(probe).await? {
            debug!(name = probe, "Already exists, skipping creation");
            return Ok(());
        }

        let kind = MappingKind::for_alias(alias, &self.config.authoring_name_pattern);
        let template_name = kind.template_name(&self.config);
        let template = self.mappings.load(template_name).await?;
        let mappings: Value = serde_json::from_str(&template).map_err(|e| {
            AdminError::new(
                &locale_alias,
                format!("invalid mapping template '{}': {}", template_name, e),
            )
        })?;

        settings.insert(DEFAULT_ANALYZER_KEY.to_string(), analyzer.to_string());

        let mut body = json!({ "settings": settings, "mappings": mappings });
        if bind_alias {
            info!(alias = %locale_alias, "Creating alias");
            body["aliases"] = json!({});
            body["aliases"][locale_alias.as_str()] = json!({});
        }

        info!(index = %index_name, "Creating index");
        self.cluster.create_index(&index_name, body).await
    }

    /// Upgrade every lineage bound under an alias to a new version,
    /// without downtime.
    ///
    /// Each index matching `{alias}*` is processed sequentially and
    /// independently: parse its version, inherit its settings, create
    /// version N+1 unbound, reindex into it, atomically swap the alias,
    /// delete version N. The first lineage failure aborts the remaining
    /// lineages; completed lineages are not rolled back. The returned
    /// report carries one outcome per lineage so callers can tell a full
    /// upgrade from a partial one.
    ///
    /// Only the enumeration of existing indices can fail the whole call.
    pub async fn recreate_index(&self, alias: &str) -> Result<RecreateReport, AdminError> {
        info!(alias, "Recreating indices for alias");
        let existing = self.cluster.alias_indices(&format!("{}*", alias)).await?;

        let mut lineages = Vec::with_capacity(existing.len());
        let mut aborted = false;
        for index in existing {
            if aborted {
                lineages.push(LineageOutcome::Skipped { index });
                continue;
            }
            info!(index = %index, alias, "Found index for alias");
            match self.upgrade_lineage(&index).await {
                Ok(new) => lineages.push(LineageOutcome::Upgraded { old: index, new }),
                Err(error) => {
                    error!(
                        index = %index,
                        error = %error,
                        "Lineage upgrade failed, aborting remaining lineages"
                    );
                    aborted = true;
                    lineages.push(LineageOutcome::Failed { index, error });
                }
            }
        }

        Ok(RecreateReport {
            alias: alias.to_string(),
            lineages,
        })
    }

    /// Run the upgrade protocol for a single lineage, returning the name
    /// of the new bound index.
    async fn upgrade_lineage(&self, index: &str) -> Result<String, AdminError> {
        let current = PhysicalIndexName::parse(index)?;
        let next = current.successor();
        debug!(index, next = %next, "Upgrading lineage");

        let inherited = settings::inherited_settings(
            self.cluster.as_ref(),
            index,
            &self.config.default_settings,
        )
        .await?;

        self.create_version(
            &current.alias,
            current.locale.as_deref(),
            &next.suffix(),
            false,
            inherited,
        )
        .await?;

        let new_index = next.to_string();
        let copied = self.cluster.reindex(index, &new_index).await?;
        info!(copied, from = index, to = %new_index, "Reindexed documents");

        self.cluster
            .swap_alias(&current.locale_alias(), index, &new_index)
            .await?;
        self.cluster.delete_indices(&[index.to_string()]).await?;
        Ok(new_index)
    }

    /// Delete every index currently reachable under `{alias}*` as a
    /// single batch. Not reversible; does not distinguish bound from
    /// unbound indices. A no-op when nothing matches.
    pub async fn delete_indexes(&self, alias: &str) -> Result<(), AdminError> {
        let indices = self.cluster.alias_indices(&format!("{}*", alias)).await?;
        if indices.is_empty() {
            debug!(alias, "No indices to delete");
            return Ok(());
        }
        info!(alias, ?indices, "Deleting indices");
        self.cluster.delete_indices(&indices).await
    }

    /// Block until the cluster answers a ping, retrying forever at the
    /// configured interval. Ping failures are logged, never surfaced.
    ///
    /// This future is cancellation-safe: dropping it abandons the wait.
    /// For a bounded wait use [`wait_until_ready_timeout`].
    ///
    /// [`wait_until_ready_timeout`]: IndexAdmin::wait_until_ready_timeout
    pub async fn wait_until_ready(&self) {
        info!("Waiting for search cluster to be ready");
        loop {
            match self.cluster.ping().await {
                Ok(()) => return,
                Err(e) => debug!(error = %e, "Error pinging search cluster"),
            }
            info!(
                interval = ?self.config.ready_check_interval,
                "Search cluster not ready, will try again"
            );
            tokio::time::sleep(self.config.ready_check_interval).await;
        }
    }

    /// Bounded variant of [`wait_until_ready`]: gives up after `limit`.
    ///
    /// [`wait_until_ready`]: IndexAdmin::wait_until_ready
    pub async fn wait_until_ready_timeout(&self, limit: Duration) -> Result<(), AdminError> {
        tokio::time::timeout(limit, self.wait_until_ready())
            .await
            .map_err(|_| {
                AdminError::new("cluster", format!("cluster not ready after {:?}", limit))
            })
    }
}
