//! Naming resolution for aliases, locales, and physical index names.
//!
//! All functions here are pure: given an alias, an optional locale, and
//! the configured locale table, they derive the locale-qualified alias,
//! the default analyzer, and the physical index name of a version. No
//! cluster I/O happens in this module.

use std::fmt;

use regex::Regex;

use crate::config::STANDARD_ANALYZER;
use crate::errors::AdminError;

/// Token separating the base index name from its version number.
const VERSION_TOKEN: &str = "_v";

/// Qualify an alias with an optional locale, producing `alias-{locale}`.
pub fn locale_alias(alias: &str, locale: Option<&str>) -> String {
    match locale {
        Some(locale) => format!("{}-{}", alias, locale),
        None => alias.to_string(),
    }
}

/// Resolve the default analyzer for a locale.
///
/// Scans the ordered locale table and returns the analyzer of the first
/// pattern matching the locale. Falls back to the standard analyzer when
/// the locale is absent or matches no pattern.
pub fn resolve_analyzer<'a>(table: &'a [(Regex, String)], locale: Option<&str>) -> &'a str {
    match locale {
        Some(locale) => table
            .iter()
            .find(|(pattern, _)| pattern.is_match(locale))
            .map(|(_, analyzer)| analyzer.as_str())
            .unwrap_or(STANDARD_ANALYZER),
        None => STANDARD_ANALYZER,
    }
}

/// A parsed physical index name: `{alias}[-{locale}]_v{N}`.
///
/// Physical names are immutable once created; a lineage's current version
/// is recoverable purely from the name bound to the alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalIndexName {
    /// The logical alias the index belongs to.
    pub alias: String,
    /// The locale variant, when the lineage is locale-partitioned.
    pub locale: Option<String>,
    /// The version number, starting at 1.
    pub version: u32,
}

impl PhysicalIndexName {
    /// Parse a physical index name into its alias, locale, and version.
    ///
    /// The name must contain the version token `_v` exactly once, followed
    /// by a positive integer. The segment after the last `-` is treated as
    /// a locale only when it has the underscore-separated language/country
    /// form (e.g. `en_US`).
    pub fn parse(name: &str) -> Result<Self, AdminError> {
        let tokens: Vec<&str> = name.split(VERSION_TOKEN).collect();
        if tokens.len() != 2 {
            return Err(AdminError::new(
                name,
                format!("could not find current version for index '{}'", name),
            ));
        }

        let version: u32 = tokens[1].parse().map_err(|_| {
            AdminError::new(name, format!("invalid version number '{}'", tokens[1]))
        })?;
        if version == 0 {
            return Err(AdminError::new(name, "version numbers start at 1"));
        }

        let base = tokens[0];
        let (alias, locale) = match base.rsplit_once('-') {
            Some((alias, candidate)) if candidate.contains('_') => {
                (alias.to_string(), Some(candidate.to_string()))
            }
            _ => (base.to_string(), None),
        };

        Ok(Self {
            alias,
            locale,
            version,
        })
    }

    /// The next version in this lineage: same alias and locale, version + 1.
    pub fn successor(&self) -> Self {
        Self {
            alias: self.alias.clone(),
            locale: self.locale.clone(),
            version: self.version + 1,
        }
    }

    /// The version suffix of this name, e.g. `_v2`.
    pub fn suffix(&self) -> String {
        format!("{}{}", VERSION_TOKEN, self.version)
    }

    /// The locale-qualified alias this index is reachable under.
    pub fn locale_alias(&self) -> String {
        locale_alias(&self.alias, self.locale.as_deref())
    }
}

impl fmt::Display for PhysicalIndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.locale_alias(), self.suffix())
    }
}
