//! Configuration types deserialized from `preflight.toml`.

use preflight_common::Version;
use serde::Deserialize;
use std::time::Duration;

/// The top-level configuration parsed from `preflight.toml`.
///
/// Every table is optional; an empty file yields [`ProjectConfig::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// The cluster's version pair.
    #[serde(default)]
    pub cluster: ClusterConfig,
    /// Defaults for check selection and execution.
    #[serde(default)]
    pub run: RunConfig,
    /// Per-check settings.
    #[serde(default)]
    pub checks: ChecksConfig,
}

/// The versions a run is evaluated against.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// The version the cluster runs now.
    #[serde(default)]
    pub current_version: Option<Version>,
    /// The version the cluster is moving to. Omitted means lint-only.
    #[serde(default)]
    pub target_version: Option<Version>,
}

impl ClusterConfig {
    /// Returns the target version, falling back to the current version for lint-only runs.
    pub fn effective_target(&self) -> Option<Version> {
        self.target_version.or(self.current_version)
    }
}

/// Selection and execution defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Worker threads; `None` uses the thread pool's default size.
    #[serde(default)]
    pub workers: Option<usize>,
    /// Default selection pattern.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Default category filter; empty means every category.
    #[serde(default)]
    pub category: String,
    /// Deadline for the whole run, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RunConfig {
    /// Returns the run deadline as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: None,
            pattern: default_pattern(),
            category: String::new(),
            timeout_secs: None,
        }
    }
}

fn default_pattern() -> String {
    "*".to_string()
}

/// Per-check settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksConfig {
    /// Selection patterns for checks to exclude after selection.
    #[serde(default)]
    pub skip: Vec<String>,
}
