//! The read-only context a check is evaluated against.

use crate::resource::{Resource, ResourceAccessor};
use preflight_common::Version;
use std::fmt;
use std::sync::Arc;

/// What a run is checking: a cluster accessor, the version pair, and an
/// optional single object under test.
///
/// Created once per run and shared read-only by every check. In lint-only
/// mode the target version equals the current version. Log output goes to
/// the ambient `tracing` subscriber; `debug` asks checks for extra detail.
#[derive(Clone)]
pub struct Target {
    client: Arc<dyn ResourceAccessor>,
    current_version: Option<Version>,
    target_version: Option<Version>,
    resource: Option<Resource>,
    debug: bool,
}

impl Target {
    /// Creates a target with no versions, no object under test, and debug off.
    pub fn new(client: Arc<dyn ResourceAccessor>) -> Self {
        Self {
            client,
            current_version: None,
            target_version: None,
            resource: None,
            debug: false,
        }
    }

    /// Creates a lint-only target: the target version equals the current version.
    pub fn lint(client: Arc<dyn ResourceAccessor>, current: Option<Version>) -> Self {
        Self::new(client).with_versions(current, current)
    }

    /// Sets the current and target versions.
    pub fn with_versions(mut self, current: Option<Version>, target: Option<Version>) -> Self {
        self.current_version = current;
        self.target_version = target;
        self
    }

    /// Scopes workload checks to a single object.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Enables or disables extra diagnostic detail.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the cluster accessor.
    pub fn client(&self) -> &dyn ResourceAccessor {
        self.client.as_ref()
    }

    /// Returns the version the cluster runs now.
    pub fn current_version(&self) -> Option<Version> {
        self.current_version
    }

    /// Returns the version the cluster is moving to.
    pub fn target_version(&self) -> Option<Version> {
        self.target_version
    }

    /// Returns the single object under test, if any.
    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    /// Returns `true` if extra diagnostic detail was requested.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns `true` if the run checks the current state only.
    pub fn is_lint_only(&self) -> bool {
        self.current_version == self.target_version
    }

    /// Returns `true` if both versions are known and the target is newer.
    pub fn is_upgrade(&self) -> bool {
        matches!(
            (self.current_version, self.target_version),
            (Some(current), Some(target)) if target > current
        )
    }

    /// Returns `true` if the upgrade moves from below `boundary` to at or above it.
    pub fn crosses(&self, boundary: Version) -> bool {
        matches!(
            (self.current_version, self.target_version),
            (Some(current), Some(target)) if current < boundary && target >= boundary
        )
    }

    /// Returns `true` if the target version is known and at least `version`.
    pub fn targets_at_least(&self, version: Version) -> bool {
        self.target_version.is_some_and(|t| t >= version)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("current_version", &self.current_version)
            .field("target_version", &self.target_version)
            .field("resource", &self.resource.as_ref().map(|r| &r.name))
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
