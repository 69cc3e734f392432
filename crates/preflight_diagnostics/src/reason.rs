//! Well-known condition types and reason codes shared by checks and the executor.
//!
//! Reasons are machine-stable: reporting tools match on them, so existing
//! values must not change.

/// The check ran to completion (used for synthesized failure conditions).
pub const TYPE_VALIDATED: &str = "Validated";
/// A component or setting is compatible with the target version.
pub const TYPE_COMPATIBLE: &str = "Compatible";
/// A resource is configured as required.
pub const TYPE_CONFIGURED: &str = "Configured";
/// A required dependency is present.
pub const TYPE_AVAILABLE: &str = "Available";
/// A workload is ready for the upgrade.
pub const TYPE_READY: &str = "Ready";

/// The requirement is satisfied.
pub const REQUIREMENTS_MET: &str = "RequirementsMet";
/// A required resource does not exist.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFound";
/// Configuration in use will stop working on the target version.
pub const VERSION_INCOMPATIBLE: &str = "VersionIncompatible";
/// A resource carries a configuration value that is not allowed.
pub const CONFIGURATION_INVALID: &str = "ConfigurationInvalid";
/// Workloads must be acted on before the upgrade.
pub const WORKLOAD_ACTION_REQUIRED: &str = "WorkloadActionRequired";

/// The check's machinery failed for an unclassified reason.
pub const CHECK_EXECUTION_FAILED: &str = "CheckExecutionFailed";
/// The cluster denied access to a resource (HTTP 403).
pub const PERMISSION_DENIED: &str = "PermissionDenied";
/// The cluster rejected the credentials (HTTP 401).
pub const UNAUTHORIZED: &str = "Unauthorized";
/// A request to the cluster timed out.
pub const API_TIMEOUT: &str = "APITimeout";
/// The cluster API was unavailable (HTTP 503).
pub const SERVICE_UNAVAILABLE: &str = "ServiceUnavailable";
