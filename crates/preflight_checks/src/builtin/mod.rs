//! Built-in upgrade checks.
//!
//! Each check lives in its own module. [`register_builtin_checks`] adds the
//! whole set to a registry.

mod certmanager;
mod kserve_serverless;
mod modelmesh;
mod notebooks;
mod servicemesh;

pub use certmanager::CertManagerInstalled;
pub use kserve_serverless::KServeServerlessRemoval;
pub use modelmesh::ModelMeshRemoval;
pub use notebooks::RunningNotebooks;
pub use servicemesh::ServiceMeshRemoval;

use std::sync::Arc;

use preflight_common::Version;
use preflight_diagnostics::{annotation, Condition, ConditionStatus, DiagnosticResult};

use crate::error::{CheckError, RegistryError};
use crate::meta::CheckMeta;
use crate::registry::CheckRegistry;
use crate::resource::Resource;
use crate::target::Target;

/// The release that removes serverless KServe, ModelMesh, and managed Service Mesh.
pub const RELEASE_3_0: Version = Version::new(3, 0, 0);

const DSC_KIND: &str = "DataScienceCluster";
const DSCI_KIND: &str = "DSCInitialization";
const MANAGED: &str = "Managed";

/// Registers all five built-in checks.
pub fn register_builtin_checks(registry: &mut CheckRegistry) -> Result<(), RegistryError> {
    registry.register(Arc::new(KServeServerlessRemoval::new()))?;
    registry.register(Arc::new(ModelMeshRemoval::new()))?;
    registry.register(Arc::new(ServiceMeshRemoval::new()))?;
    registry.register(Arc::new(CertManagerInstalled::new()))?;
    registry.register(Arc::new(RunningNotebooks::new()))?;
    Ok(())
}

/// Fetches the single cluster-scoped object of `kind`.
///
/// Platform singletons (the DataScienceCluster, the DSCInitialization) are
/// looked up by kind since their name is chosen at install time.
fn singleton(target: &Target, kind: &str) -> Result<Option<Resource>, CheckError> {
    let mut objects = target.client().list(kind, None)?;
    match objects.len() {
        0 | 1 => Ok(objects.pop()),
        n => Err(CheckError::failed(format!(
            "expected at most one {kind}, found {n}"
        ))),
    }
}

fn is_managed(resource: &Resource, pointer: &str) -> bool {
    resource.spec_str(pointer) == Some(MANAGED)
}

/// Starts a result for `meta`, stamped with the check ID and the known versions.
fn start_result(meta: &CheckMeta, target: &Target) -> DiagnosticResult {
    let mut result = meta.new_result();
    result.annotate(annotation::CHECK_ID, meta.id.as_str());
    if let Some(current) = target.current_version() {
        result.annotate(annotation::SOURCE_VERSION, current.to_string());
    }
    if let Some(wanted) = target.target_version() {
        result.annotate(annotation::TARGET_VERSION, wanted.to_string());
    }
    result
}

/// A `True` condition with the given reason and message.
fn satisfied(condition_type: &str, reason: &str, message: impl Into<String>) -> Condition {
    Condition::new(condition_type, ConditionStatus::True)
        .with_reason(reason)
        .with_message(message)
}

/// A `False` condition carrying the check's remediation.
fn violated(
    meta: &CheckMeta,
    condition_type: &str,
    reason: &str,
    message: impl Into<String>,
) -> Condition {
    let condition = Condition::new(condition_type, ConditionStatus::False)
        .with_reason(reason)
        .with_message(message);
    if meta.remediation.is_empty() {
        condition
    } else {
        condition.with_remediation(meta.remediation.as_str())
    }
}
