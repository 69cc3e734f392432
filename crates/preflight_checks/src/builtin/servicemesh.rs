//! Managed Service Mesh is dropped from DSCInitialization in 3.0.

use preflight_diagnostics::{reason, DiagnosticResult};

use super::{is_managed, satisfied, singleton, start_result, violated, DSCI_KIND, RELEASE_3_0};
use crate::context::RunContext;
use crate::error::CheckError;
use crate::meta::{CheckGroup, CheckMeta};
use crate::target::Target;
use crate::Check;

const SERVICEMESH_STATE: &str = "/serviceMesh/managementState";

/// Warns when the platform still manages Service Mesh before a 3.0 upgrade.
///
/// After the upgrade the mesh is left in place but no longer reconciled, so
/// this is advisory rather than blocking.
pub struct ServiceMeshRemoval {
    meta: CheckMeta,
}

impl ServiceMeshRemoval {
    /// Creates the check.
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                "services.servicemesh.removal",
                "Service Mesh removal",
                CheckGroup::Service,
            )
            .with_description("platform-managed Service Mesh is not supported from 3.0")
            .with_remediation(
                "set spec.serviceMesh.managementState to Removed on the DSCInitialization \
                 and manage Service Mesh separately if still required",
            ),
        }
    }
}

impl Default for ServiceMeshRemoval {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ServiceMeshRemoval {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, _ctx: &RunContext, target: &Target) -> Result<bool, CheckError> {
        Ok(target.crosses(RELEASE_3_0))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult, CheckError> {
        let mut result = start_result(&self.meta, target);

        let condition = match singleton(target, DSCI_KIND)? {
            Some(dsci) if is_managed(&dsci, SERVICEMESH_STATE) => violated(
                &self.meta,
                reason::TYPE_CONFIGURED,
                reason::VERSION_INCOMPATIBLE,
                format!("Service Mesh is managed by {}", dsci.name),
            ),
            Some(_) => satisfied(
                reason::TYPE_CONFIGURED,
                reason::REQUIREMENTS_MET,
                "Service Mesh is not managed by the platform",
            ),
            None => satisfied(
                reason::TYPE_CONFIGURED,
                reason::RESOURCE_NOT_FOUND,
                "no DSCInitialization found",
            ),
        };
        result.push_condition(condition);
        Ok(result)
    }
}
