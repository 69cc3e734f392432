//! ModelMesh serving is removed in 3.0.

use preflight_diagnostics::{reason, DiagnosticResult, Impact};

use super::{is_managed, satisfied, singleton, start_result, violated, DSC_KIND, RELEASE_3_0};
use crate::context::RunContext;
use crate::error::CheckError;
use crate::meta::{CheckGroup, CheckMeta};
use crate::target::Target;
use crate::Check;

const MODELMESH_STATE: &str = "/components/modelmeshserving/managementState";

/// Blocks an upgrade across 3.0 while the ModelMesh serving component is managed.
pub struct ModelMeshRemoval {
    meta: CheckMeta,
}

impl ModelMeshRemoval {
    /// Creates the check.
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                "components.modelmesh.removal",
                "ModelMesh removal",
                CheckGroup::Component,
            )
            .with_description("ModelMesh serving is removed in 3.0")
            .with_remediation(
                "move multi-model deployments to KServe and set \
                 spec.components.modelmeshserving.managementState to Removed",
            ),
        }
    }
}

impl Default for ModelMeshRemoval {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ModelMeshRemoval {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, _ctx: &RunContext, target: &Target) -> Result<bool, CheckError> {
        Ok(target.crosses(RELEASE_3_0))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult, CheckError> {
        let mut result = start_result(&self.meta, target);

        let condition = match singleton(target, DSC_KIND)? {
            None => satisfied(
                reason::TYPE_COMPATIBLE,
                reason::RESOURCE_NOT_FOUND,
                "no DataScienceCluster found",
            ),
            Some(dsc) if is_managed(&dsc, MODELMESH_STATE) => violated(
                &self.meta,
                reason::TYPE_COMPATIBLE,
                reason::VERSION_INCOMPATIBLE,
                format!("ModelMesh serving is managed on {}", dsc.name),
            )
            .with_impact(Impact::Blocking),
            Some(_) => satisfied(
                reason::TYPE_COMPATIBLE,
                reason::REQUIREMENTS_MET,
                "ModelMesh serving is not managed",
            ),
        };
        result.push_condition(condition);
        Ok(result)
    }
}
