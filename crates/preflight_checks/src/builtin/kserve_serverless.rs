//! KServe serverless mode is removed in 3.0.

use preflight_diagnostics::{reason, DiagnosticResult, Impact};
use tracing::debug;

use super::{is_managed, satisfied, singleton, start_result, violated, DSC_KIND, RELEASE_3_0};
use crate::context::RunContext;
use crate::error::CheckError;
use crate::meta::{CheckGroup, CheckMeta};
use crate::target::Target;
use crate::Check;

const KSERVE_STATE: &str = "/components/kserve/managementState";
const SERVERLESS_STATE: &str = "/components/kserve/serving/managementState";

/// Blocks an upgrade across 3.0 while KServe still runs in serverless mode.
///
/// Serverless deployments depend on OpenShift Serverless (Knative), which the
/// 3.0 platform no longer manages. Inference services have to be moved to raw
/// deployment mode first.
pub struct KServeServerlessRemoval {
    meta: CheckMeta,
}

impl KServeServerlessRemoval {
    /// Creates the check.
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                "components.kserve.serverless-removal",
                "KServe serverless removal",
                CheckGroup::Component,
            )
            .with_description("KServe serverless mode is not supported from 3.0")
            .with_remediation(
                "migrate InferenceServices to RawDeployment mode and set \
                 spec.components.kserve.serving.managementState to Removed",
            ),
        }
    }
}

impl Default for KServeServerlessRemoval {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for KServeServerlessRemoval {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, _ctx: &RunContext, target: &Target) -> Result<bool, CheckError> {
        Ok(target.crosses(RELEASE_3_0))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult, CheckError> {
        let mut result = start_result(&self.meta, target);

        let Some(dsc) = singleton(target, DSC_KIND)? else {
            result.push_condition(satisfied(
                reason::TYPE_COMPATIBLE,
                reason::RESOURCE_NOT_FOUND,
                "no DataScienceCluster found",
            ));
            return Ok(result);
        };

        let serverless = is_managed(&dsc, KSERVE_STATE) && is_managed(&dsc, SERVERLESS_STATE);
        if target.debug() {
            debug!(dsc = %dsc.name, serverless, "inspected KServe serving mode");
        }

        let condition = if serverless {
            violated(
                &self.meta,
                reason::TYPE_COMPATIBLE,
                reason::VERSION_INCOMPATIBLE,
                format!(
                    "KServe serverless mode is managed on {}; it is removed in {RELEASE_3_0}",
                    dsc.name
                ),
            )
            .with_impact(Impact::Blocking)
        } else {
            satisfied(
                reason::TYPE_COMPATIBLE,
                reason::REQUIREMENTS_MET,
                "KServe serverless mode is not managed",
            )
        };
        result.push_condition(condition);
        Ok(result)
    }
}
