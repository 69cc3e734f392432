//! Running workbenches are restarted by an upgrade.

use preflight_diagnostics::{annotation, reason, DiagnosticResult};
use tracing::debug;

use super::{satisfied, start_result, violated};
use crate::context::RunContext;
use crate::error::CheckError;
use crate::meta::{CheckGroup, CheckMeta};
use crate::resource::Resource;
use crate::target::Target;
use crate::Check;

const NOTEBOOK_KIND: &str = "Notebook";

/// Set on a Notebook when its workbench has been stopped.
const STOPPED_ANNOTATION: &str = "kubeflow-resource-stopped";

/// Lists notebooks that are still running ahead of an upgrade.
///
/// When the target names a single Notebook only that object is inspected.
pub struct RunningNotebooks {
    meta: CheckMeta,
}

impl RunningNotebooks {
    /// Creates the check.
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                "workloads.notebooks.running",
                "Running notebooks",
                CheckGroup::Workload,
            )
            .with_description("running workbenches are restarted during the upgrade")
            .with_remediation("save work and stop the listed workbenches before upgrading"),
        }
    }

    fn candidates(&self, target: &Target) -> Result<Vec<Resource>, CheckError> {
        match target.resource() {
            Some(resource) if resource.kind == NOTEBOOK_KIND => Ok(vec![resource.clone()]),
            _ => Ok(target.client().list(NOTEBOOK_KIND, None)?),
        }
    }
}

impl Default for RunningNotebooks {
    fn default() -> Self {
        Self::new()
    }
}

fn is_running(notebook: &Resource) -> bool {
    !notebook.annotations.contains_key(STOPPED_ANNOTATION)
}

impl Check for RunningNotebooks {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, _ctx: &RunContext, target: &Target) -> Result<bool, CheckError> {
        Ok(target.is_upgrade())
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult, CheckError> {
        let running: Vec<Resource> = self
            .candidates(target)?
            .into_iter()
            .filter(is_running)
            .collect();

        let mut result = start_result(&self.meta, target);
        if running.is_empty() {
            result.push_condition(satisfied(
                reason::TYPE_READY,
                reason::REQUIREMENTS_MET,
                "no running notebooks",
            ));
            return Ok(result);
        }

        for notebook in &running {
            if target.debug() {
                debug!(
                    namespace = notebook.namespace.as_deref().unwrap_or_default(),
                    name = %notebook.name,
                    "notebook still running"
                );
            }
            result.push_impacted(notebook.to_impacted());
        }
        result.annotate(annotation::IMPACTED_COUNT, running.len().to_string());
        result.push_condition(violated(
            &self.meta,
            reason::TYPE_READY,
            reason::WORKLOAD_ACTION_REQUIRED,
            format!("{} notebook(s) still running", running.len()),
        ));
        Ok(result)
    }
}
