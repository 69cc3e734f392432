//! cert-manager must be installed before moving to 3.0.

use preflight_diagnostics::{reason, DiagnosticResult};

use super::{satisfied, start_result, violated, RELEASE_3_0};
use crate::context::RunContext;
use crate::error::CheckError;
use crate::meta::{CheckGroup, CheckMeta};
use crate::target::Target;
use crate::Check;

const SUBSCRIPTION_KIND: &str = "Subscription";
const OPERATOR_NAMESPACE: &str = "cert-manager-operator";
const OPERATOR_SUBSCRIPTION: &str = "openshift-cert-manager-operator";

/// Reports a missing cert-manager operator subscription when the target is 3.0 or later.
pub struct CertManagerInstalled {
    meta: CheckMeta,
}

impl CertManagerInstalled {
    /// Creates the check.
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                "dependencies.certmanager.installed",
                "cert-manager operator installed",
                CheckGroup::Dependency,
            )
            .with_description("3.0 serving components require the cert-manager operator")
            .with_remediation(
                "install the cert-manager Operator for Red Hat OpenShift from OperatorHub \
                 into the cert-manager-operator namespace",
            ),
        }
    }
}

impl Default for CertManagerInstalled {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for CertManagerInstalled {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, _ctx: &RunContext, target: &Target) -> Result<bool, CheckError> {
        Ok(target.targets_at_least(RELEASE_3_0))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult, CheckError> {
        let subscription = target.client().get(
            SUBSCRIPTION_KIND,
            Some(OPERATOR_NAMESPACE),
            OPERATOR_SUBSCRIPTION,
        )?;

        let condition = match subscription {
            Some(_) => satisfied(
                reason::TYPE_AVAILABLE,
                reason::REQUIREMENTS_MET,
                "cert-manager operator subscription found",
            ),
            None => violated(
                &self.meta,
                reason::TYPE_AVAILABLE,
                reason::RESOURCE_NOT_FOUND,
                format!("subscription {OPERATOR_NAMESPACE}/{OPERATOR_SUBSCRIPTION} not found"),
            ),
        };
        Ok(start_result(&self.meta, target).with_condition(condition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::*;
    use crate::resource::Resource;
    use crate::static_accessor::StaticAccessor;
    use preflight_diagnostics::Impact;

    #[test]
    fn applies_to_3_0_targets_including_lint() {
        let check = CertManagerInstalled::new();
        let ctx = RunContext::new();
        assert!(check
            .can_apply(&ctx, &upgrade_target(StaticAccessor::new(), "2.16", "3.0"))
            .unwrap());
        assert!(check
            .can_apply(&ctx, &upgrade_target(StaticAccessor::new(), "3.1", "3.1"))
            .unwrap());
        assert!(!check
            .can_apply(&ctx, &upgrade_target(StaticAccessor::new(), "2.15", "2.16"))
            .unwrap());
    }

    #[test]
    fn missing_subscription_is_advisory() {
        let result = CertManagerInstalled::new()
            .validate(
                &RunContext::new(),
                &upgrade_target(StaticAccessor::new(), "2.16", "3.0"),
            )
            .unwrap();
        assert!(result.validate().is_ok());
        assert!(result.is_failing());
        assert_eq!(result.impact(), Some(Impact::Advisory));
        assert_eq!(result.conditions[0].reason, reason::RESOURCE_NOT_FOUND);
    }

    #[test]
    fn subscription_in_other_namespace_does_not_count() {
        let accessor = StaticAccessor::new().with_resource(Resource::new(
            SUBSCRIPTION_KIND,
            Some("openshift-operators"),
            OPERATOR_SUBSCRIPTION,
        ));
        let result = CertManagerInstalled::new()
            .validate(&RunContext::new(), &upgrade_target(accessor, "2.16", "3.0"))
            .unwrap();
        assert!(result.is_failing());
    }

    #[test]
    fn installed_passes() {
        let accessor = StaticAccessor::new().with_resource(Resource::new(
            SUBSCRIPTION_KIND,
            Some(OPERATOR_NAMESPACE),
            OPERATOR_SUBSCRIPTION,
        ));
        let result = CertManagerInstalled::new()
            .validate(&RunContext::new(), &upgrade_target(accessor, "2.16", "3.0"))
            .unwrap();
        assert!(!result.is_failing());
    }
}
