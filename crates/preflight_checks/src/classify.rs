//! Maps check failures to a reason code, message, and remediation hint.

use crate::error::CheckError;
use crate::resource::AccessError;
use preflight_diagnostics::reason;

/// How a failed check is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Machine-stable reason code for the synthesized condition.
    pub reason: &'static str,
    /// Human-readable message including the underlying error.
    pub message: String,
    /// Operator guidance, when the failure class has a known fix.
    pub remediation: Option<&'static str>,
}

/// Classifies a check failure.
///
/// Transport failures are recognized by their [`AccessError`] class; every
/// other failure, including malformed results and panics, is reported as
/// [`reason::CHECK_EXECUTION_FAILED`] without a hint.
pub fn classify(error: &CheckError) -> Classification {
    let CheckError::Access(access) = error else {
        return Classification {
            reason: reason::CHECK_EXECUTION_FAILED,
            message: format!("check execution failed: {error}"),
            remediation: None,
        };
    };

    let (reason, summary, remediation) = match access {
        AccessError::Forbidden(_) => (
            reason::PERMISSION_DENIED,
            "insufficient permissions to read cluster resources",
            Some(
                "check RBAC permissions: the account running preflight needs get and list \
                 access to the resources this check reads",
            ),
        ),
        AccessError::Unauthorized(_) => (
            reason::UNAUTHORIZED,
            "the cluster rejected the credentials",
            Some("refresh the cluster credentials (for example, log in again) and rerun"),
        ),
        AccessError::Timeout(_) => (
            reason::API_TIMEOUT,
            "a cluster API request timed out",
            Some("retry when the API server is responsive, or select fewer checks per run"),
        ),
        AccessError::ServiceUnavailable(_) => (
            reason::SERVICE_UNAVAILABLE,
            "the cluster API is unavailable",
            Some("verify the API server and aggregated API services are available, then rerun"),
        ),
        AccessError::Other(_) => (
            reason::CHECK_EXECUTION_FAILED,
            "check execution failed",
            None,
        ),
    };

    Classification {
        reason,
        message: format!("{summary}: {access}"),
        remediation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_diagnostics::ValidationError;

    #[test]
    fn forbidden_is_permission_denied_with_rbac_hint() {
        let c = classify(&AccessError::Forbidden("cannot list notebooks".into()).into());
        assert_eq!(c.reason, "PermissionDenied");
        assert!(c.message.contains("cannot list notebooks"));
        assert!(c.remediation.unwrap().contains("RBAC"));
    }

    #[test]
    fn transport_classes() {
        let cases = [
            (AccessError::Unauthorized("x".into()), reason::UNAUTHORIZED),
            (AccessError::Timeout("x".into()), reason::API_TIMEOUT),
            (
                AccessError::ServiceUnavailable("x".into()),
                reason::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, expected) in cases {
            let c = classify(&err.into());
            assert_eq!(c.reason, expected);
            assert!(c.remediation.is_some());
        }
    }

    #[test]
    fn unclassified_failures() {
        for err in [
            CheckError::Access(AccessError::Other("connection reset".into())),
            CheckError::failed("unexpected spec"),
            CheckError::MalformedResult(ValidationError::NoConditions),
            CheckError::Panicked("index out of bounds".into()),
        ] {
            let c = classify(&err);
            assert_eq!(c.reason, reason::CHECK_EXECUTION_FAILED);
            assert!(c.message.starts_with("check execution failed: "));
            assert!(c.remediation.is_none());
        }
    }
}
