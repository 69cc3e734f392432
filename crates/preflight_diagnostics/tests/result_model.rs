//! Result schema validation and condition derivation through the public API.

use preflight_diagnostics::{
    annotation, reason, Condition, ConditionStatus, DiagnosticResult, Impact, ResultStatus,
    Severity, ValidationError,
};

fn passing() -> Condition {
    Condition::new(reason::TYPE_VALIDATED, ConditionStatus::True).with_reason(reason::REQUIREMENTS_MET)
}

fn result_with(key: &str) -> DiagnosticResult {
    DiagnosticResult::new("components", "kserve", "removal", "")
        .with_annotation(key, "3.0.0")
        .with_condition(passing())
}

#[test]
fn annotation_key_formats() {
    assert!(result_with("openshiftai.io/version").validate().is_ok());
    for bad in [
        "version",
        "openshiftai/version",
        "openshiftai.io/",
        "a..b/c",
        "a b.io/k",
    ] {
        let err = result_with(bad).validate().unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidAnnotationKey { ref key, .. } if key == bad),
            "{bad}: {err}"
        );
        assert!(err.to_string().contains("domain/key"), "{err}");
    }
    assert!(result_with(annotation::TARGET_VERSION).validate().is_ok());
}

#[test]
fn derivation_table() {
    let cases = [
        (ConditionStatus::True, Severity::Info, Impact::None),
        (ConditionStatus::False, Severity::Critical, Impact::Advisory),
        (ConditionStatus::Unknown, Severity::Warning, Impact::Advisory),
    ];
    for (status, severity, impact) in cases {
        let condition = Condition::new(reason::TYPE_READY, status);
        assert_eq!(condition.severity, severity, "{status}");
        assert_eq!(condition.impact, impact, "{status}");
    }
    let blocking = Condition::new(reason::TYPE_READY, ConditionStatus::False)
        .with_impact(Impact::Blocking);
    assert!(blocking.is_blocking());
}

#[test]
fn validation_is_fail_fast_in_field_order() {
    let empty = DiagnosticResult::new("", "", "", "");
    assert_eq!(empty.validate(), Err(ValidationError::EmptyGroup));

    let no_conditions = DiagnosticResult::new("g", "k", "n", "").with_annotation("bad", "x");
    assert!(matches!(
        no_conditions.validate(),
        Err(ValidationError::InvalidAnnotationKey { .. })
    ));

    let bare = DiagnosticResult::new("g", "k", "n", "");
    assert_eq!(bare.validate(), Err(ValidationError::NoConditions));
    assert!(bare.conditions.is_empty());
    assert!(bare.annotations.is_empty());

    let unnamed_reason = bare
        .clone()
        .with_condition(passing())
        .with_condition(Condition::new(reason::TYPE_READY, ConditionStatus::False));
    assert!(matches!(
        unnamed_reason.validate(),
        Err(ValidationError::InvalidCondition { index: 1, .. })
    ));
}

#[test]
fn aggregate_status_precedence() {
    let unknown = Condition::new(reason::TYPE_READY, ConditionStatus::Unknown).with_reason("X");
    let failed = Condition::new(reason::TYPE_READY, ConditionStatus::False).with_reason("Y");

    let base = || DiagnosticResult::new("g", "k", "n", "");
    assert_eq!(base().with_condition(passing()).status(), ResultStatus::Pass);
    assert_eq!(
        base().with_condition(unknown.clone()).with_condition(failed.clone()).status(),
        ResultStatus::Fail
    );
    let errored = base().with_condition(passing()).with_condition(unknown);
    assert_eq!(errored.status(), ResultStatus::Error);
    assert_eq!(errored.severity(), Some(Severity::Warning));
    assert!(errored.is_failing());
}
