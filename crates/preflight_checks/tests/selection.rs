//! Check selection through the registry: the pattern resolution table and
//! registration uniqueness.

use std::sync::Arc;

use preflight_checks::{
    Check, CheckError, CheckGroup, CheckMeta, CheckRegistry, Pattern, RegistryError, RunContext,
    Target,
};
use preflight_diagnostics::DiagnosticResult;

struct Named(CheckMeta);

impl Check for Named {
    fn meta(&self) -> &CheckMeta {
        &self.0
    }

    fn can_apply(&self, _ctx: &RunContext, _target: &Target) -> Result<bool, CheckError> {
        Ok(true)
    }

    fn validate(&self, _ctx: &RunContext, _target: &Target) -> Result<DiagnosticResult, CheckError> {
        Err(CheckError::failed("selection tests never execute"))
    }
}

fn check(id: &str, group: CheckGroup) -> Arc<dyn Check> {
    Arc::new(Named(CheckMeta::new(id, id, group)))
}

fn registry() -> CheckRegistry {
    let mut registry = CheckRegistry::new();
    for (id, group) in [
        ("components.dashboard", CheckGroup::Component),
        ("components.workbench", CheckGroup::Component),
        ("services.oauth", CheckGroup::Service),
        ("workloads.limits", CheckGroup::Workload),
    ] {
        registry.register(check(id, group)).unwrap();
    }
    registry
}

fn selected(pattern: &str) -> Vec<String> {
    registry()
        .list_by_pattern(pattern, "")
        .unwrap()
        .iter()
        .map(|c| c.id().to_string())
        .collect()
}

#[test]
fn pattern_resolution_table() {
    let both = vec!["components.dashboard", "components.workbench"];
    let cases: &[(&str, Vec<&str>)] = &[
        (
            "*",
            vec![
                "components.dashboard",
                "components.workbench",
                "services.oauth",
                "workloads.limits",
            ],
        ),
        ("components", both.clone()),
        ("components.*", both),
        ("*.dashboard", vec!["components.dashboard"]),
        ("*dashboard*", vec!["components.dashboard"]),
        ("components.dashboard", vec!["components.dashboard"]),
        ("nonexistent.*", vec![]),
    ];
    for (pattern, expected) in cases {
        assert_eq!(&selected(pattern), expected, "pattern {pattern:?}");
    }
}

#[test]
fn malformed_pattern_is_an_error() {
    let err = registry().list_by_pattern("[", "").unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    assert!(err.to_string().contains("invalid pattern"));
}

#[test]
fn exact_id_wins_over_glob_syntax() {
    let mut registry = registry();
    registry
        .register(check("components.a[b", CheckGroup::Component))
        .unwrap();
    let ids: Vec<String> = registry
        .list_by_pattern("components.a[b", "")
        .unwrap()
        .iter()
        .map(|c| c.id().to_string())
        .collect();
    assert_eq!(ids, vec!["components.a[b"]);
    assert!(registry
        .list_by_pattern("components.a[b", "services")
        .unwrap()
        .is_empty());
    assert!(registry.list_by_pattern("components.a[c", "").is_err());
}

#[test]
fn checks_debug_as_their_id() {
    let listed = registry().list_by_pattern("services", "").unwrap();
    assert_eq!(format!("{listed:?}"), r#"[Check("services.oauth")]"#);
}

#[test]
fn category_shortcuts_cover_every_group() {
    let mut registry = CheckRegistry::new();
    for group in CheckGroup::ALL {
        registry
            .register(check(&format!("{}.sample", group.as_str()), group))
            .unwrap();
    }
    for group in CheckGroup::ALL {
        let ids: Vec<String> = registry
            .list_by_pattern(group.as_str(), "")
            .unwrap()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, vec![format!("{}.sample", group.as_str())]);
    }
}

#[test]
fn selection_is_reproducible() {
    let first = selected("*a*");
    for _ in 0..10 {
        assert_eq!(selected("*a*"), first);
    }
    assert_eq!(
        first,
        vec!["components.dashboard", "services.oauth", "workloads.limits"]
    );
}

#[test]
fn duplicate_registration_leaves_registry_unchanged() {
    let mut registry = registry();
    let before = registry.ids().iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let err = registry
        .register(check("workloads.limits", CheckGroup::Configuration))
        .unwrap_err();
    assert_eq!(err.to_string(), "duplicate check id 'workloads.limits'");
    let after = registry.ids().iter().map(|s| s.to_string()).collect::<Vec<_>>();
    assert_eq!(before, after);
}

#[test]
fn compiled_pattern_matches_outside_registry() {
    let pattern = Pattern::parse("workloads.*").unwrap();
    assert!(pattern.matches_parts("workloads.notebooks.running", CheckGroup::Workload));
    assert!(!pattern.matches_parts("components.dashboard", CheckGroup::Component));
    assert_eq!(pattern.as_str(), "workloads.*");
}
