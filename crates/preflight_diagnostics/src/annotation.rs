//! Domain-qualified annotation keys (`domain.tld/key`).

/// Annotation recording the version the cluster currently runs.
pub const SOURCE_VERSION: &str = "openshiftai.io/source-version";
/// Annotation recording the version the cluster is upgrading to.
pub const TARGET_VERSION: &str = "openshiftai.io/target-version";
/// Annotation recording how many objects a failing condition affects.
pub const IMPACTED_COUNT: &str = "openshiftai.io/impacted-count";
/// Annotation recording the ID of the check that produced a result.
pub const CHECK_ID: &str = "openshiftai.io/check-id";

/// Why an annotation key was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationKeyError {
    /// The key has no `/` separating domain and key.
    #[error("missing '/' separator")]
    MissingSeparator,

    /// The part before `/` is empty.
    #[error("empty domain")]
    EmptyDomain,

    /// The domain does not contain a dot, or has an empty label.
    #[error("domain must be dot-qualified")]
    UnqualifiedDomain,

    /// A domain label holds something other than lowercase alphanumerics and `-`.
    #[error("domain labels must be lowercase alphanumerics or '-'")]
    InvalidDomain,

    /// The part after `/` is empty.
    #[error("empty key")]
    EmptyKey,

    /// The part after `/` contains another `/`.
    #[error("key must not contain '/'")]
    NestedKey,
}

/// Checks that `key` has the form `domain.tld/key`.
pub fn validate_annotation_key(key: &str) -> Result<(), AnnotationKeyError> {
    let (domain, name) = key
        .split_once('/')
        .ok_or(AnnotationKeyError::MissingSeparator)?;
    if domain.is_empty() {
        return Err(AnnotationKeyError::EmptyDomain);
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(AnnotationKeyError::UnqualifiedDomain);
    }
    let label_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-';
    if !domain.split('.').all(|label| label.chars().all(label_char)) {
        return Err(AnnotationKeyError::InvalidDomain);
    }
    if name.is_empty() {
        return Err(AnnotationKeyError::EmptyKey);
    }
    if name.contains('/') {
        return Err(AnnotationKeyError::NestedKey);
    }
    Ok(())
}
