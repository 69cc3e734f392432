//! Selection patterns resolved against check IDs and categories.

use crate::error::RegistryError;
use crate::meta::CheckGroup;
use crate::Check;
use globset::{GlobBuilder, GlobMatcher};

/// A compiled check selection pattern.
///
/// Resolution, in priority order:
///
/// 1. `*` matches every check.
/// 2. A bare category name (`components`, `services`, ...) matches checks in
///    that group.
/// 3. An exact ID matches that check.
/// 4. Otherwise the pattern is a shell glob over the whole ID, so
///    `components.*`, `*.removal`, and `*mesh*` all work.
#[derive(Clone, Debug)]
pub struct Pattern {
    raw: String,
    kind: PatternKind,
}

#[derive(Clone, Debug)]
enum PatternKind {
    Any,
    Group(CheckGroup),
    Id(GlobMatcher),
}

impl Pattern {
    /// Compiles a pattern, rejecting malformed globs such as `[`.
    pub fn parse(pattern: &str) -> Result<Self, RegistryError> {
        let kind = if pattern == "*" {
            PatternKind::Any
        } else if let Ok(group) = pattern.parse::<CheckGroup>() {
            PatternKind::Group(group)
        } else {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .build()
                .map_err(|source| RegistryError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            PatternKind::Id(glob.compile_matcher())
        };
        Ok(Self {
            raw: pattern.to_string(),
            kind,
        })
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the check is selected by this pattern.
    pub fn matches(&self, check: &dyn Check) -> bool {
        self.matches_parts(check.id(), check.group())
    }

    /// Returns `true` if a check with this ID and group is selected.
    pub fn matches_parts(&self, id: &str, group: CheckGroup) -> bool {
        match &self.kind {
            PatternKind::Any => true,
            PatternKind::Group(g) => *g == group,
            PatternKind::Id(glob) => id == self.raw || glob.is_match(id),
        }
    }
}
