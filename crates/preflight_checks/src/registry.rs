//! The set of known checks and selection over it.

use crate::error::RegistryError;
use crate::meta::CheckGroup;
use crate::pattern::Pattern;
use crate::Check;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// An ordered collection of checks with unique IDs.
///
/// Checks are kept in registration order and every listing preserves it,
/// so reports are reproducible. Cloning is cheap: checks are shared.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: Vec<Arc<dyn Check>>,
    ids: HashSet<String>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    ///
    /// Fails with [`RegistryError::DuplicateId`] if the ID is taken, leaving
    /// the registry unchanged.
    pub fn register(&mut self, check: Arc<dyn Check>) -> Result<(), RegistryError> {
        let id = check.id().to_string();
        if self.ids.contains(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        self.ids.insert(id);
        self.checks.push(check);
        Ok(())
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Looks up a check by exact ID.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Check>> {
        self.checks.iter().find(|c| c.id() == id)
    }

    /// Returns the IDs of all registered checks in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    /// Returns every registered check in registration order.
    pub fn list_all(&self) -> Vec<Arc<dyn Check>> {
        self.checks.clone()
    }

    /// Returns the checks selected by `pattern` and, when `category` is
    /// non-empty, belonging to that category.
    ///
    /// A pattern matching nothing yields an empty list, not an error. A
    /// registered ID is matched literally before the pattern is compiled as a
    /// glob, so IDs containing glob metacharacters stay selectable.
    pub fn list_by_pattern(
        &self,
        pattern: &str,
        category: &str,
    ) -> Result<Vec<Arc<dyn Check>>, RegistryError> {
        let shortcut = pattern == "*" || pattern.parse::<CheckGroup>().is_ok();
        if !shortcut && self.ids.contains(pattern) {
            return Ok(self
                .checks
                .iter()
                .filter(|c| c.id() == pattern && in_category(c.as_ref(), category))
                .cloned()
                .collect());
        }
        let pattern = Pattern::parse(pattern)?;
        Ok(self.select(&pattern, category))
    }

    /// Like [`list_by_pattern`](Self::list_by_pattern) with an already-compiled pattern.
    pub fn select(&self, pattern: &Pattern, category: &str) -> Vec<Arc<dyn Check>> {
        self.checks
            .iter()
            .filter(|c| in_category(c.as_ref(), category))
            .filter(|c| pattern.matches(c.as_ref()))
            .cloned()
            .collect()
    }
}

fn in_category(check: &dyn Check, category: &str) -> bool {
    category.is_empty() || check.group().as_str() == category
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.ids())
            .finish()
    }
}
