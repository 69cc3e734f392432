//! The process-wide check registry.
//!
//! Startup code registers every check exactly once, before any run starts;
//! runs then work from a [`snapshot`]. Registration is additive: there is no
//! way to remove a check.

use crate::error::RegistryError;
use crate::registry::CheckRegistry;
use crate::Check;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

fn registry() -> &'static RwLock<CheckRegistry> {
    static REGISTRY: OnceLock<RwLock<CheckRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(CheckRegistry::new()))
}

/// Adds a check to the process-wide registry.
pub fn register(check: Arc<dyn Check>) -> Result<(), RegistryError> {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(check)
}

/// Registers every built-in check in the process-wide registry.
pub fn register_builtins() -> Result<(), RegistryError> {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    crate::builtin::register_builtin_checks(&mut guard)
}

/// Returns a copy of the process-wide registry for use by an executor.
pub fn snapshot() -> CheckRegistry {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
