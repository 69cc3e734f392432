//! Shared foundational types used across the preflight workspace.
//!
//! Currently this is the platform [`Version`] type carried by every check
//! target and compared by version-gated applicability predicates.

#![warn(missing_docs)]

pub mod version;

pub use version::{ParseVersionError, Version};
