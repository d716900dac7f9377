//! Invariant validation hooks for the incidence store.
//!
//! Mutating operations on [`MeshHierarchy`](crate::topology::hierarchy::MeshHierarchy)
//! call [`DebugInvariants::enforce_invariants`] after they finish. The check is a
//! no-op unless it was requested through
//! [`HierarchyConfig::check_invariants`](crate::config::HierarchyConfig) or one of
//! the `strict-invariants` / `check-invariants` cargo features is enabled.

use crate::mesh_error::MeshError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panics with `context` if invariants are violated.
    fn debug_assert_invariants(&self, context: &str) {
        if let Err(e) = self.validate_invariants() {
            panic!("[invariants] {context}: {e}");
        }
    }

    /// Runs [`DebugInvariants::debug_assert_invariants`] when checking is switched on,
    /// either at runtime (`requested`) or at compile time through cargo features.
    fn enforce_invariants(&self, requested: bool, context: &str) {
        if requested || cfg!(any(feature = "strict-invariants", feature = "check-invariants")) {
            self.debug_assert_invariants(context);
        }
    }
}
