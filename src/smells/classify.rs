//! Test element classification.
//!
//! The predicates here are the sole gate deciding which declarations
//! the analyzers examine. Both JUnit 4 markers and the legacy JUnit 3
//! naming conventions are honored.

use crate::syntax::{CompilationUnit, MethodDecl};

const TEST_MARKER: &str = "Test";
const SETUP_MARKER: &str = "Before";
const SKIP_MARKER: &str = "Ignore";
const LEGACY_TEST_PREFIX: &str = "test";
const LEGACY_SETUP_NAME: &str = "setUp";

/// A method the engine will analyze as a test.
pub fn is_test_method(method: &MethodDecl) -> bool {
    !method.has_marker(SKIP_MARKER)
        && (method.has_marker(TEST_MARKER)
            || method.name.to_lowercase().starts_with(LEGACY_TEST_PREFIX))
        && method.is_public()
}

/// The fixture-initialization method.
pub fn is_setup_method(method: &MethodDecl) -> bool {
    !method.has_marker(SKIP_MARKER)
        && (method.has_marker(SETUP_MARKER) || method.name == LEGACY_SETUP_NAME)
        && method.is_public()
}

/// Every test method in the unit, in declaration order.
pub fn test_methods(unit: &CompilationUnit) -> Vec<&MethodDecl> {
    unit.methods().filter(|m| is_test_method(m)).collect()
}

/// The first setup method in the unit, if any.
pub fn setup_method(unit: &CompilationUnit) -> Option<&MethodDecl> {
    unit.methods().find(|m| is_setup_method(m))
}

pub fn count_test_methods(unit: &CompilationUnit) -> usize {
    unit.methods().filter(|m| is_test_method(m)).count()
}
