//! Lightweight symbol resolution over the production file.
//!
//! There is no whole-program type solver; analyzers that need to know
//! where a call lands query a `ProductionIndex` built from the supplied
//! production compilation unit. A miss is a soft outcome: the caller
//! falls back to its name-based heuristic instead of aborting.

use log::debug;

use crate::syntax::{CompilationUnit, TypeKind, Visibility};

/// Outcome of a resolution lookup. `Unresolved` is expected and
/// recoverable, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Resolution::Resolved(t) => Some(t),
            Resolution::Unresolved => None,
        }
    }
}

/// Signature of a callable production method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub arity: usize,
    pub return_type: String,
    pub visibility: Visibility,
}

impl MethodSig {
    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }
}

/// Name and arity index over the production file's callable surface.
#[derive(Debug, Clone, Default)]
pub struct ProductionIndex {
    class_name: String,
    methods: Vec<MethodSig>,
}

impl ProductionIndex {
    /// Index the externally callable methods of the production unit.
    pub fn build(unit: &CompilationUnit) -> Self {
        let mut index = Self::default();
        for ty in &unit.types {
            if ty.kind != TypeKind::Class {
                continue;
            }
            if index.class_name.is_empty() {
                index.class_name = ty.name.clone();
            }
            for m in &ty.methods {
                if matches!(m.visibility, Visibility::Public | Visibility::Protected) {
                    index.methods.push(MethodSig {
                        name: m.name.clone(),
                        arity: m.params.len(),
                        return_type: m.return_type.clone(),
                        visibility: m.visibility,
                    });
                }
            }
        }
        index
    }

    /// Name of the production class, empty when no class was indexed.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Look up a method by name and argument count.
    pub fn resolve(&self, name: &str, arity: usize) -> Resolution<&MethodSig> {
        match self
            .methods
            .iter()
            .find(|m| m.name == name && m.arity == arity)
        {
            Some(sig) => Resolution::Resolved(sig),
            None => {
                debug!("unresolved call {name}/{arity}, falling back to name heuristics");
                Resolution::Unresolved
            }
        }
    }
}
