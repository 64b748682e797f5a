//! The analyzer's output model
//!
//! A [`Judgment`] is everything the pipeline concludes about one fragment:
//! its syntactic [`Role`], the deduced type (when an inferred qualifier was
//! involved and deduction succeeded), the [`ConversionResult`] of every
//! checked initializer element in order, and any diagnostics. Judgments are
//! produced once and never mutated after return.

use crate::analyzer::diagnostics::{Diagnostic, Severity};
use crate::frontend::ast::SourceLocation;
use crate::types::{Constant, TypeKind};
use std::fmt;

/// Syntactic role of a declaration fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    VariableDefinition,
    FunctionDeclaration,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::VariableDefinition => write!(f, "variable definition"),
            Role::FunctionDeclaration => write!(f, "function declaration"),
        }
    }
}

/// Outcome of checking one initializer element against its target type.
///
/// `Narrowing` carries the full context a diagnostic needs; the other
/// variants are always permitted and need none.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResult {
    Exact,
    Widening,
    Narrowing {
        target: TypeKind,
        source: TypeKind,
        value: Option<Constant>,
        location: SourceLocation,
    },
    ExplicitlyConverted,
}

impl ConversionResult {
    pub fn is_narrowing(&self) -> bool {
        matches!(self, ConversionResult::Narrowing { .. })
    }
}

/// Everything the analyzer concludes about one fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Judgment {
    pub role: Role,
    pub deduced_type: Option<TypeKind>,
    pub conversions: Vec<ConversionResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Judgment {
    pub(crate) fn new(role: Role) -> Self {
        Judgment {
            role,
            deduced_type: None,
            conversions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Whether the fragment passed without a rejected or structural
    /// diagnostic. Advisory diagnostics do not count against acceptance.
    pub fn is_accepted(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity() != Severity::Advisory)
    }

    pub fn has_severity(&self, severity: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == severity)
    }
}
