//! Typed diagnostics attached to judgments
//!
//! This module defines [`Diagnostic`], the analyzer's entire reporting
//! surface. The analyzer never renders text; consumers decide how (and
//! whether) to display each diagnostic based on its [`Severity`]:
//!
//! - `Advisory` diagnostics are informational and never block deduction
//! - `Rejected` diagnostics mark one conversion or deduction as invalid
//!   while the rest of the fragment is still analyzed
//! - `Structural` diagnostics mean the fragment cannot produce any
//!   value-typed judgment at all
//!
//! No diagnostic is fatal to the analyzer itself; a failed fragment never
//! affects the analysis of the next one.

use crate::frontend::ast::SourceLocation;
use crate::types::{Constant, TypeKind};
use std::fmt;

/// How a diagnostic affects the judgment it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Advisory,
    Rejected,
    Structural,
}

/// Everything the analyzer can report about a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The fragment parses as a function declaration, but local evidence
    /// suggests the author meant to construct a value
    PotentialVexingParse {
        identifier: String,
        parameter: String,
        location: SourceLocation,
    },

    /// A brace-delimited initializer element loses information
    NarrowingConversion {
        target: TypeKind,
        source: TypeKind,
        value: Option<Constant>,
        location: SourceLocation,
    },

    /// Brace elements of differing types leave nothing to deduce
    AmbiguousList {
        first: TypeKind,
        conflicting: TypeKind,
        location: SourceLocation,
    },

    /// The fragment declares a function, so there is no value type to deduce
    NotAValue {
        identifier: String,
        location: SourceLocation,
    },

    /// A callable with an inferred return type needs either a trailing
    /// annotation or exactly one typable return path
    NoTrailingAnnotationAndNoDeducibleBody {
        name: String,
        return_count: usize,
        location: SourceLocation,
    },

    /// An inferred-type declaration with nothing to deduce from
    MissingInitializer {
        identifier: String,
        location: SourceLocation,
    },

    /// No registered constructor of the aggregate accepts this many arguments
    NoMatchingConstructor {
        aggregate: String,
        arity: usize,
        location: SourceLocation,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::PotentialVexingParse { .. } => Severity::Advisory,
            Diagnostic::NarrowingConversion { .. }
            | Diagnostic::AmbiguousList { .. }
            | Diagnostic::NoMatchingConstructor { .. } => Severity::Rejected,
            Diagnostic::NotAValue { .. }
            | Diagnostic::NoTrailingAnnotationAndNoDeducibleBody { .. }
            | Diagnostic::MissingInitializer { .. } => Severity::Structural,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Diagnostic::PotentialVexingParse { location, .. }
            | Diagnostic::NarrowingConversion { location, .. }
            | Diagnostic::AmbiguousList { location, .. }
            | Diagnostic::NotAValue { location, .. }
            | Diagnostic::NoTrailingAnnotationAndNoDeducibleBody { location, .. }
            | Diagnostic::MissingInitializer { location, .. }
            | Diagnostic::NoMatchingConstructor { location, .. } => *location,
        }
    }

    /// Stable short name, used for filtering and grouping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnostic::PotentialVexingParse { .. } => "potential_vexing_parse",
            Diagnostic::NarrowingConversion { .. } => "narrowing_conversion",
            Diagnostic::AmbiguousList { .. } => "ambiguous_list",
            Diagnostic::NotAValue { .. } => "not_a_value",
            Diagnostic::NoTrailingAnnotationAndNoDeducibleBody { .. } => {
                "no_trailing_annotation_and_no_deducible_body"
            }
            Diagnostic::MissingInitializer { .. } => "missing_initializer",
            Diagnostic::NoMatchingConstructor { .. } => "no_matching_constructor",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PotentialVexingParse {
                identifier,
                parameter,
                location,
            } => {
                write!(
                    f,
                    "'{}' at line {} declares a function taking '{}'; \
                     if a variable was intended, use braces or remove the inner parentheses",
                    identifier, location.line, parameter
                )
            }
            Diagnostic::NarrowingConversion {
                target,
                source,
                value,
                location,
            } => {
                if let Some(value) = value {
                    write!(
                        f,
                        "Narrowing conversion from {} to {} at line {}: value {} \
                         is not representable in the target type",
                        source, target, location.line, value
                    )
                } else {
                    write!(
                        f,
                        "Narrowing conversion from {} to {} at line {} \
                         inside a braced initializer",
                        source, target, location.line
                    )
                }
            }
            Diagnostic::AmbiguousList {
                first,
                conflicting,
                location,
            } => {
                write!(
                    f,
                    "Cannot deduce a list type at line {}: elements of type {} and {}",
                    location.line, first, conflicting
                )
            }
            Diagnostic::NotAValue {
                identifier,
                location,
            } => {
                write!(
                    f,
                    "'{}' at line {} declares a function; there is no value type to deduce",
                    identifier, location.line
                )
            }
            Diagnostic::NoTrailingAnnotationAndNoDeducibleBody {
                name,
                return_count,
                location,
            } => {
                write!(
                    f,
                    "Cannot deduce the return type of '{}' at line {}: \
                     no trailing annotation and {} deducible return path{}",
                    name,
                    location.line,
                    return_count,
                    if *return_count == 1 { "" } else { "s" }
                )
            }
            Diagnostic::MissingInitializer {
                identifier,
                location,
            } => {
                write!(
                    f,
                    "'{}' at line {} has an inferred type but no initializer to deduce it from",
                    identifier, location.line
                )
            }
            Diagnostic::NoMatchingConstructor {
                aggregate,
                arity,
                location,
            } => {
                write!(
                    f,
                    "No constructor of '{}' takes {} argument{} at line {}",
                    aggregate,
                    arity,
                    if *arity == 1 { "" } else { "s" },
                    location.line
                )
            }
        }
    }
}

impl std::error::Error for Diagnostic {}
