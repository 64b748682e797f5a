//! Type deduction for inferred qualifiers
//!
//! Two deduction surfaces share this module:
//!
//! - declarations: `auto` deduces the initializer's type, except that brace
//!   syntax always deduces the list-container type, even for one element
//! - callables: an inferred return type uses the trailing annotation when one
//!   is present, and otherwise needs exactly one return path whose static
//!   type the front end could determine
//!
//! Deduction failures are typed diagnostics, never silent fallbacks; the
//! deduced type is `Unknown` and the judgment carries the reason.

use crate::analyzer::diagnostics::Diagnostic;
use crate::analyzer::engine::Analyzer;
use crate::analyzer::judgment::{Judgment, Role};
use crate::frontend::ast::{
    CallableFragment, DeclarationFragment, InitializerForm, TrailingReturn,
};
use crate::types::rank::RankTable;
use crate::types::TypeKind;

impl Analyzer {
    /// Deduce the concrete type of an inferred-qualifier declaration.
    ///
    /// Returns `Unknown` when deduction fails, with the reason pushed onto
    /// `diagnostics`. The caller has already confirmed the fragment is a
    /// variable definition; function declarations never reach this point.
    pub(crate) fn deduce(
        &self,
        fragment: &DeclarationFragment,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> TypeKind {
        match &fragment.initializer {
            // Brace syntax on an inferred target always deduces the
            // list-container type, even for a single element. Mixed element
            // types leave nothing to deduce.
            InitializerForm::BraceList(elements) => {
                let first = match elements.first() {
                    Some(first) => first.static_type(),
                    None => {
                        diagnostics.push(Diagnostic::MissingInitializer {
                            identifier: fragment.identifier.clone(),
                            location: fragment.location,
                        });
                        return TypeKind::Unknown;
                    }
                };
                for element in &elements[1..] {
                    let ty = element.static_type();
                    if ty != first {
                        diagnostics.push(Diagnostic::AmbiguousList {
                            first,
                            conflicting: ty,
                            location: element.location(),
                        });
                        return TypeKind::Unknown;
                    }
                }
                TypeKind::list_of(first)
            }

            InitializerForm::SingleValue(value) => value.static_type(),

            InitializerForm::ParenCall(args) => match args.as_slice() {
                [only] => only.as_value().static_type(),
                [first, second, ..] => {
                    diagnostics.push(Diagnostic::AmbiguousList {
                        first: first.as_value().static_type(),
                        conflicting: second.as_value().static_type(),
                        location: fragment.location,
                    });
                    TypeKind::Unknown
                }
                // An empty argument list classifies as a function
                // declaration and short-circuits before deduction
                [] => TypeKind::Unknown,
            },

            InitializerForm::Empty => {
                diagnostics.push(Diagnostic::MissingInitializer {
                    identifier: fragment.identifier.clone(),
                    location: fragment.location,
                });
                TypeKind::Unknown
            }
        }
    }

    /// Deduce the return type of a callable with an inferred return type.
    ///
    /// A trailing annotation always wins and is legal even with multiple or
    /// recursive return paths; the `decltype` forms are evaluated against the
    /// callable's own parameter list with the numeric promotion rule.
    pub fn deduce_return(&self, callable: &CallableFragment) -> Judgment {
        let mut judgment = Judgment::new(Role::FunctionDeclaration);

        let deduced = match &callable.trailing {
            Some(TrailingReturn::Annotated(ty)) => ty.clone(),
            Some(TrailingReturn::DecltypeParam { name, .. }) => callable
                .param_type(name)
                .cloned()
                .unwrap_or(TypeKind::Unknown),
            Some(TrailingReturn::DecltypeAdd { left, right, .. }) => {
                match (callable.param_type(left), callable.param_type(right)) {
                    (Some(left), Some(right)) => RankTable::global().promote(left, right),
                    _ => TypeKind::Unknown,
                }
            }
            None => match callable.return_paths.as_slice() {
                [only] if only.ty.is_known() => only.ty.clone(),
                paths => {
                    judgment
                        .diagnostics
                        .push(Diagnostic::NoTrailingAnnotationAndNoDeducibleBody {
                            name: callable.name.clone(),
                            return_count: paths.len(),
                            location: callable.location,
                        });
                    TypeKind::Unknown
                }
            },
        };

        if deduced.is_known() {
            judgment.deduced_type = Some(deduced);
        }
        judgment
    }
}
