//! Variable definition or function declaration
//!
//! The most vexing parse, reduced to a pure function over the initializer
//! form: a parenthesized list whose every argument reads as a type-id
//! declares a function, and the ambiguity is always resolved that way.
//! Brace-delimited and assignment-style initializers never introduce the
//! ambiguity, so they always define variables.

use crate::analyzer::diagnostics::Diagnostic;
use crate::analyzer::engine::Analyzer;
use crate::analyzer::judgment::Role;
use crate::frontend::ast::{Argument, DeclarationFragment, InitializerForm};
use crate::types::TypeKind;

impl Analyzer {
    /// Decide the syntactic role of a fragment.
    ///
    /// An empty argument list is vacuously all-type-ids, so `T name();`
    /// declares a function. One plain value argument is enough to force a
    /// variable definition, since a value can never be a parameter
    /// declaration.
    pub fn classify(&self, fragment: &DeclarationFragment) -> Role {
        match &fragment.initializer {
            InitializerForm::ParenCall(args)
                if args.iter().all(Argument::is_type_id_like) =>
            {
                Role::FunctionDeclaration
            }
            _ => Role::VariableDefinition,
        }
    }

    /// Advisory check for a function declaration that was probably meant to
    /// construct a value.
    ///
    /// The heuristic fires when the sole argument is a type-id naming an
    /// aggregate with a nullary constructor and no free function of that
    /// name is known. Local information cannot prove intent, so this never
    /// upgrades to an error; the fragment keeps its role.
    pub(crate) fn vexing_parse_advisory(
        &self,
        fragment: &DeclarationFragment,
    ) -> Option<Diagnostic> {
        let args = match &fragment.initializer {
            InitializerForm::ParenCall(args) => args,
            _ => return None,
        };

        let ty = match args.as_slice() {
            [Argument::TypeIdLike { ty, .. }] => ty,
            _ => return None,
        };

        let name = match ty {
            TypeKind::Aggregate(name) => name,
            _ => return None,
        };

        let aggregate = self.aggregate(name)?;
        if aggregate.has_nullary_constructor() && !self.has_free_function(name) {
            Some(Diagnostic::PotentialVexingParse {
                identifier: fragment.identifier.clone(),
                parameter: ty.to_string(),
                location: fragment.location,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{DeclaredQualifier, SourceLocation, ValueExpr};
    use crate::types::AggregateDef;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    fn fragment(initializer: InitializerForm) -> DeclarationFragment {
        DeclarationFragment {
            identifier: "objectB".to_string(),
            qualifier: DeclaredQualifier::Explicit(TypeKind::aggregate("ExampleClass")),
            initializer,
            location: loc(),
        }
    }

    fn type_id_arg() -> Argument {
        Argument::TypeIdLike {
            ty: TypeKind::aggregate("ExampleClass"),
            location: loc(),
        }
    }

    #[test]
    fn test_all_type_id_arguments_declare_a_function() {
        let analyzer = Analyzer::new();
        let frag = fragment(InitializerForm::ParenCall(vec![type_id_arg()]));
        assert_eq!(analyzer.classify(&frag), Role::FunctionDeclaration);

        let empty = fragment(InitializerForm::ParenCall(Vec::new()));
        assert_eq!(analyzer.classify(&empty), Role::FunctionDeclaration);
    }

    #[test]
    fn test_value_argument_forces_a_variable() {
        let analyzer = Analyzer::new();
        let value = ValueExpr::IntLiteral {
            value: 5,
            ty: TypeKind::integral(32, true),
            location: loc(),
        };
        let frag = fragment(InitializerForm::ParenCall(vec![
            type_id_arg(),
            Argument::Value(value),
        ]));
        assert_eq!(analyzer.classify(&frag), Role::VariableDefinition);
    }

    #[test]
    fn test_braces_and_empty_never_ambiguous() {
        let analyzer = Analyzer::new();
        assert_eq!(
            analyzer.classify(&fragment(InitializerForm::BraceList(Vec::new()))),
            Role::VariableDefinition
        );
        assert_eq!(
            analyzer.classify(&fragment(InitializerForm::Empty)),
            Role::VariableDefinition
        );
    }

    #[test]
    fn test_advisory_requires_nullary_constructor() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::new("ExampleClass"));

        let frag = fragment(InitializerForm::ParenCall(vec![type_id_arg()]));
        assert!(analyzer.vexing_parse_advisory(&frag).is_some());

        // Declaring a constructor suppresses the implicit default one, so the
        // "author meant a value" reading is no longer plausible
        let mut strict = Analyzer::new();
        strict.register_aggregate(AggregateDef::with_constructors(
            "ExampleClass",
            vec![crate::types::ConstructorSignature::user_defined(vec![
                TypeKind::integral(32, true),
            ])],
        ));
        assert!(strict.vexing_parse_advisory(&frag).is_none());
    }

    #[test]
    fn test_free_function_suppresses_advisory() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::new("ExampleClass"));
        analyzer.register_free_function("ExampleClass");

        let frag = fragment(InitializerForm::ParenCall(vec![type_id_arg()]));
        assert!(analyzer.vexing_parse_advisory(&frag).is_none());
    }

    #[test]
    fn test_primitive_type_id_gets_no_advisory() {
        let analyzer = Analyzer::new();
        let frag = fragment(InitializerForm::ParenCall(vec![Argument::TypeIdLike {
            ty: TypeKind::floating(64),
            location: loc(),
        }]));
        assert_eq!(analyzer.classify(&frag), Role::FunctionDeclaration);
        assert!(analyzer.vexing_parse_advisory(&frag).is_none());
    }
}
