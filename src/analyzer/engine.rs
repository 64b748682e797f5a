//! Analyzer pipeline and registries
//!
//! [`Analyzer`] owns the aggregate and free-function registries and composes
//! the three rule sets into one pipeline per fragment: classify the
//! syntactic role, deduce the type when the qualifier is inferred, then
//! check every initializer conversion against the declared or deduced
//! target. One [`Judgment`] comes back per fragment; a failed fragment never
//! affects the analysis of the next one.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::analyzer::conversion;
use crate::analyzer::diagnostics::Diagnostic;
use crate::analyzer::judgment::{ConversionResult, Judgment, Role};
use crate::frontend::ast::{
    Argument, DeclarationFragment, DeclaredQualifier, Fragment, InitializerForm, SourceLocation,
    SourceUnit, ValueExpr,
};
use crate::types::{AggregateDef, TypeKind};

/// The declaration analyzer.
///
/// Analyses are pure with respect to the analyzer: `analyze` takes `&self`,
/// writes nothing back, and repeated calls on the same fragment produce
/// identical judgments. Registration happens up front, before analysis.
pub struct Analyzer {
    /// Known aggregates and their constructor surfaces
    aggregates: FxHashMap<String, AggregateDef>,

    /// Names known to be free functions, consulted by the vexing-parse
    /// advisory heuristic
    free_functions: FxHashSet<String>,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            aggregates: FxHashMap::default(),
            free_functions: FxHashSet::default(),
        }
    }

    pub fn register_aggregate(&mut self, def: AggregateDef) {
        self.aggregates.insert(def.name.clone(), def);
    }

    pub fn register_free_function(&mut self, name: &str) {
        self.free_functions.insert(name.to_string());
    }

    pub fn aggregate(&self, name: &str) -> Option<&AggregateDef> {
        self.aggregates.get(name)
    }

    pub fn has_free_function(&self, name: &str) -> bool {
        self.free_functions.contains(name)
    }

    /// Run the full pipeline on one declaration fragment.
    pub fn analyze(&self, fragment: &DeclarationFragment) -> Judgment {
        let mut judgment = Judgment::new(self.classify(fragment));

        match judgment.role {
            Role::FunctionDeclaration => {
                if let Some(advisory) = self.vexing_parse_advisory(fragment) {
                    judgment.diagnostics.push(advisory);
                }
                // An inferred qualifier asked for a value type, and a
                // function declaration has none to offer
                if !matches!(fragment.qualifier, DeclaredQualifier::Explicit(_)) {
                    judgment.diagnostics.push(Diagnostic::NotAValue {
                        identifier: fragment.identifier.clone(),
                        location: fragment.location,
                    });
                }
            }
            Role::VariableDefinition => {
                let target = match &fragment.qualifier {
                    DeclaredQualifier::Explicit(ty) => Some(ty.clone()),
                    DeclaredQualifier::Inferred | DeclaredQualifier::InferredBraced => {
                        let deduced = self.deduce(fragment, &mut judgment.diagnostics);
                        if deduced.is_known() {
                            judgment.deduced_type = Some(deduced.clone());
                            Some(deduced)
                        } else {
                            None
                        }
                    }
                };

                if let Some(target) = target {
                    self.check_initializer(fragment, &target, &mut judgment);
                }
            }
        }

        judgment
    }

    /// Analyze a whole parsed unit: register its aggregates, then judge each
    /// fragment in order. Callables register as free functions as they are
    /// seen, so later fragments can consult them.
    pub fn analyze_unit(&mut self, unit: &SourceUnit) -> Vec<Judgment> {
        for aggregate in &unit.aggregates {
            self.register_aggregate(aggregate.clone());
        }

        let mut judgments = Vec::with_capacity(unit.fragments.len());
        for fragment in &unit.fragments {
            match fragment {
                Fragment::Declaration(decl) => judgments.push(self.analyze(decl)),
                Fragment::Callable(callable) => {
                    judgments.push(self.deduce_return(callable));
                    self.register_free_function(&callable.name);
                }
            }
        }
        judgments
    }

    /// Check every conversion the initializer implies against `target`.
    fn check_initializer(
        &self,
        fragment: &DeclarationFragment,
        target: &TypeKind,
        judgment: &mut Judgment,
    ) {
        match &fragment.initializer {
            InitializerForm::Empty => {
                // Default-initialization still needs a nullary constructor
                if let TypeKind::Aggregate(name) = target {
                    if let Some(def) = self.aggregates.get(name) {
                        if !def.has_nullary_constructor() {
                            judgment.diagnostics.push(Diagnostic::NoMatchingConstructor {
                                aggregate: name.clone(),
                                arity: 0,
                                location: fragment.location,
                            });
                        }
                    }
                }
            }

            InitializerForm::SingleValue(value) => {
                self.validate_constructs(value, judgment);
                match target {
                    // A value of another type initializes an aggregate
                    // through a unary constructor
                    TypeKind::Aggregate(name) if value.static_type() != *target => {
                        self.check_constructor_call(
                            name,
                            std::slice::from_ref(value),
                            false,
                            fragment.location,
                            judgment,
                        );
                    }
                    _ => self.push_checked(target, value, false, judgment),
                }
            }

            InitializerForm::BraceList(elements) => {
                for element in elements {
                    self.validate_constructs(element, judgment);
                }
                match target {
                    // A deduced list type checks each element against the
                    // element type
                    TypeKind::ListOf(element_ty) => {
                        for element in elements {
                            self.push_checked(element_ty, element, true, judgment);
                        }
                    }
                    // Braces direct-initialize an aggregate through a
                    // constructor; narrowing stays forbidden per argument
                    TypeKind::Aggregate(name) => {
                        self.check_constructor_call(
                            name,
                            elements,
                            true,
                            fragment.location,
                            judgment,
                        );
                    }
                    _ => {
                        for element in elements {
                            self.push_checked(target, element, true, judgment);
                        }
                    }
                }
            }

            InitializerForm::ParenCall(args) => {
                let values: Vec<ValueExpr> = args.iter().map(Argument::as_value).collect();
                for value in &values {
                    self.validate_constructs(value, judgment);
                }
                match target {
                    TypeKind::Aggregate(name) => {
                        self.check_constructor_call(
                            name,
                            &values,
                            false,
                            fragment.location,
                            judgment,
                        );
                    }
                    _ => {
                        for value in &values {
                            self.push_checked(target, value, false, judgment);
                        }
                    }
                }
            }
        }
    }

    /// Match an argument list against the aggregate's constructors by arity,
    /// then check each argument against the matched parameter kinds.
    fn check_constructor_call(
        &self,
        name: &str,
        args: &[ValueExpr],
        braced: bool,
        location: SourceLocation,
        judgment: &mut Judgment,
    ) {
        let def = match self.aggregates.get(name) {
            Some(def) => def,
            // No definition registered, nothing to check against
            None => return,
        };

        // Prefer a constructor whose parameters match the argument types
        // exactly (the copy constructor, for one); otherwise the first with
        // the right arity decides the parameter kinds
        let arg_types: Vec<TypeKind> = args.iter().map(ValueExpr::static_type).collect();
        let exact = def.constructors.iter().find(|c| c.params == arg_types);
        let ctor = match exact.or_else(|| def.constructor_with_arity(args.len())) {
            Some(ctor) => ctor,
            None => {
                judgment.diagnostics.push(Diagnostic::NoMatchingConstructor {
                    aggregate: name.to_string(),
                    arity: args.len(),
                    location,
                });
                return;
            }
        };

        for (param, arg) in ctor.params.iter().zip(args) {
            self.push_checked(param, arg, braced, judgment);
        }
    }

    /// Record one conversion check; in a braced context a narrowing result
    /// also gets a diagnostic.
    fn push_checked(
        &self,
        target: &TypeKind,
        value: &ValueExpr,
        braced: bool,
        judgment: &mut Judgment,
    ) {
        let result = conversion::check(target, value);
        if braced {
            if let ConversionResult::Narrowing {
                target,
                source,
                value,
                location,
            } = &result
            {
                judgment.diagnostics.push(Diagnostic::NarrowingConversion {
                    target: target.clone(),
                    source: source.clone(),
                    value: *value,
                    location: *location,
                });
            }
        }
        judgment.conversions.push(result);
    }

    /// Check every constructor call nested inside a value expression against
    /// the registered constructor surfaces.
    fn validate_constructs(&self, value: &ValueExpr, judgment: &mut Judgment) {
        match value {
            ValueExpr::Construct {
                callee,
                args,
                location,
            } => {
                if let Some(def) = self.aggregates.get(callee) {
                    if def.constructor_with_arity(args.len()).is_none() {
                        judgment.diagnostics.push(Diagnostic::NoMatchingConstructor {
                            aggregate: callee.clone(),
                            arity: args.len(),
                            location: *location,
                        });
                    }
                }
                for arg in args {
                    self.validate_constructs(arg, judgment);
                }
            }
            ValueExpr::Cast { operand, .. } => self.validate_constructs(operand, judgment),
            _ => {}
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConstructorSignature;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    fn int_literal(value: i128) -> ValueExpr {
        ValueExpr::IntLiteral {
            value,
            ty: TypeKind::integral(32, true),
            location: loc(),
        }
    }

    #[test]
    fn test_analyze_is_pure() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::new("ExampleClass"));

        let fragment = DeclarationFragment {
            identifier: "aChar".to_string(),
            qualifier: DeclaredQualifier::Explicit(TypeKind::integral(8, true)),
            initializer: InitializerForm::BraceList(vec![int_literal(512)]),
            location: loc(),
        };

        let first = analyzer.analyze(&fragment);
        let second = analyzer.analyze(&fragment);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_init_needs_nullary_constructor() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::with_constructors(
            "Widget",
            vec![ConstructorSignature::user_defined(vec![TypeKind::integral(
                32, true,
            )])],
        ));

        let fragment = DeclarationFragment {
            identifier: "w".to_string(),
            qualifier: DeclaredQualifier::Explicit(TypeKind::aggregate("Widget")),
            initializer: InitializerForm::Empty,
            location: loc(),
        };

        let judgment = analyzer.analyze(&fragment);
        assert!(matches!(
            judgment.diagnostics.as_slice(),
            [Diagnostic::NoMatchingConstructor { arity: 0, .. }]
        ));
    }

    #[test]
    fn test_constructor_arity_mismatch() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::with_constructors(
            "Widget",
            vec![ConstructorSignature::user_defined(vec![TypeKind::integral(
                32, true,
            )])],
        ));

        let fragment = DeclarationFragment {
            identifier: "w".to_string(),
            qualifier: DeclaredQualifier::Explicit(TypeKind::aggregate("Widget")),
            initializer: InitializerForm::ParenCall(vec![
                Argument::Value(int_literal(1)),
                Argument::Value(int_literal(2)),
            ]),
            location: loc(),
        };

        let judgment = analyzer.analyze(&fragment);
        assert_eq!(judgment.role, Role::VariableDefinition);
        assert!(matches!(
            judgment.diagnostics.as_slice(),
            [Diagnostic::NoMatchingConstructor { arity: 2, .. }]
        ));
    }

    #[test]
    fn test_braced_constructor_argument_narrowing() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::with_constructors(
            "Widget",
            vec![ConstructorSignature::user_defined(vec![TypeKind::integral(
                8, true,
            )])],
        ));

        let fragment = DeclarationFragment {
            identifier: "w".to_string(),
            qualifier: DeclaredQualifier::Explicit(TypeKind::aggregate("Widget")),
            initializer: InitializerForm::BraceList(vec![int_literal(512)]),
            location: loc(),
        };

        let judgment = analyzer.analyze(&fragment);
        assert!(matches!(
            judgment.diagnostics.as_slice(),
            [Diagnostic::NarrowingConversion { .. }]
        ));

        // The same call through parentheses narrows without a diagnostic
        let paren = DeclarationFragment {
            initializer: InitializerForm::ParenCall(vec![Argument::Value(int_literal(512))]),
            ..fragment
        };
        let judgment = analyzer.analyze(&paren);
        assert!(judgment.diagnostics.is_empty());
        assert!(judgment.conversions[0].is_narrowing());
    }

    #[test]
    fn test_nested_construct_arity_checked() {
        let mut analyzer = Analyzer::new();
        analyzer.register_aggregate(AggregateDef::new("Holder"));

        let fragment = DeclarationFragment {
            identifier: "h".to_string(),
            qualifier: DeclaredQualifier::Inferred,
            initializer: InitializerForm::SingleValue(ValueExpr::Construct {
                callee: "Holder".to_string(),
                args: vec![int_literal(1), int_literal(2)],
                location: loc(),
            }),
            location: loc(),
        };

        let judgment = analyzer.analyze(&fragment);
        assert_eq!(judgment.deduced_type, Some(TypeKind::aggregate("Holder")));
        assert!(matches!(
            judgment.diagnostics.as_slice(),
            [Diagnostic::NoMatchingConstructor { arity: 2, .. }]
        ));
    }
}
