// Scenario tests: callables, constructor surfaces, and whole units

use vexcheck::analyzer::diagnostics::Diagnostic;
use vexcheck::analyzer::engine::Analyzer;
use vexcheck::analyzer::judgment::{Judgment, Role};
use vexcheck::frontend::parse::Parser;
use vexcheck::types::TypeKind;

fn analyze(source: &str) -> Vec<Judgment> {
    let mut parser = Parser::new(source).expect("Parser creation failed");
    let unit = parser.parse_unit().expect("Parsing failed");
    let mut analyzer = Analyzer::new();
    analyzer.analyze_unit(&unit)
}

#[test]
fn test_trailing_decltype_decides_the_return_type() {
    let source = "auto add(int a, int b) -> decltype(a + b) { return a + b; }";

    let judgments = analyze(source);
    let judgment = &judgments[0];

    assert_eq!(judgment.role, Role::FunctionDeclaration);
    assert_eq!(judgment.deduced_type, Some(TypeKind::integral(32, true)));
    assert!(judgment.diagnostics.is_empty());
}

#[test]
fn test_decltype_promotes_mixed_operands() {
    let source = "auto mix(int a, double b) -> decltype(a + b) { return b; }";

    let judgments = analyze(source);
    assert_eq!(judgments[0].deduced_type, Some(TypeKind::floating(64)));
}

#[test]
fn test_single_return_path_deduces_without_annotation() {
    let source = "auto twice(int a) { return a + a; }";

    let judgments = analyze(source);
    assert_eq!(judgments[0].deduced_type, Some(TypeKind::integral(32, true)));
    assert!(judgments[0].diagnostics.is_empty());
}

#[test]
fn test_two_return_paths_need_an_annotation() {
    let source = "auto pick(int a) { return a; return 0; }";

    let judgments = analyze(source);
    let judgment = &judgments[0];

    assert_eq!(judgment.deduced_type, None);
    assert!(matches!(
        judgment.diagnostics.as_slice(),
        [Diagnostic::NoTrailingAnnotationAndNoDeducibleBody { return_count: 2, .. }]
    ));
}

#[test]
fn test_recursive_body_needs_an_annotation() {
    let source = "auto spin(int n) { return spin(n); }";

    let judgments = analyze(source);
    assert_eq!(judgments[0].deduced_type, None);
    assert!(matches!(
        judgments[0].diagnostics.as_slice(),
        [Diagnostic::NoTrailingAnnotationAndNoDeducibleBody { .. }]
    ));
}

#[test]
fn test_annotation_makes_recursion_legal() {
    let source = "auto spin(int n) -> int { return spin(n); }";

    let judgments = analyze(source);
    assert_eq!(judgments[0].deduced_type, Some(TypeKind::integral(32, true)));
    assert!(judgments[0].diagnostics.is_empty());
}

#[test]
fn test_constructor_arity_mismatch() {
    let source = r#"
        class Widget { Widget(int a); };
        Widget w(1, 2);
    "#;

    let judgments = analyze(source);
    let judgment = &judgments[0];

    // Two value arguments can only be a constructor call, so the role is
    // settled; the call itself has no matching constructor
    assert_eq!(judgment.role, Role::VariableDefinition);
    assert!(matches!(
        judgment.diagnostics.as_slice(),
        [Diagnostic::NoMatchingConstructor { arity: 2, .. }]
    ));
}

#[test]
fn test_braced_constructor_argument_narrows() {
    let source = r#"
        class Widget { Widget(char a); };
        Widget bad{512};
        Widget good{100};
    "#;

    let judgments = analyze(source);
    assert!(matches!(
        judgments[0].diagnostics.as_slice(),
        [Diagnostic::NarrowingConversion { .. }]
    ));
    assert!(judgments[1].diagnostics.is_empty());
}

#[test]
fn test_default_initialization_needs_a_nullary_constructor() {
    let source = r#"
        class Widget { Widget(int a); };
        Widget w;
    "#;

    let judgments = analyze(source);
    assert!(matches!(
        judgments[0].diagnostics.as_slice(),
        [Diagnostic::NoMatchingConstructor { arity: 0, .. }]
    ));
}

#[test]
fn test_copy_construction_through_auto() {
    let source = r#"
        class Widget { Widget(int a); };
        auto w = Widget(5);
    "#;

    let judgments = analyze(source);
    let judgment = &judgments[0];

    assert_eq!(judgment.deduced_type, Some(TypeKind::aggregate("Widget")));
    assert!(judgment.diagnostics.is_empty());
}

#[test]
fn test_declared_constructor_suppresses_the_advisory() {
    // With no nullary constructor the "author meant a value" reading is not
    // plausible, so the function declaration stands without a note
    let source = r#"
        class Widget { Widget(int a); };
        Widget w(Widget());
    "#;

    let judgments = analyze(source);
    assert_eq!(judgments[0].role, Role::FunctionDeclaration);
    assert!(judgments[0].diagnostics.is_empty());
}

#[test]
fn test_failed_fragments_do_not_affect_later_ones() {
    let source = r#"
        char bad{512};
        auto broken{1, 2.5};
        char fine{100};
        auto values{4.5};
    "#;

    let judgments = analyze(source);
    assert_eq!(judgments.len(), 4);

    assert!(!judgments[0].is_accepted());
    assert!(!judgments[1].is_accepted());

    assert!(judgments[2].is_accepted());
    assert!(judgments[3].is_accepted());
    assert_eq!(
        judgments[3].deduced_type,
        Some(TypeKind::list_of(TypeKind::floating(64)))
    );
}

#[test]
fn test_mixed_unit_end_to_end() {
    let source = r#"
        class ExampleClass { ExampleClass(); };

        ExampleClass objectA;
        ExampleClass objectB(ExampleClass());
        auto total = 100;
        char aChar{static_cast<char>(512)};
        auto area(int w, int h) -> decltype(w + h) { return w + h; }
    "#;

    let judgments = analyze(source);
    assert_eq!(judgments.len(), 5);

    assert_eq!(judgments[0].role, Role::VariableDefinition);
    assert!(judgments[0].diagnostics.is_empty());

    assert_eq!(judgments[1].role, Role::FunctionDeclaration);
    assert!(matches!(
        judgments[1].diagnostics.as_slice(),
        [Diagnostic::PotentialVexingParse { .. }]
    ));

    assert_eq!(
        judgments[2].deduced_type,
        Some(TypeKind::integral(32, true))
    );
    assert!(judgments[3].diagnostics.is_empty());
    assert_eq!(
        judgments[4].deduced_type,
        Some(TypeKind::integral(32, true))
    );

    // Only the advisory fragment carries a diagnostic; the unit as a whole
    // still passes
    assert!(judgments.iter().all(Judgment::is_accepted));
}
