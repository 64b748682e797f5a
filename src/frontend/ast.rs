// Fragment definitions consumed by the analyzer

use crate::types::{Constant, TypeKind};

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// How the declared type of a fragment is spelled.
///
/// `InferredBraced` is `auto` combined with brace-delimited initializer
/// syntax; the distinction matters because braces flip deduction to the
/// list-container special case.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredQualifier {
    Explicit(TypeKind),
    Inferred,
    InferredBraced,
}

/// A literal or sub-expression carrying its own static type.
///
/// Value expressions are immutable and owned by the initializer form that
/// references them.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    IntLiteral {
        value: i128,
        ty: TypeKind,
        location: SourceLocation,
    },
    FloatLiteral {
        value: f64,
        ty: TypeKind,
        location: SourceLocation,
    },
    /// Constructor-style call `Name(args...)` with at least the callee known
    Construct {
        callee: String,
        args: Vec<ValueExpr>,
        location: SourceLocation,
    },
    /// Non-constant expression with a known static type (a named variable)
    Opaque {
        name: String,
        ty: TypeKind,
        location: SourceLocation,
    },
    /// Explicit conversion marker, `static_cast<T>(expr)`
    Cast {
        target: TypeKind,
        operand: Box<ValueExpr>,
        location: SourceLocation,
    },
}

impl ValueExpr {
    pub fn location(&self) -> SourceLocation {
        match self {
            ValueExpr::IntLiteral { location, .. }
            | ValueExpr::FloatLiteral { location, .. }
            | ValueExpr::Construct { location, .. }
            | ValueExpr::Opaque { location, .. }
            | ValueExpr::Cast { location, .. } => *location,
        }
    }

    /// Static type of this expression.
    pub fn static_type(&self) -> TypeKind {
        match self {
            ValueExpr::IntLiteral { ty, .. } => ty.clone(),
            ValueExpr::FloatLiteral { ty, .. } => ty.clone(),
            ValueExpr::Construct { callee, .. } => TypeKind::aggregate(callee),
            ValueExpr::Opaque { ty, .. } => ty.clone(),
            ValueExpr::Cast { target, .. } => target.clone(),
        }
    }

    /// The statically known value, if this expression is a literal.
    ///
    /// A cast deliberately yields no constant: once the author has written an
    /// explicit conversion, the value is judged as the target type and the
    /// constant exemption no longer applies.
    pub fn constant(&self) -> Option<Constant> {
        match self {
            ValueExpr::IntLiteral { value, .. } => Some(Constant::Int(*value)),
            ValueExpr::FloatLiteral { value, .. } => Some(Constant::Float(*value)),
            _ => None,
        }
    }
}

/// One argument inside a parenthesized initializer.
///
/// A form like `ExampleClass()` can be read either as a value (a call to the
/// nullary constructor) or as a type-id (function returning `ExampleClass`).
/// The parser keeps that ambiguity; the disambiguator resolves it.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Value(ValueExpr),
    TypeIdLike {
        ty: TypeKind,
        location: SourceLocation,
    },
}

impl Argument {
    pub fn is_type_id_like(&self) -> bool {
        matches!(self, Argument::TypeIdLike { .. })
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Argument::Value(value) => value.location(),
            Argument::TypeIdLike { location, .. } => *location,
        }
    }

    /// Read this argument as a value, the interpretation a variable
    /// definition forces. `ExampleClass()` becomes a nullary constructor
    /// call; a primitive type-id becomes its value-initialized zero.
    pub fn as_value(&self) -> ValueExpr {
        match self {
            Argument::Value(value) => value.clone(),
            Argument::TypeIdLike { ty, location } => match ty {
                TypeKind::Aggregate(name) => ValueExpr::Construct {
                    callee: name.clone(),
                    args: Vec::new(),
                    location: *location,
                },
                TypeKind::FloatingPoint { .. } => ValueExpr::FloatLiteral {
                    value: 0.0,
                    ty: ty.clone(),
                    location: *location,
                },
                _ => ValueExpr::IntLiteral {
                    value: 0,
                    ty: ty.clone(),
                    location: *location,
                },
            },
        }
    }
}

/// The four initializer shapes the analyzer distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum InitializerForm {
    Empty,
    ParenCall(Vec<Argument>),
    BraceList(Vec<ValueExpr>),
    SingleValue(ValueExpr),
}

/// One declaration to analyze: identifier, qualifier, initializer.
///
/// Constructed once per analysis request and never mutated; it owns its
/// initializer sub-structure exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationFragment {
    pub identifier: String,
    pub qualifier: DeclaredQualifier,
    pub initializer: InitializerForm,
    pub location: SourceLocation,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeKind,
}

/// Trailing return annotation on a callable with an inferred return type.
#[derive(Debug, Clone, PartialEq)]
pub enum TrailingReturn {
    /// `-> T` with a concrete type
    Annotated(TypeKind),
    /// `-> decltype(a)` naming a single parameter
    DecltypeParam {
        name: String,
        location: SourceLocation,
    },
    /// `-> decltype(a + b)` over two parameters
    DecltypeAdd {
        left: String,
        right: String,
        location: SourceLocation,
    },
}

/// The static type of one `return` statement in a callable body.
///
/// A return whose expression the front end cannot type (a recursive call,
/// for instance) carries `TypeKind::Unknown`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnPath {
    pub ty: TypeKind,
    pub location: SourceLocation,
}

/// A callable declared with an inferred return type.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableFragment {
    pub name: String,
    pub params: Vec<Param>,
    pub trailing: Option<TrailingReturn>,
    pub return_paths: Vec<ReturnPath>,
    pub location: SourceLocation,
}

impl CallableFragment {
    pub fn param_type(&self, name: &str) -> Option<&TypeKind> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.ty)
    }
}

/// A parsed input unit: class definitions plus the fragments to analyze.
#[derive(Debug, Clone, Default)]
pub struct SourceUnit {
    pub aggregates: Vec<crate::types::AggregateDef>,
    pub fragments: Vec<Fragment>,
}

impl SourceUnit {
    pub fn new() -> Self {
        SourceUnit::default()
    }
}

/// Anything the front end hands to the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Declaration(DeclarationFragment),
    Callable(CallableFragment),
}

impl Fragment {
    pub fn location(&self) -> SourceLocation {
        match self {
            Fragment::Declaration(decl) => decl.location,
            Fragment::Callable(callable) => callable.location,
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Fragment::Declaration(decl) => &decl.identifier,
            Fragment::Callable(callable) => &callable.name,
        }
    }
}
