//! Type model shared by every analyzer component
//!
//! This module defines the closed set of types the analyzer reasons about:
//!
//! - [`TypeKind`]: primitive integral/floating kinds, named aggregates, the
//!   list-container kind produced by brace deduction, and `Unknown` for
//!   failed deduction
//! - [`Constant`]: statically known numeric values, used for the
//!   constant-expression narrowing exemption
//! - [`AggregateDef`] / [`ConstructorSignature`]: the callable surface of a
//!   user-defined type, used to match parenthesized and braced initializers
//!   against constructors
//!
//! Conversion legality is never decided by type-name equality; it is decided
//! by the rank relationships defined in [`rank`].

pub mod rank;

use std::fmt;

/// Width in bits of an integral or floating-point type.
pub type Width = u8;

/// The kinds of types the analyzer models.
///
/// `ListOf` is special: it never arises from a scalar initializer, only from
/// a brace-delimited initializer applied to an inferred-type target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Integral { width: Width, signed: bool },
    FloatingPoint { width: Width },
    Aggregate(String),
    ListOf(Box<TypeKind>),
    Unknown,
}

impl TypeKind {
    pub const fn integral(width: Width, signed: bool) -> Self {
        TypeKind::Integral { width, signed }
    }

    pub const fn floating(width: Width) -> Self {
        TypeKind::FloatingPoint { width }
    }

    pub fn aggregate(name: &str) -> Self {
        TypeKind::Aggregate(name.to_string())
    }

    pub fn list_of(element: TypeKind) -> Self {
        TypeKind::ListOf(Box::new(element))
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, TypeKind::Integral { .. })
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, TypeKind::FloatingPoint { .. })
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integral() || self.is_floating()
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TypeKind::Unknown)
    }

    /// Element type of a list-container, None for everything else.
    pub fn element(&self) -> Option<&TypeKind> {
        match self {
            TypeKind::ListOf(element) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Integral { width, signed } => {
                let name = match (width, signed) {
                    (8, true) => "char",
                    (8, false) => "unsigned char",
                    (16, true) => "short",
                    (16, false) => "unsigned short",
                    (32, true) => "int",
                    (32, false) => "unsigned int",
                    (64, true) => "long long",
                    (64, false) => "unsigned long long",
                    _ => {
                        return write!(
                            f,
                            "{}int{}",
                            if *signed { "" } else { "u" },
                            width
                        );
                    }
                };
                write!(f, "{}", name)
            }
            TypeKind::FloatingPoint { width } => match width {
                32 => write!(f, "float"),
                64 => write!(f, "double"),
                _ => write!(f, "float{}", width),
            },
            TypeKind::Aggregate(name) => write!(f, "{}", name),
            TypeKind::ListOf(element) => {
                write!(f, "std::initializer_list<{}>", element)
            }
            TypeKind::Unknown => write!(f, "<unknown>"),
        }
    }
}

/// A statically known numeric value.
///
/// Only values the front end can fold exactly (integer and floating literals,
/// possibly negated) become constants; everything else is opaque and never
/// qualifies for the narrowing exemption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Int(i128),
    Float(f64),
}

impl Constant {
    /// Whether this value is exactly representable in `target`.
    ///
    /// This is the eligibility test for the constant-expression narrowing
    /// exemption: `char c{100}` is fine because 100 fits an 8-bit signed
    /// range, `char c{512}` is not.
    pub fn fits_exactly(&self, target: &TypeKind) -> bool {
        match (self, target) {
            (Constant::Int(v), TypeKind::Integral { width, signed }) => {
                integral_range_contains(*width, *signed, *v)
            }
            (Constant::Int(v), TypeKind::FloatingPoint { width }) => match width {
                32 => (*v as f32) as i128 == *v,
                64 => (*v as f64) as i128 == *v,
                _ => false,
            },
            (Constant::Float(x), TypeKind::FloatingPoint { width }) => match width {
                32 => f64::from(*x as f32) == *x,
                64 => true,
                _ => false,
            },
            (Constant::Float(x), TypeKind::Integral { width, signed }) => {
                if x.fract() != 0.0 || !x.is_finite() {
                    return false;
                }
                // Bounds check before the cast so huge floats don't saturate
                if *x < i128::MIN as f64 || *x > i128::MAX as f64 {
                    return false;
                }
                let v = *x as i128;
                v as f64 == *x && integral_range_contains(*width, *signed, v)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Range check for an integral type of the given width and signedness.
fn integral_range_contains(width: Width, signed: bool, value: i128) -> bool {
    if width >= 128 {
        return signed || value >= 0;
    }
    if signed {
        let min = -(1i128 << (width - 1));
        let max = (1i128 << (width - 1)) - 1;
        value >= min && value <= max
    } else {
        let max = (1i128 << width) - 1;
        value >= 0 && value <= max
    }
}

/// Where a constructor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorKind {
    Default,
    Copy,
    UserDefined,
}

/// One constructor of an aggregate: its provenance and ordered parameter kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorSignature {
    pub kind: ConstructorKind,
    pub params: Vec<TypeKind>,
}

impl ConstructorSignature {
    pub fn default_ctor() -> Self {
        ConstructorSignature {
            kind: ConstructorKind::Default,
            params: Vec::new(),
        }
    }

    pub fn copy_ctor(aggregate: &str) -> Self {
        ConstructorSignature {
            kind: ConstructorKind::Copy,
            params: vec![TypeKind::aggregate(aggregate)],
        }
    }

    pub fn user_defined(params: Vec<TypeKind>) -> Self {
        ConstructorSignature {
            kind: ConstructorKind::UserDefined,
            params,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A user-defined type with a known set of constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateDef {
    pub name: String,
    pub constructors: Vec<ConstructorSignature>,
}

impl AggregateDef {
    /// An aggregate that declares no constructors of its own. It still gets
    /// the implicit default and copy constructors.
    pub fn new(name: &str) -> Self {
        AggregateDef {
            name: name.to_string(),
            constructors: vec![
                ConstructorSignature::default_ctor(),
                ConstructorSignature::copy_ctor(name),
            ],
        }
    }

    /// An aggregate with user-declared constructors. Declaring any
    /// constructor suppresses the implicit default one; the copy constructor
    /// is always present.
    pub fn with_constructors(name: &str, declared: Vec<ConstructorSignature>) -> Self {
        let mut constructors = declared;
        constructors.push(ConstructorSignature::copy_ctor(name));
        AggregateDef {
            name: name.to_string(),
            constructors,
        }
    }

    pub fn has_nullary_constructor(&self) -> bool {
        self.constructors.iter().any(|c| c.arity() == 0)
    }

    pub fn constructor_with_arity(&self, arity: usize) -> Option<&ConstructorSignature> {
        self.constructors.iter().find(|c| c.arity() == arity)
    }
}
