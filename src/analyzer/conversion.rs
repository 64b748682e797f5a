//! Narrowing detection over the conversion-rank lattice
//!
//! A conversion is judged by the rank relationship between source and target,
//! never by type-name equality:
//!
//! - equal rank in the same category is `Exact`
//! - a strictly value-preserving rank gain is `Widening`
//! - anything that can lose information for some representable source value
//!   is `Narrowing`, unless the value is a literal constant that is exactly
//!   representable in the target
//! - an explicit conversion wrapper is `ExplicitlyConverted`, unconditionally
//!
//! The checker never fails; the caller decides whether a `Narrowing` result
//! is fatal in its context (it is inside braces, it is not after `=`).

use crate::analyzer::judgment::ConversionResult;
use crate::frontend::ast::ValueExpr;
use crate::types::rank::RankTable;
use crate::types::TypeKind;

/// Classify the conversion implied by initializing `target` from `value`.
pub fn check(target: &TypeKind, value: &ValueExpr) -> ConversionResult {
    // An explicit conversion marker overrides every other rule: the author
    // already acknowledged the value change
    if matches!(value, ValueExpr::Cast { .. }) {
        return ConversionResult::ExplicitlyConverted;
    }

    let source = value.static_type();
    if source == *target {
        return ConversionResult::Exact;
    }

    if widens(&source, target) {
        return ConversionResult::Widening;
    }

    // Constant carve-out: a literal whose exact value fits the target is
    // represented exactly, whatever the ranks say
    if let Some(constant) = value.constant() {
        if constant.fits_exactly(target) {
            return ConversionResult::Exact;
        }
    }

    ConversionResult::Narrowing {
        target: target.clone(),
        source,
        value: value.constant(),
        location: value.location(),
    }
}

/// Whether every value of `source` is representable in `target`.
fn widens(source: &TypeKind, target: &TypeKind) -> bool {
    let table = RankTable::global();

    match (source, target) {
        (
            TypeKind::Integral {
                width: sw,
                signed: ss,
            },
            TypeKind::Integral {
                width: tw,
                signed: ts,
            },
        ) => match (table.integral_rank(*sw), table.integral_rank(*tw)) {
            // A wider target preserves every source value unless the source
            // is signed and the target is not (negatives are lost). Equal
            // rank with different signedness loses values in both directions.
            (Some(sr), Some(tr)) => tr > sr && (*ts || !*ss),
            _ => false,
        },
        (TypeKind::FloatingPoint { width: sw }, TypeKind::FloatingPoint { width: tw }) => {
            match (table.floating_rank(*sw), table.floating_rank(*tw)) {
                (Some(sr), Some(tr)) => tr > sr,
                _ => false,
            }
        }
        (TypeKind::Integral { width: sw, .. }, TypeKind::FloatingPoint { width: tw }) => {
            // Integral to floating preserves values only while the mantissa
            // covers the full integral width
            RankTable::mantissa_bits(*tw).is_some_and(|mantissa| u32::from(*sw) <= mantissa)
        }
        // Floating to integral, aggregates, lists: never a widening
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::SourceLocation;
    use crate::types::Constant;

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

    fn double_literal(value: f64) -> ValueExpr {
        ValueExpr::FloatLiteral {
            value,
            ty: TypeKind::floating(64),
            location: loc(),
        }
    }

    fn opaque(ty: TypeKind) -> ValueExpr {
        ValueExpr::Opaque {
            name: "x".to_string(),
            ty,
            location: loc(),
        }
    }

    #[test]
    fn test_oversized_literal_narrows() {
        let target = TypeKind::integral(8, true);
        match check(&target, &int_literal(512)) {
            ConversionResult::Narrowing { source, value, .. } => {
                assert_eq!(source, TypeKind::integral(32, true));
                assert_eq!(value, Some(Constant::Int(512)));
            }
            other => panic!("Expected narrowing, got {:?}", other),
        }
    }

    #[test]
    fn test_fitting_literal_is_exact() {
        let target = TypeKind::integral(8, true);
        assert_eq!(check(&target, &int_literal(100)), ConversionResult::Exact);
        assert_eq!(check(&target, &int_literal(-128)), ConversionResult::Exact);
    }

    #[test]
    fn test_cast_is_explicitly_converted() {
        let target = TypeKind::integral(8, true);
        let cast = ValueExpr::Cast {
            target: target.clone(),
            operand: Box::new(int_literal(512)),
            location: loc(),
        };
        assert_eq!(check(&target, &cast), ConversionResult::ExplicitlyConverted);
    }

    #[test]
    fn test_non_constant_double_to_float_narrows() {
        let target = TypeKind::floating(32);
        assert!(check(&target, &opaque(TypeKind::floating(64))).is_narrowing());
    }

    #[test]
    fn test_exactly_representable_float_literal() {
        let target = TypeKind::floating(32);
        // 4.5 survives the round trip to single precision, 0.1 does not
        assert_eq!(check(&target, &double_literal(4.5)), ConversionResult::Exact);
        assert!(check(&target, &double_literal(0.1)).is_narrowing());
    }

    #[test]
    fn test_integral_widening() {
        let long = TypeKind::integral(64, true);
        assert_eq!(
            check(&long, &opaque(TypeKind::integral(32, true))),
            ConversionResult::Widening
        );
        assert_eq!(
            check(&long, &opaque(TypeKind::integral(32, false))),
            ConversionResult::Widening
        );
    }

    #[test]
    fn test_signedness_loss_narrows() {
        // signed to unsigned loses negatives at any width
        let ulong = TypeKind::integral(64, false);
        assert!(check(&ulong, &opaque(TypeKind::integral(32, true))).is_narrowing());
        // equal width, different signedness loses values both ways
        let uint = TypeKind::integral(32, false);
        assert!(check(&uint, &opaque(TypeKind::integral(32, true))).is_narrowing());
    }

    #[test]
    fn test_integral_to_floating_mantissa_bound() {
        // 32-bit values all fit a 53-bit mantissa, not a 24-bit one
        assert_eq!(
            check(&TypeKind::floating(64), &opaque(TypeKind::integral(32, true))),
            ConversionResult::Widening
        );
        assert!(
            check(&TypeKind::floating(32), &opaque(TypeKind::integral(32, true))).is_narrowing()
        );
        assert!(
            check(&TypeKind::floating(64), &opaque(TypeKind::integral(64, true))).is_narrowing()
        );
    }

    #[test]
    fn test_floating_to_integral_narrows() {
        let int = TypeKind::integral(32, true);
        assert!(check(&int, &opaque(TypeKind::floating(64))).is_narrowing());
        // unless the literal is a whole number in range
        assert_eq!(check(&int, &double_literal(7.0)), ConversionResult::Exact);
        assert!(check(&int, &double_literal(7.5)).is_narrowing());
    }

    #[test]
    fn test_matching_aggregate_is_exact() {
        let target = TypeKind::aggregate("Widget");
        let construct = ValueExpr::Construct {
            callee: "Widget".to_string(),
            args: Vec::new(),
            location: loc(),
        };
        assert_eq!(check(&target, &construct), ConversionResult::Exact);
    }
}
