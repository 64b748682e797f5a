//! Conversion-rank lattice
//!
//! Narrowing is a property of the rank relationship between two types, not of
//! their names. This module holds the ordered width tables that define those
//! ranks, plus the numeric promotion rule used to evaluate `decltype(a + b)`
//! trailing-return forms.
//!
//! The table is process-wide read-only state: it is built once behind a
//! [`OnceLock`] and never mutated afterwards, so concurrent analyses can read
//! it without synchronization.

use std::sync::OnceLock;

use super::{TypeKind, Width};

/// Ordered width tables for the primitive categories.
///
/// Rank within a category is the index of the width in its table; adding a
/// new primitive width is a table edit, not a new code path.
#[derive(Debug)]
pub struct RankTable {
    integral_widths: Vec<Width>,
    floating_widths: Vec<Width>,
}

static RANK_TABLE: OnceLock<RankTable> = OnceLock::new();

impl RankTable {
    /// The shared process-wide table.
    pub fn global() -> &'static RankTable {
        RANK_TABLE.get_or_init(RankTable::standard)
    }

    /// char/short/int/long long and float/double widths.
    fn standard() -> Self {
        RankTable {
            integral_widths: vec![8, 16, 32, 64],
            floating_widths: vec![32, 64],
        }
    }

    pub fn integral_rank(&self, width: Width) -> Option<usize> {
        self.integral_widths.iter().position(|w| *w == width)
    }

    pub fn floating_rank(&self, width: Width) -> Option<usize> {
        self.floating_widths.iter().position(|w| *w == width)
    }

    /// Number of mantissa bits of a floating width, including the implicit
    /// leading bit. Determines which integral widths convert exactly.
    pub fn mantissa_bits(width: Width) -> Option<u32> {
        match width {
            32 => Some(24),
            64 => Some(53),
            _ => None,
        }
    }

    /// Result type of a binary arithmetic expression over two numeric
    /// operands: floating beats integral, wider beats narrower, and integral
    /// operands promote to at least `int` width.
    pub fn promote(&self, left: &TypeKind, right: &TypeKind) -> TypeKind {
        match (left, right) {
            (
                TypeKind::FloatingPoint { width: lw },
                TypeKind::FloatingPoint { width: rw },
            ) => TypeKind::floating(*lw.max(rw)),
            (TypeKind::FloatingPoint { width }, other)
            | (other, TypeKind::FloatingPoint { width })
                if other.is_integral() =>
            {
                TypeKind::floating(*width)
            }
            (
                TypeKind::Integral {
                    width: lw,
                    signed: ls,
                },
                TypeKind::Integral {
                    width: rw,
                    signed: rs,
                },
            ) => {
                // Integer promotion: nothing narrower than int takes part
                let width = (*lw.max(rw)).max(32);
                let signed = if ls == rs {
                    *ls
                } else {
                    // Mixed signedness: the unsigned operand wins when its
                    // rank is at least the signed operand's rank
                    let (uw, sw) = if *ls { (*rw, *lw) } else { (*lw, *rw) };
                    uw < sw
                };
                TypeKind::integral(width, signed)
            }
            _ => TypeKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        let table = RankTable::global();
        assert!(table.integral_rank(8).unwrap() < table.integral_rank(32).unwrap());
        assert!(table.floating_rank(32).unwrap() < table.floating_rank(64).unwrap());
        assert_eq!(table.integral_rank(12), None);
    }

    #[test]
    fn test_promote_floating_wins() {
        let table = RankTable::global();
        let int = TypeKind::integral(32, true);
        let double = TypeKind::floating(64);
        assert_eq!(table.promote(&int, &double), TypeKind::floating(64));
        assert_eq!(
            table.promote(&TypeKind::floating(32), &double),
            TypeKind::floating(64)
        );
    }

    #[test]
    fn test_promote_small_integrals_to_int() {
        let table = RankTable::global();
        let short = TypeKind::integral(16, true);
        let ch = TypeKind::integral(8, true);
        assert_eq!(table.promote(&short, &ch), TypeKind::integral(32, true));
    }

    #[test]
    fn test_promote_mixed_signedness() {
        let table = RankTable::global();
        let uint = TypeKind::integral(32, false);
        let long = TypeKind::integral(64, true);
        // unsigned int + long long: the wider signed type holds every value
        assert_eq!(table.promote(&uint, &long), TypeKind::integral(64, true));
        // unsigned int + int: unsigned wins at equal rank
        let int = TypeKind::integral(32, true);
        assert_eq!(table.promote(&uint, &int), TypeKind::integral(32, false));
    }

    #[test]
    fn test_promote_non_numeric() {
        let table = RankTable::global();
        let agg = TypeKind::aggregate("Widget");
        assert_eq!(
            table.promote(&agg, &TypeKind::integral(32, true)),
            TypeKind::Unknown
        );
    }
}
