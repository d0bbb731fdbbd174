//! Type promotion rules for binary operations
//!
//! Two views of the same rule table: [`promote`] works on runtime [`DType`]
//! tags, [`Promote`] resolves the common scalar type at compile time so that
//! expression nodes and products have a concrete element type.

use super::{DType, Element};

/// Promote two dtypes to a common dtype for binary operations
///
/// - Identical types are kept
/// - Floats always win over integers
/// - Wider types win over narrower ones
pub fn promote(lhs: DType, rhs: DType) -> DType {
    use DType::*;

    if lhs == rhs {
        return lhs;
    }

    // Promotion priority (higher = wins)
    let priority = |dt: DType| -> u8 {
        match dt {
            F64 => 100,
            F32 => 90,
            I64 => 65,
            I32 => 55,
        }
    };

    if priority(lhs) >= priority(rhs) {
        lhs
    } else {
        rhs
    }
}

/// Compile-time counterpart of [`promote`]
///
/// `L: Promote<R>` names the common type of an `L` and an `R` operand and
/// converts either side into it.
pub trait Promote<Rhs: Element>: Element {
    /// The common element type
    type Output: Element;

    /// Convert a left-hand value into the common type
    fn promote_lhs(self) -> <Self as Promote<Rhs>>::Output;

    /// Convert a right-hand value into the common type
    fn promote_rhs(rhs: Rhs) -> <Self as Promote<Rhs>>::Output;
}

/// Common element type of `L` and `R`
pub type Promoted<L, R> = <L as Promote<R>>::Output;

macro_rules! impl_promote {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(
            impl Promote<$rhs> for $lhs {
                type Output = $out;

                #[inline]
                fn promote_lhs(self) -> $out {
                    self as $out
                }

                #[inline]
                fn promote_rhs(rhs: $rhs) -> $out {
                    rhs as $out
                }
            }
        )*
    };
}

impl_promote! {
    f64, f64 => f64;
    f64, f32 => f64;
    f64, i64 => f64;
    f64, i32 => f64;
    f32, f64 => f64;
    f32, f32 => f32;
    f32, i64 => f32;
    f32, i32 => f32;
    i64, f64 => f64;
    i64, f32 => f32;
    i64, i64 => i64;
    i64, i32 => i64;
    i32, f64 => f64;
    i32, f32 => f32;
    i32, i64 => i64;
    i32, i32 => i32;
}
