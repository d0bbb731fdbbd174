//! Scalar type system for lazymat matrices
//!
//! This module provides the `DType` enum tagging every supported element type,
//! the [`Element`] trait connecting Rust scalars to it, and the promotion rules
//! that decide the scalar type of a mixed-type expression or product.

mod element;
mod promotion;

pub use element::Element;
pub use promotion::{Promote, Promoted, promote};

use std::fmt;

/// Element types supported by lazymat matrices
///
/// Every [`Element`] implementation reports one of these through
/// [`Element::DTYPE`]. The tag is used for diagnostics, for the runtime
/// promotion table and for checking that the compile-time promotion agrees
/// with it.
///
/// # Discriminant Values
///
/// - Floats: 0-9 (F64=0, F32=1)
/// - Signed ints: 10-19 (I64=10, I32=11)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
}

impl DType {
    /// All supported dtypes, widest float first
    pub const ALL: [DType; 4] = [DType::F64, DType::F32, DType::I64, DType::I32];

    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Returns true if this is an integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32)
    }

    /// Short name for display (e.g., "f32", "i64")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
