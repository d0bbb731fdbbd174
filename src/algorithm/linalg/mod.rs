//! Dense linear algebra on square views
//!
//! - `helpers`: validation and the [`LinalgElement`] bound
//! - `lu`: Doolittle factorization ([`Lu`]) and triangular solves

pub mod helpers;
mod lu;

pub use helpers::{LinalgElement, validate_square_matrix};
pub use lu::{Lu, LuConfig, lu_solve};
