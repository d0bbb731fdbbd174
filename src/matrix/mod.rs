//! Matrix storage and the views built on it
//!
//! - [`Matrix`]: owning row-major storage
//! - [`Zero`], [`Identity`], [`Constant`]: allocation-free singleton views
//! - [`MatrixView`]: the read interface every matrix kind implements
//! - [`approx_equal`] and friends for tolerance-based comparison

mod compare;
mod helpers;
mod random;
mod shape;
mod storage;
mod view;

pub use compare::{Tolerance, approx_equal, approx_equal_with, deep_approx_equal};
pub use helpers::{Constant, Identity, Zero};
pub use random::RandnConfig;
pub use shape::Shape;
pub use storage::Matrix;
pub use view::{Elements, MatrixView};
