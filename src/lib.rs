#![doc = include_str!("../README.md")]
//! # API Notes
//!
//! * A [`Mosaic`] is immutable once built; every scan entry point is a pure
//! reader and any number may run concurrently on the same compressed column.
//! * `compress` surfaces `NoReduction` when the planned block stream would
//! not be smaller than the column; the caller then keeps the column as-is.

pub use column::Column;
pub use errors::{ErrorKind, MosaicError, MosaicResult};
pub use heap::{BlockInfo, Mosaic};
pub use method::{Method, MethodSet};
pub use planner::compress;
pub use scan::candidates::Candidates;
pub use scan::ThetaOp;

pub mod data_types;
pub mod errors;

mod bit_vector;
mod bits;
mod block;
mod column;
mod constants;
mod dictionary;
mod header;
mod heap;
mod method;
mod methods;
mod planner;
mod scan;

#[cfg(test)]
mod tests;
