use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use crate::constants::Bitlen;

mod floats;
mod latents;
mod signeds;

/// *unstable API* Trait for the unsigned integer twins of the supported
/// types.
///
/// Every number is reinterpreted as its same-width latent for storage and
/// for all difference arithmetic, so that wraparound is well defined. The
/// low-order result is reinterpreted back at the API boundary.
pub trait Latent:
  Copy + Debug + Display + Eq + Ord + std::hash::Hash + Send + Sync + 'static
{
  const BITS: Bitlen;
  const BYTES: usize;

  /// Truncates to the latent's width.
  fn from_u64(x: u64) -> Self;
  /// Zero-extends.
  fn to_u64(self) -> u64;
  fn read_le(src: &[u8]) -> Self;
  fn write_le(self, dst: &mut [u8]);
}

/// *unstable API* Trait for data types supported for compression and
/// compressed scans.
///
/// The eight supported column types are the 1/2/4/8-byte signed integers and
/// the 4/8-byte IEEE floats; date, daytime and timestamp columns are the
/// 4/8-byte integer impls under a different name and need no impl of their
/// own.
pub trait Number:
  Copy + Debug + Display + Default + PartialEq + PartialOrd + Send + Sync + 'static
{
  /// Size of the type in bytes.
  const BYTES: usize;
  /// The nil sentinel: the minimum value for integers, NaN for floats.
  const NIL: Self;
  /// Whether integer-only methods (DELTA, LINEAR, FRAME, PREFIX) apply.
  const INTEGER: bool;

  /// The same-width unsigned type used for storage and for all overflow-free
  /// modular arithmetic.
  type L: Latent;

  fn is_nil(self) -> bool;
  /// Plain bit reinterpretation; not order preserving.
  fn to_latent(self) -> Self::L;
  fn from_latent(l: Self::L) -> Self;
  /// Largest value strictly below `self`, if one exists among non-nil
  /// values.
  fn checked_prev(self) -> Option<Self>;
  /// Smallest value strictly above `self`, if one exists.
  fn checked_next(self) -> Option<Self>;
  /// Total order with nil sorting first; dictionaries are kept sorted under
  /// this order.
  fn cmp_nil_first(&self, other: &Self) -> Ordering;
}

/// Equality under SQL semantics: values match bitwise, or both are nil and
/// the column may contain nils.
#[inline]
pub(crate) fn are_equal<T: Number>(v: T, w: T, has_nil: bool) -> bool {
  v == w || (has_nil && v.is_nil() && w.is_nil())
}

pub(crate) fn read_number<T: Number>(buf: &[u8], off: usize) -> T {
  T::from_latent(T::L::read_le(&buf[off..]))
}

pub(crate) fn write_number<T: Number>(buf: &mut [u8], off: usize, v: T) {
  v.to_latent().write_le(&mut buf[off..]);
}
