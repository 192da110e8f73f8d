use crate::data_types::Number;

/// A borrowed view of an uncompressed column: a contiguous run of values, the
/// logical row id of the first value, and whether nils may occur.
#[derive(Clone, Copy, Debug)]
pub struct Column<'a, T: Number> {
  values: &'a [T],
  base_oid: u64,
  has_nil: bool,
}

impl<'a, T: Number> Column<'a, T> {
  /// Builds a column view, detecting the nil property by scanning.
  pub fn new(values: &'a [T], base_oid: u64) -> Self {
    let has_nil = values.iter().any(|v| v.is_nil());
    Column {
      values,
      base_oid,
      has_nil,
    }
  }

  /// Builds a column view with a caller-supplied nil property. Claiming
  /// `has_nil = false` for a column that does contain nils yields SQL-wrong
  /// scan results, just like a stale nonil property would.
  pub fn with_has_nil(values: &'a [T], base_oid: u64, has_nil: bool) -> Self {
    Column {
      values,
      base_oid,
      has_nil,
    }
  }

  #[inline]
  pub fn values(&self) -> &'a [T] {
    self.values
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  #[inline]
  pub fn base_oid(&self) -> u64 {
    self.base_oid
  }

  #[inline]
  pub fn has_nil(&self) -> bool {
    self.has_nil
  }
}
