//! RAW blocks: an unused reserve value followed by the elements stored as-is.
//!
//! The estimator claims a single element at a time; the planner's merge rule
//! grows the previous RAW record instead of emitting a new block, so
//! incompressible runs become one block without starving later compressible
//! runs.

use crate::block::BLOCK_HDR_BYTES;
use crate::data_types::{read_number, write_number, Number};
use crate::heap::Mosaic;
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;

pub(crate) fn block_bytes<T: Number>(cnt: usize) -> usize {
  BLOCK_HDR_BYTES + (cnt + 1) * T::BYTES
}

pub(crate) fn probe<T: Number>() -> Probe<T> {
  Probe {
    method: Method::Raw,
    cnt: 1,
    width: 0,
    mosaic_bytes: block_bytes::<T>(1),
    dict_bytes: 0,
    dict_delta: Vec::new(),
  }
}

pub(crate) fn compress<T: Number>(buf: &mut [u8], off: usize, vals: &[T]) {
  let mut pos = off + BLOCK_HDR_BYTES;
  write_number(buf, pos, vals[0]); // reserve field
  pos += T::BYTES;
  for &v in vals {
    write_number(buf, pos, v);
    pos += T::BYTES;
  }
}

pub(crate) fn visit<T: Number, F: FnMut(u64, T)>(
  moz: &Mosaic<T>,
  off: usize,
  first: u64,
  last: u64,
  cs: &mut CandScan,
  f: &mut F,
) {
  let base = off + BLOCK_HDR_BYTES + T::BYTES;
  while let Some(oid) = cs.next_in(first, last) {
    let i = (oid - first) as usize;
    f(oid, read_number(&moz.buf, base + i * T::BYTES));
  }
}
