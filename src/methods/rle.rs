//! RLE blocks: the run's single value, stored once.

use crate::block::{BlockHead, BLOCK_HDR_BYTES};
use crate::constants::MAX_BLOCK_CNT;
use crate::data_types::{are_equal, read_number, write_number, Number};
use crate::heap::{Cursor, Mosaic};
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;
use crate::scan::ValueTest;

pub(crate) fn block_bytes<T: Number>() -> usize {
  BLOCK_HDR_BYTES + T::BYTES
}

pub(crate) fn probe<T: Number>(vals: &[T], has_nil: bool) -> Probe<T> {
  let v0 = vals[0];
  let max_cnt = vals.len().min(MAX_BLOCK_CNT);
  let mut cnt = 1;
  while cnt < max_cnt && are_equal(vals[cnt], v0, has_nil) {
    cnt += 1;
  }
  Probe {
    method: Method::Rle,
    cnt,
    width: 0,
    mosaic_bytes: block_bytes::<T>(),
    dict_bytes: 0,
    dict_delta: Vec::new(),
  }
}

pub(crate) fn compress<T: Number>(buf: &mut [u8], off: usize, vals: &[T]) {
  write_number(buf, off + BLOCK_HDR_BYTES, vals[0]);
}

pub(crate) fn visit<T: Number, F: FnMut(u64, T)>(
  moz: &Mosaic<T>,
  off: usize,
  first: u64,
  last: u64,
  cs: &mut CandScan,
  f: &mut F,
) {
  let val: T = read_number(&moz.buf, off + BLOCK_HDR_BYTES);
  while let Some(oid) = cs.next_in(first, last) {
    f(oid, val);
  }
}

/// Tests the single value once; on a hit the whole surviving oid range is
/// emitted without further decoding.
pub(crate) fn select_block<T: Number>(
  moz: &Mosaic<T>,
  cur: &Cursor,
  head: &BlockHead,
  test: &ValueTest<T>,
  cs: &mut CandScan,
  out: &mut Vec<u64>,
) {
  let first = moz.base_oid + cur.start as u64;
  let last = first + head.cnt as u64;
  let val: T = read_number(&moz.buf, cur.off + BLOCK_HDR_BYTES);
  if test.matches(val) {
    while let Some(oid) = cs.next_in(first, last) {
      out.push(oid);
    }
  } else {
    cs.skip_below(last);
  }
}

pub(crate) fn join_inner<T: Number>(
  moz: &Mosaic<T>,
  cur: &Cursor,
  head: &BlockHead,
  lval: T,
  lo: u64,
  has_nil: bool,
  cs: &mut CandScan,
  ros: &mut Vec<u64>,
  los: &mut Vec<u64>,
) {
  let first = moz.base_oid + cur.start as u64;
  let last = first + head.cnt as u64;
  let val: T = read_number(&moz.buf, cur.off + BLOCK_HDR_BYTES);
  if are_equal(lval, val, has_nil) {
    while let Some(ro) = cs.next_in(first, last) {
      ros.push(ro);
      los.push(lo);
    }
  } else {
    cs.skip_below(last);
  }
}
