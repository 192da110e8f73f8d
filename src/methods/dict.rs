//! DICT and DICT256 blocks: a code vector of keys into a per-column sorted
//! dictionary kept in the vmosaic heap. The two methods share everything but
//! their insertion policy, which lives in the planner's builders.

use crate::bit_vector;
use crate::block::BLOCK_HDR_BYTES;
use crate::constants::{Bitlen, MAX_BLOCK_CNT, MAX_CODE_WIDTH};
use crate::data_types::Number;
use crate::dictionary::{self, DictBuilder};
use crate::heap::Mosaic;
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;

pub(crate) struct Layout {
  pub bv: usize,
  pub total: usize,
}

pub(crate) fn layout(cnt: usize, bits: Bitlen) -> Layout {
  Layout {
    bv: BLOCK_HDR_BYTES,
    total: BLOCK_HDR_BYTES + bit_vector::size_bytes(cnt, bits),
  }
}

pub(crate) fn probe<T: Number>(
  method: Method,
  builder: &DictBuilder<T>,
  vals: &[T],
) -> Option<Probe<T>> {
  let bp = builder.probe_values(vals.iter().copied(), vals.len().min(MAX_BLOCK_CNT));
  if bp.cnt == 0 || bp.bits_extended > MAX_CODE_WIDTH {
    return None;
  }
  Some(Probe {
    method,
    cnt: bp.cnt,
    width: 0,
    mosaic_bytes: layout(bp.cnt, bp.bits_extended).total,
    dict_bytes: bp.delta.len() * T::BYTES,
    dict_delta: bp.delta,
  })
}

pub(crate) fn compress<T: Number>(
  buf: &mut [u8],
  off: usize,
  vals: &[T],
  dict: &[T],
  bits: Bitlen,
) {
  let lay = layout(vals.len(), bits);
  let bv = &mut buf[off + lay.bv..off + lay.total];
  for (i, &v) in vals.iter().enumerate() {
    let key = dictionary::search(dict, v).expect("dictionary covers every encoded value");
    bit_vector::set(bv, i, bits, key as u32);
  }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn visit<T: Number, F: FnMut(u64, T)>(
  moz: &Mosaic<T>,
  off: usize,
  dict: &[T],
  bits: Bitlen,
  first: u64,
  last: u64,
  cs: &mut CandScan,
  f: &mut F,
) {
  let cnt = (last - first) as usize;
  let lay = layout(cnt, bits);
  let bv = &moz.buf[off + lay.bv..off + lay.total];
  while let Some(oid) = cs.next_in(first, last) {
    let i = (oid - first) as usize;
    let key = bit_vector::get(bv, i, bits) as usize;
    f(oid, dict[key]);
  }
}
