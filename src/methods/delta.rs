//! DELTA blocks: the first value, a delta width, and a code vector of
//! `cnt − 1` two's complement differences between consecutive values.
//!
//! All difference arithmetic happens on the zero-extended latents so that
//! wraparound is defined; the low-order result is reinterpreted as the
//! column type, which keeps nil sentinels bit-exact.

use crate::bit_vector;
use crate::bits;
use crate::block::BLOCK_HDR_BYTES;
use crate::constants::{Bitlen, MAX_BLOCK_CNT, MAX_CODE_WIDTH};
use crate::data_types::{read_number, write_number, Latent, Number};
use crate::heap::Mosaic;
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;

pub(crate) struct Layout {
  pub init: usize,
  pub bv: usize,
  pub total: usize,
}

/// Field offsets relative to the block start: the width byte, the first
/// value, then the code vector, packed.
pub(crate) fn layout<T: Number>(cnt: usize, width: Bitlen) -> Layout {
  let init = BLOCK_HDR_BYTES + 1;
  let bv = init + T::BYTES;
  Layout {
    init,
    bv,
    total: bv + bit_vector::size_bytes(cnt.saturating_sub(1), width),
  }
}

#[inline]
fn delta_width<T: Number>(prev: u64, next: u64) -> Bitlen {
  let d = next.wrapping_sub(prev) & bits::mask_u64(T::L::BITS);
  bits::signed_width(bits::sign_extend(d, T::L::BITS))
}

pub(crate) fn probe<T: Number>(vals: &[T]) -> Option<Probe<T>> {
  let max_cnt = vals.len().min(MAX_BLOCK_CNT);
  if max_cnt < 2 {
    return None;
  }
  let width_cap = T::L::BITS.min(MAX_CODE_WIDTH);
  let mut width: Bitlen = 1;
  let mut prev = vals[0].to_latent().to_u64();
  let mut cnt = 1;
  while cnt < max_cnt {
    let v = vals[cnt].to_latent().to_u64();
    let need = delta_width::<T>(prev, v);
    if need > width_cap {
      break;
    }
    if need > width {
      // widening the whole code vector must stay cheaper than storing the
      // next element raw
      if layout::<T>(cnt + 1, need).total > layout::<T>(cnt, width).total + T::BYTES {
        break;
      }
      width = need;
    }
    prev = v;
    cnt += 1;
  }
  if cnt < 2 {
    return None;
  }
  Some(Probe {
    method: Method::Delta,
    cnt,
    width,
    mosaic_bytes: layout::<T>(cnt, width).total,
    dict_bytes: 0,
    dict_delta: Vec::new(),
  })
}

pub(crate) fn compress<T: Number>(buf: &mut [u8], off: usize, vals: &[T], width: Bitlen) {
  let lay = layout::<T>(vals.len(), width);
  buf[off + BLOCK_HDR_BYTES] = width as u8;
  write_number(buf, off + lay.init, vals[0]);
  let bv = &mut buf[off + lay.bv..off + lay.total];
  let mut prev = vals[0].to_latent().to_u64();
  for (i, v) in vals.iter().enumerate().skip(1) {
    let u = v.to_latent().to_u64();
    let code = (u.wrapping_sub(prev) & bits::mask_u64(width)) as u32;
    bit_vector::set(bv, i - 1, width, code);
    prev = u;
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
  let cnt = (last - first) as usize;
  let width = moz.buf[off + BLOCK_HDR_BYTES] as Bitlen;
  let lay = layout::<T>(cnt, width);
  let bv = &moz.buf[off + lay.bv..off + lay.total];
  let init: T = read_number(&moz.buf, off + lay.init);
  let mut acc = init.to_latent().to_u64();
  let mut pos = 0;
  while let Some(oid) = cs.next_in(first, last) {
    let i = (oid - first) as usize;
    while pos < i {
      let code = bit_vector::get(bv, pos, width) as u64;
      acc = acc.wrapping_add(bits::sign_extend(code, width) as u64);
      pos += 1;
    }
    f(oid, T::from_latent(T::L::from_u64(acc)));
  }
}
