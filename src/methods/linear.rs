//! LINEAR blocks: an exact arithmetic sequence stored as offset and step.
//! Reconstruction is arithmetic only; no code vector is kept.

use crate::bits;
use crate::block::{BlockHead, BLOCK_HDR_BYTES};
use crate::constants::MAX_BLOCK_CNT;
use crate::data_types::{are_equal, write_number, Latent, Number};
use crate::heap::{Cursor, Mosaic};
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;

pub(crate) struct Layout {
  pub offset: usize,
  pub step: usize,
  pub total: usize,
}

pub(crate) fn layout<T: Number>() -> Layout {
  let offset = BLOCK_HDR_BYTES;
  Layout {
    offset,
    step: offset + T::BYTES,
    total: offset + 2 * T::BYTES,
  }
}

pub(crate) fn probe<T: Number>(vals: &[T]) -> Option<Probe<T>> {
  let max_cnt = vals.len().min(MAX_BLOCK_CNT);
  if max_cnt < 2 {
    return None;
  }
  let mask = bits::mask_u64(T::L::BITS);
  let v0 = vals[0].to_latent().to_u64();
  let v1 = vals[1].to_latent().to_u64();
  let step = v1.wrapping_sub(v0);
  let mut expect = v1;
  let mut cnt = 2;
  while cnt < max_cnt {
    expect = expect.wrapping_add(step);
    if vals[cnt].to_latent().to_u64() != expect & mask {
      break;
    }
    cnt += 1;
  }
  Some(Probe {
    method: Method::Linear,
    cnt,
    width: 0,
    mosaic_bytes: layout::<T>().total,
    dict_bytes: 0,
    dict_delta: Vec::new(),
  })
}

pub(crate) fn compress<T: Number>(buf: &mut [u8], off: usize, vals: &[T]) {
  let lay = layout::<T>();
  write_number(buf, off + lay.offset, vals[0]);
  let step = vals[1]
    .to_latent()
    .to_u64()
    .wrapping_sub(vals[0].to_latent().to_u64());
  T::L::from_u64(step).write_le(&mut buf[off + lay.step..]);
}

fn params<T: Number>(moz: &Mosaic<T>, off: usize) -> (u64, u64) {
  let lay = layout::<T>();
  let offset = T::L::read_le(&moz.buf[off + lay.offset..]).to_u64();
  let step = T::L::read_le(&moz.buf[off + lay.step..]).to_u64();
  (offset, step)
}

#[inline]
fn value_at<T: Number>(offset: u64, step: u64, i: u64) -> T {
  T::from_latent(T::L::from_u64(offset.wrapping_add(i.wrapping_mul(step))))
}

pub(crate) fn visit<T: Number, F: FnMut(u64, T)>(
  moz: &Mosaic<T>,
  off: usize,
  first: u64,
  last: u64,
  cs: &mut CandScan,
  f: &mut F,
) {
  let (offset, step) = params(moz, off);
  while let Some(oid) = cs.next_in(first, last) {
    f(oid, value_at::<T>(offset, step, oid - first));
  }
}

/// Inverts the sequence instead of scanning it: `i = (lval − offset) / step`
/// when the division is exact and lands inside the block.
pub(crate) fn join_inner<T: Number>(
  moz: &Mosaic<T>,
  cur: &Cursor,
  head: &BlockHead,
  lval: T,
  lo: u64,
  cs: &mut CandScan,
  ros: &mut Vec<u64>,
  los: &mut Vec<u64>,
) {
  let first = moz.base_oid + cur.start as u64;
  let last = first + head.cnt as u64;
  let (offset, step) = params(moz, cur.off);
  if step == 0 {
    let here: T = value_at(offset, 0, 0);
    if are_equal(lval, here, moz.has_nil) {
      while let Some(ro) = cs.next_in(first, last) {
        ros.push(ro);
        los.push(lo);
      }
    } else {
      cs.skip_below(last);
    }
    return;
  }
  let sext = |x: u64| bits::sign_extend(x, T::L::BITS) as i128;
  let num = sext(lval.to_latent().to_u64()) - sext(offset);
  let st = sext(step);
  if num % st == 0 {
    let i = num / st;
    if i >= 0 && i < head.cnt as i128 {
      let ro = first + i as u64;
      if cs.contains_from_here(ro) {
        ros.push(ro);
        los.push(lo);
      }
    }
  }
  cs.skip_below(last);
}
