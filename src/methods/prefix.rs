//! PREFIX blocks: a shared value for the high bits plus a code vector of
//! low-bit suffixes. Applicable when every value in the run agrees on its
//! top `width(T) − suffix_bits` bits.

use crate::bit_vector;
use crate::bits;
use crate::block::BLOCK_HDR_BYTES;
use crate::constants::{Bitlen, MAX_BLOCK_CNT, MAX_CODE_WIDTH};
use crate::data_types::{Latent, Number};
use crate::heap::Mosaic;
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;

pub(crate) struct Layout {
  pub prefix: usize,
  pub bv: usize,
  pub total: usize,
}

pub(crate) fn layout<T: Number>(cnt: usize, suffix_bits: Bitlen) -> Layout {
  let prefix = BLOCK_HDR_BYTES + 1;
  let bv = prefix + T::BYTES;
  Layout {
    prefix,
    bv,
    total: bv + bit_vector::size_bytes(cnt, suffix_bits),
  }
}

#[inline]
fn suffix_width(diff: u64) -> Bitlen {
  (64 - diff.leading_zeros()).max(1)
}

pub(crate) fn probe<T: Number>(vals: &[T]) -> Option<Probe<T>> {
  let max_cnt = vals.len().min(MAX_BLOCK_CNT);
  if max_cnt < 2 {
    return None;
  }
  let cap = T::L::BITS.min(MAX_CODE_WIDTH);
  let v0 = vals[0].to_latent().to_u64();
  let mut span = v0 ^ vals[1].to_latent().to_u64();
  let mut width = suffix_width(span);
  if width > cap {
    return None;
  }
  let mut cnt = 2;
  while cnt < max_cnt {
    let d = span | (v0 ^ vals[cnt].to_latent().to_u64());
    let need = suffix_width(d);
    if need > cap {
      break;
    }
    if need > width {
      // widening every suffix must stay cheaper than storing the next
      // element raw
      if layout::<T>(cnt + 1, need).total > layout::<T>(cnt, width).total + T::BYTES {
        break;
      }
      width = need;
    }
    span = d;
    cnt += 1;
  }
  Some(Probe {
    method: Method::Prefix,
    cnt,
    width,
    mosaic_bytes: layout::<T>(cnt, width).total,
    dict_bytes: 0,
    dict_delta: Vec::new(),
  })
}

pub(crate) fn compress<T: Number>(buf: &mut [u8], off: usize, vals: &[T], suffix_bits: Bitlen) {
  let lay = layout::<T>(vals.len(), suffix_bits);
  let mask = bits::mask_u64(suffix_bits);
  buf[off + BLOCK_HDR_BYTES] = suffix_bits as u8;
  let prefix = vals[0].to_latent().to_u64() & !mask;
  T::L::from_u64(prefix).write_le(&mut buf[off + lay.prefix..]);
  let bv = &mut buf[off + lay.bv..off + lay.total];
  for (i, v) in vals.iter().enumerate() {
    bit_vector::set(bv, i, suffix_bits, (v.to_latent().to_u64() & mask) as u32);
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
  let suffix_bits = moz.buf[off + BLOCK_HDR_BYTES] as Bitlen;
  let lay = layout::<T>(cnt, suffix_bits);
  let prefix = T::L::read_le(&moz.buf[off + lay.prefix..]).to_u64();
  let bv = &moz.buf[off + lay.bv..off + lay.total];
  while let Some(oid) = cs.next_in(first, last) {
    let i = (oid - first) as usize;
    let suffix = bit_vector::get(bv, i, suffix_bits) as u64;
    f(oid, T::from_latent(T::L::from_u64(prefix | suffix)));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_probe_widens_to_cover_run() {
    let vals = [0x10a_i32, 0x10b, 0x10c, 0x10f];
    let probe = probe::<i32>(&vals).unwrap();
    assert_eq!(probe.cnt, 4);
    assert_eq!(probe.width, 3); // all four share 0x108
  }

  #[test]
  fn test_probe_stops_at_wide_outlier() {
    let mut vals: Vec<i32> = (0x100..0x108).collect();
    vals.push(0x7fff_ffff);
    let probe = probe::<i32>(&vals).unwrap();
    assert_eq!(probe.cnt, 8);
    assert_eq!(probe.width, 3);
  }

  #[test]
  fn test_sign_bit_divergence_exceeds_cap() {
    // i64 values disagreeing in the top bit would need a 64-bit suffix
    assert!(probe::<i64>(&[i64::MIN, i64::MAX]).is_none());
  }
}
