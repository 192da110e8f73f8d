//! FRAME blocks: a block-local reference value plus a code vector of indices
//! into a per-column dictionary of up to 256 deltas. The delta dictionary is
//! populated during Pass A by the first blocks that choose FRAME and refuses
//! further deltas once full.

use crate::bit_vector;
use crate::block::BLOCK_HDR_BYTES;
use crate::constants::{Bitlen, MAX_BLOCK_CNT};
use crate::data_types::{write_number, Latent, Number};
use crate::dictionary::{self, DictBuilder};
use crate::heap::Mosaic;
use crate::method::Method;
use crate::methods::Probe;
use crate::scan::candidates::CandScan;

pub(crate) struct Layout {
  pub frame: usize,
  pub bv: usize,
  pub total: usize,
}

pub(crate) fn layout<T: Number>(cnt: usize, framebits: Bitlen) -> Layout {
  let frame = BLOCK_HDR_BYTES;
  let bv = frame + T::BYTES;
  Layout {
    frame,
    bv,
    total: bv + bit_vector::size_bytes(cnt, framebits),
  }
}

/// The delta of `v` from the frame, reinterpreted as `T` for dictionary
/// storage.
#[inline]
fn frame_delta<T: Number>(frame: u64, v: T) -> T {
  T::from_latent(T::L::from_u64(v.to_latent().to_u64().wrapping_sub(frame)))
}

pub(crate) fn probe<T: Number>(builder: &DictBuilder<T>, vals: &[T]) -> Option<Probe<T>> {
  let max_cnt = vals.len().min(MAX_BLOCK_CNT);
  if max_cnt == 0 {
    return None;
  }
  let frame = vals[0].to_latent().to_u64();
  let bp = builder.probe_values(
    vals.iter().map(|&v| frame_delta(frame, v)),
    max_cnt,
  );
  if bp.cnt == 0 {
    return None;
  }
  Some(Probe {
    method: Method::Frame,
    cnt: bp.cnt,
    width: 0,
    mosaic_bytes: layout::<T>(bp.cnt, bp.bits_extended).total,
    dict_bytes: bp.delta.len() * T::BYTES,
    dict_delta: bp.delta,
  })
}

pub(crate) fn compress<T: Number>(
  buf: &mut [u8],
  off: usize,
  vals: &[T],
  frame_dict: &[T],
  framebits: Bitlen,
) {
  let lay = layout::<T>(vals.len(), framebits);
  write_number(buf, off + lay.frame, vals[0]);
  let frame = vals[0].to_latent().to_u64();
  let bv = &mut buf[off + lay.bv..off + lay.total];
  for (i, &v) in vals.iter().enumerate() {
    let key = dictionary::search(frame_dict, frame_delta(frame, v))
      .expect("frame delta present in the dictionary");
    bit_vector::set(bv, i, framebits, key as u32);
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
  let framebits = moz.hdr.bits_frame as Bitlen;
  let lay = layout::<T>(cnt, framebits);
  let frame = T::L::read_le(&moz.buf[off + lay.frame..]).to_u64();
  let bv = &moz.buf[off + lay.bv..off + lay.total];
  let frame_dict = moz.frame_dict();
  while let Some(oid) = cs.next_in(first, last) {
    let i = (oid - first) as usize;
    let key = bit_vector::get(bv, i, framebits) as usize;
    let delta = frame_dict[key].to_latent().to_u64();
    f(oid, T::from_latent(T::L::from_u64(frame.wrapping_add(delta))));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::MAX_FRAME_DICT;

  #[test]
  fn test_probe_collects_deltas() {
    let builder = DictBuilder::<i32>::capped(MAX_FRAME_DICT, None);
    let probe = probe(&builder, &[50, 52, 50, 49, 52]).unwrap();
    assert_eq!(probe.cnt, 5);
    // deltas 0, +2, -1 relative to the frame
    assert_eq!(probe.dict_delta, vec![-1, 0, 2]);
  }

  #[test]
  fn test_full_dictionary_stops_block() {
    let mut builder = DictBuilder::<i32>::capped(2, None);
    let first = probe(&builder, &[10, 11, 12]).unwrap();
    assert_eq!(first.cnt, 2);
    builder.commit(first.dict_delta);
    // a later block reusing known deltas still works
    let again = probe(&builder, &[70, 71, 70, 75]).unwrap();
    assert_eq!(again.cnt, 3);
    assert!(again.dict_delta.is_empty());
  }
}
