//! The common block header and alignment bookkeeping.
//!
//! Every block starts with a single little-endian u32 packing the element
//! count (24 bits), the method tag (4 bits) and the pad field (4 bits). The
//! pad field records how many filler bytes were inserted after this block's
//! body so that the *next* block starts at the alignment its header
//! requires; a reader can therefore traverse the stream without recomputing
//! alignment from type information.

use crate::constants::{CNT_BITS, MAX_BLOCK_CNT};
use crate::data_types::Number;
use crate::method::Method;

pub(crate) const BLOCK_HDR_BYTES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BlockHead {
  pub tag: u8,
  pub cnt: usize,
  pub pad: u8,
}

pub(crate) fn read_head(buf: &[u8], off: usize) -> BlockHead {
  let word = u32::from_le_bytes(buf[off..off + 4].try_into().unwrap());
  BlockHead {
    cnt: (word & ((1 << CNT_BITS) - 1)) as usize,
    tag: ((word >> CNT_BITS) & 0xf) as u8,
    pad: (word >> (CNT_BITS + 4)) as u8,
  }
}

pub(crate) fn write_head(buf: &mut [u8], off: usize, head: BlockHead) {
  assert!(head.cnt <= MAX_BLOCK_CNT);
  assert!(head.tag <= 8 && head.pad < 8);
  let word = head.cnt as u32
    | ((head.tag as u32) << CNT_BITS)
    | ((head.pad as u32) << (CNT_BITS + 4));
  buf[off..off + 4].copy_from_slice(&word.to_le_bytes());
}

/// Records the filler inserted between this block and the next.
pub(crate) fn patch_pad(buf: &mut [u8], off: usize, pad: usize) {
  let mut head = read_head(buf, off);
  head.pad = pad as u8;
  write_head(buf, off, head);
}

#[inline]
pub(crate) fn align_up(off: usize, align: usize) -> usize {
  off + pad_to(off, align)
}

#[inline]
pub(crate) fn pad_to(off: usize, align: usize) -> usize {
  match off % align {
    0 => 0,
    rem => align - rem,
  }
}

/// The alignment a fresh block of this method must be placed at: the
/// alignment of its widest header field, at least 4.
pub(crate) fn method_align<T: Number>(m: Method) -> usize {
  match m {
    Method::Dict | Method::Dict256 => 4,
    _ => T::BYTES.max(4),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::EOL_TAG;

  #[test]
  fn test_head_round_trip() {
    let mut buf = vec![0_u8; 8];
    for (tag, cnt, pad) in [(0_u8, 1_usize, 0_u8), (7, MAX_BLOCK_CNT, 7), (EOL_TAG, 0, 0)] {
      let head = BlockHead { tag, cnt, pad };
      write_head(&mut buf, 4, head);
      assert_eq!(read_head(&buf, 4), head);
    }
  }

  #[test]
  fn test_patch_pad_keeps_tag_and_cnt() {
    let mut buf = vec![0_u8; 4];
    write_head(&mut buf, 0, BlockHead { tag: 5, cnt: 123, pad: 0 });
    patch_pad(&mut buf, 0, 6);
    assert_eq!(
      read_head(&buf, 0),
      BlockHead { tag: 5, cnt: 123, pad: 6 }
    );
  }

  #[test]
  fn test_alignment() {
    assert_eq!(align_up(168, 8), 168);
    assert_eq!(align_up(169, 8), 176);
    assert_eq!(pad_to(6, 4), 2);
    assert_eq!(method_align::<i8>(Method::Rle), 4);
    assert_eq!(method_align::<i64>(Method::Delta), 8);
    assert_eq!(method_align::<i64>(Method::Dict), 4);
  }
}
