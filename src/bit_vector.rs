//! Packed code vectors of uniform bit width.
//!
//! A code vector is a sequence of unsigned values of a single width
//! `w ∈ 1..=32`, packed little-endian into 32-bit cells. The width and the
//! element count are kept out of band (in block headers); the vector itself
//! is just bytes inside the mosaic heap.

use crate::bits;
use crate::constants::Bitlen;

const CELL_BITS: Bitlen = 32;

/// Byte size of a code vector of `n` entries of width `w`, padded up to a
/// whole number of 32-bit cells.
pub fn size_bytes(n: usize, w: Bitlen) -> usize {
  bits::ceil_div(n * w as usize, 8).div_ceil(4) * 4
}

#[inline]
fn cell(buf: &[u8], i: usize) -> u32 {
  u32::from_le_bytes(buf[4 * i..4 * i + 4].try_into().unwrap())
}

#[inline]
fn set_cell(buf: &mut [u8], i: usize, v: u32) {
  buf[4 * i..4 * i + 4].copy_from_slice(&v.to_le_bytes());
}

/// Returns the `i`-th packed value, zero-extended.
pub fn get(buf: &[u8], i: usize, w: Bitlen) -> u32 {
  let bit = i * w as usize;
  let cid = bit / CELL_BITS as usize;
  let shift = (bit % CELL_BITS as usize) as Bitlen;
  if shift + w <= CELL_BITS {
    // fits in a single cell
    (cell(buf, cid) >> shift) & bits::mask_u32(w)
  } else {
    // spread over two cells
    let m1 = CELL_BITS - shift;
    ((cell(buf, cid) >> shift) & bits::mask_u32(m1))
      | ((cell(buf, cid + 1) & bits::mask_u32(w - m1)) << m1)
  }
}

/// Writes the low `w` bits of `v` into the `i`-th slot. Slots straddling two
/// cells read-modify-write both.
pub fn set(buf: &mut [u8], i: usize, w: Bitlen, v: u32) {
  let bit = i * w as usize;
  let cid = bit / CELL_BITS as usize;
  let shift = (bit % CELL_BITS as usize) as Bitlen;
  if shift + w <= CELL_BITS {
    let c = cell(buf, cid);
    set_cell(
      buf,
      cid,
      (c & !(bits::mask_u32(w) << shift)) | ((v & bits::mask_u32(w)) << shift),
    );
  } else {
    let m1 = CELL_BITS - shift;
    let c0 = cell(buf, cid);
    set_cell(
      buf,
      cid,
      (c0 & !(bits::mask_u32(m1) << shift)) | ((v & bits::mask_u32(m1)) << shift),
    );
    let m2 = w - m1;
    let c1 = cell(buf, cid + 1);
    set_cell(
      buf,
      cid + 1,
      (c1 & !bits::mask_u32(m2)) | ((v >> m1) & bits::mask_u32(m2)),
    );
  }
}
