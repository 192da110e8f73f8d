//! The per-column compressed-heap header.

use crate::constants::{MOSAIC_VERSION, METHOD_NOT_AVAILABLE, N_METHODS};
use crate::errors::{MosaicError, MosaicResult};
use crate::method::{Method, MethodSet};

/// Fixed-size header at the start of every mosaic heap: version, per-method
/// statistics, and the positions of the side dictionaries in the vmosaic
/// heap. Serialized packed little-endian, padded to an 8-byte boundary so
/// the first block is aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct MosaicHeader {
  pub version: u32,
  /// Block count, excluding the EOL marker.
  pub nblocks: u32,
  /// Uncompressed over compressed bytes; diagnostic only.
  pub ratio: f32,
  /// Blocks per method; −1 marks a method that was not a candidate.
  pub blks: [i64; N_METHODS],
  /// Elements per method; −1 marks a method that was not a candidate.
  pub elms: [i64; N_METHODS],
  pub bits_dict: u8,
  pub pos_dict: u32,
  pub length_dict: u32,
  pub bits_dict256: u8,
  pub pos_dict256: u32,
  pub length_dict256: u32,
  pub bits_frame: u8,
  pub pos_frame: u32,
  pub length_frame: u32,
}

// 12 bytes of scalars, two 64-byte counter arrays, three 9-byte dictionary
// descriptors, then padding to 8.
pub(crate) const HEADER_BYTES: usize = 168;

impl MosaicHeader {
  pub(crate) fn new(enabled: MethodSet) -> Self {
    let mut hdr = MosaicHeader {
      version: MOSAIC_VERSION,
      nblocks: 0,
      ratio: 0.0,
      blks: [METHOD_NOT_AVAILABLE; N_METHODS],
      elms: [METHOD_NOT_AVAILABLE; N_METHODS],
      bits_dict: 0,
      pos_dict: 0,
      length_dict: 0,
      bits_dict256: 0,
      pos_dict256: 0,
      length_dict256: 0,
      bits_frame: 0,
      pos_frame: 0,
      length_frame: 0,
    };
    for m in enabled.iter() {
      hdr.blks[m.tag() as usize] = 0;
      hdr.elms[m.tag() as usize] = 0;
    }
    hdr
  }

  /// Folds one emitted block into the per-method statistics.
  pub(crate) fn update(&mut self, method: Method, cnt: usize) {
    self.nblocks += 1;
    self.blks[method.tag() as usize] += 1;
    self.elms[method.tag() as usize] += cnt as i64;
  }

  pub(crate) fn write_to(&self, buf: &mut [u8]) {
    debug_assert!(buf.len() >= HEADER_BYTES);
    buf[0..4].copy_from_slice(&self.version.to_le_bytes());
    buf[4..8].copy_from_slice(&self.nblocks.to_le_bytes());
    buf[8..12].copy_from_slice(&self.ratio.to_le_bytes());
    let mut off = 12;
    for v in self.blks.iter().chain(self.elms.iter()) {
      buf[off..off + 8].copy_from_slice(&v.to_le_bytes());
      off += 8;
    }
    for (bits, pos, length) in [
      (self.bits_dict, self.pos_dict, self.length_dict),
      (self.bits_dict256, self.pos_dict256, self.length_dict256),
      (self.bits_frame, self.pos_frame, self.length_frame),
    ] {
      buf[off] = bits;
      buf[off + 1..off + 5].copy_from_slice(&pos.to_le_bytes());
      buf[off + 5..off + 9].copy_from_slice(&length.to_le_bytes());
      off += 9;
    }
    debug_assert!(off <= HEADER_BYTES);
  }

  pub(crate) fn read_from(buf: &[u8]) -> MosaicResult<Self> {
    if buf.len() < HEADER_BYTES {
      return Err(MosaicError::corruption(
        "heap shorter than the mosaic header",
      ));
    }
    let u32_at = |off: usize| u32::from_le_bytes(buf[off..off + 4].try_into().unwrap());
    let version = u32_at(0);
    if version != MOSAIC_VERSION {
      return Err(MosaicError::corruption(format!(
        "unsupported mosaic version {}",
        version
      )));
    }
    let mut blks = [0_i64; N_METHODS];
    let mut elms = [0_i64; N_METHODS];
    let mut off = 12;
    for v in blks.iter_mut().chain(elms.iter_mut()) {
      *v = i64::from_le_bytes(buf[off..off + 8].try_into().unwrap());
      off += 8;
    }
    let mut dicts = [(0_u8, 0_u32, 0_u32); 3];
    for d in dicts.iter_mut() {
      *d = (buf[off], u32_at(off + 1), u32_at(off + 5));
      off += 9;
    }
    Ok(MosaicHeader {
      version,
      nblocks: u32_at(4),
      ratio: f32::from_le_bytes(buf[8..12].try_into().unwrap()),
      blks,
      elms,
      bits_dict: dicts[0].0,
      pos_dict: dicts[0].1,
      length_dict: dicts[0].2,
      bits_dict256: dicts[1].0,
      pos_dict256: dicts[1].1,
      length_dict256: dicts[1].2,
      bits_frame: dicts[2].0,
      pos_frame: dicts[2].1,
      length_frame: dicts[2].2,
    })
  }
}
