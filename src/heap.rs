//! The compressed heap: a mosaic byte buffer holding the header and block
//! stream, and a typed vmosaic buffer holding the side dictionaries.

use crate::block::{self, BlockHead, BLOCK_HDR_BYTES};
use crate::constants::{EOL_TAG, N_METHODS};
use crate::data_types::Number;
use crate::errors::{MosaicError, MosaicResult};
use crate::header::{MosaicHeader, HEADER_BYTES};
use crate::method::Method;
use crate::methods;
use crate::scan::candidates::CandScan;

/// A compressed column: immutable once built, scannable without
/// decompression.
#[derive(Clone, Debug)]
pub struct Mosaic<T: Number> {
  pub(crate) buf: Vec<u8>,
  pub(crate) dicts: Vec<T>,
  pub(crate) hdr: MosaicHeader,
  pub(crate) n: usize,
  pub(crate) base_oid: u64,
  pub(crate) has_nil: bool,
}

/// A position in the block stream: the byte offset of the current block and
/// the count of elements covered by all blocks before it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor {
  pub off: usize,
  pub start: usize,
}

/// One row of [`Mosaic::layout`]: how a block encodes its slice of the
/// column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
  pub method: Method,
  pub cnt: usize,
  pub input_bytes: usize,
  pub output_bytes: usize,
}

impl<T: Number> Mosaic<T> {
  /// Number of elements in the column.
  pub fn n(&self) -> usize {
    self.n
  }

  pub fn base_oid(&self) -> u64 {
    self.base_oid
  }

  pub fn has_nil(&self) -> bool {
    self.has_nil
  }

  pub fn header(&self) -> &MosaicHeader {
    &self.hdr
  }

  /// Uncompressed over compressed bytes, as recorded at compression time.
  pub fn ratio(&self) -> f32 {
    self.hdr.ratio
  }

  /// Bytes of the mosaic heap (header, blocks, EOL marker).
  pub fn heap_bytes(&self) -> usize {
    self.buf.len()
  }

  /// Bytes of the vmosaic heap (side dictionaries).
  pub fn dict_bytes(&self) -> usize {
    self.dicts.len() * T::BYTES
  }

  /// Blocks emitted per method; −1 for methods that were not candidates.
  pub fn blocks_per_method(&self) -> [i64; N_METHODS] {
    self.hdr.blks
  }

  /// Elements encoded per method; −1 for methods that were not candidates.
  pub fn elements_per_method(&self) -> [i64; N_METHODS] {
    self.hdr.elms
  }

  pub(crate) fn begin(&self) -> Cursor {
    Cursor {
      off: HEADER_BYTES,
      start: 0,
    }
  }

  pub(crate) fn head(&self, cur: &Cursor) -> BlockHead {
    block::read_head(&self.buf, cur.off)
  }

  /// Moves the cursor to the next block, using only the common header and
  /// the method's stored-size formula.
  pub(crate) fn advance(&self, cur: &mut Cursor) {
    let head = self.head(cur);
    assert!(
      head.tag != EOL_TAG && head.cnt >= 1,
      "advance past a live block"
    );
    let stored = methods::block_stored_bytes::<T>(&self.buf, &self.hdr, cur.off, &head);
    cur.start += head.cnt;
    cur.off += stored + head.pad as usize;
  }

  pub(crate) fn dict(&self) -> &[T] {
    let pos = self.hdr.pos_dict as usize;
    &self.dicts[pos..pos + self.hdr.length_dict as usize]
  }

  pub(crate) fn dict256(&self) -> &[T] {
    let pos = self.hdr.pos_dict256 as usize;
    &self.dicts[pos..pos + self.hdr.length_dict256 as usize]
  }

  pub(crate) fn frame_dict(&self) -> &[T] {
    let pos = self.hdr.pos_frame as usize;
    &self.dicts[pos..pos + self.hdr.length_frame as usize]
  }

  /// Reconstructs the full column. The compressed heap is unaffected.
  pub fn decompress(&self) -> Vec<T> {
    let mut out = Vec::with_capacity(self.n);
    let mut cur = self.begin();
    loop {
      let head = self.head(&cur);
      if head.tag == EOL_TAG {
        break;
      }
      let first = self.base_oid + cur.start as u64;
      let mut cs = CandScan::dense(first, first + head.cnt as u64);
      methods::visit_block(self, &cur, &head, &mut cs, &mut |_, v| out.push(v));
      self.advance(&mut cur);
    }
    assert_eq!(out.len(), self.n, "block stream covers the column");
    out
  }

  /// Per-block storage report, in stream order.
  pub fn layout(&self) -> Vec<BlockInfo> {
    let mut infos = Vec::with_capacity(self.hdr.nblocks as usize);
    let mut cur = self.begin();
    loop {
      let head = self.head(&cur);
      if head.tag == EOL_TAG {
        break;
      }
      let stored = methods::block_stored_bytes::<T>(&self.buf, &self.hdr, cur.off, &head);
      infos.push(BlockInfo {
        method: Method::from_tag(head.tag).expect("block tag out of range"),
        cnt: head.cnt,
        input_bytes: head.cnt * T::BYTES,
        output_bytes: stored + head.pad as usize,
      });
      self.advance(&mut cur);
    }
    infos
  }

  /// Reconstructs a `Mosaic` from its two heaps, validating the header and
  /// traversing the block stream. This is the reader contract: the heaps and
  /// the column type are all a reader needs.
  pub fn from_parts(
    buf: Vec<u8>,
    dicts: Vec<T>,
    base_oid: u64,
    has_nil: bool,
  ) -> MosaicResult<Self> {
    let hdr = MosaicHeader::read_from(&buf)?;
    let dict_end = hdr.pos_dict as usize + hdr.length_dict as usize;
    let dict256_end = hdr.pos_dict256 as usize + hdr.length_dict256 as usize;
    let frame_end = hdr.pos_frame as usize + hdr.length_frame as usize;
    if dict_end.max(dict256_end).max(frame_end) > dicts.len() {
      return Err(MosaicError::corruption(
        "dictionary descriptors reach past the vmosaic heap",
      ));
    }

    let mut n = 0;
    let mut nblocks = 0_u32;
    let mut off = HEADER_BYTES;
    loop {
      if off + BLOCK_HDR_BYTES > buf.len() {
        return Err(MosaicError::corruption("unterminated block stream"));
      }
      let head = block::read_head(&buf, off);
      if head.tag == EOL_TAG {
        if head.cnt != 0 {
          return Err(MosaicError::corruption("EOL marker with elements"));
        }
        break;
      }
      if Method::from_tag(head.tag).is_none() {
        return Err(MosaicError::corruption("block tag out of range"));
      }
      if head.cnt == 0 {
        return Err(MosaicError::corruption("empty non-EOL block"));
      }
      if off + BLOCK_HDR_BYTES + 1 > buf.len() {
        return Err(MosaicError::corruption("block body past end of heap"));
      }
      let stored = methods::block_stored_bytes::<T>(&buf, &hdr, off, &head);
      if off + stored > buf.len() {
        return Err(MosaicError::corruption("block body past end of heap"));
      }
      n += head.cnt;
      nblocks += 1;
      off += stored + head.pad as usize;
    }
    if nblocks != hdr.nblocks {
      return Err(MosaicError::corruption(
        "header block count disagrees with the stream",
      ));
    }
    Ok(Mosaic {
      buf,
      dicts,
      hdr,
      n,
      base_oid,
      has_nil,
    })
  }

  /// Splits the mosaic into its raw heaps, the inverse of
  /// [`from_parts`][Self::from_parts].
  pub fn into_parts(self) -> (Vec<u8>, Vec<T>) {
    (self.buf, self.dicts)
  }
}
