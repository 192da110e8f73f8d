//! One codec per compression method.
//!
//! Every codec provides a Pass-A probe (how far can a block extend, and at
//! what cost), a Pass-B body writer, a stored-size formula shared by the
//! writer and the reader's `advance`, and a candidate-driven visitor that
//! reconstructs values on the fly for the scan operators.

pub(crate) mod delta;
pub(crate) mod dict;
pub(crate) mod frame;
pub(crate) mod linear;
pub(crate) mod prefix;
pub(crate) mod raw;
pub(crate) mod rle;

use crate::block::{BlockHead, BLOCK_HDR_BYTES};
use crate::constants::Bitlen;
use crate::data_types::Number;
use crate::header::MosaicHeader;
use crate::heap::{Cursor, Mosaic};
use crate::method::Method;
use crate::scan::candidates::CandScan;

/// One method's Pass-A claim on a prefix of the remaining column.
#[derive(Clone, Debug)]
pub(crate) struct Probe<T: Number> {
  pub method: Method,
  pub cnt: usize,
  /// DELTA's delta width or PREFIX's suffix width; 0 for the others.
  pub width: Bitlen,
  /// Header plus body bytes of a fresh block of `cnt` elements.
  pub mosaic_bytes: usize,
  /// Incremental vmosaic bytes (new dictionary entries).
  pub dict_bytes: usize,
  /// Pending dictionary entries to commit if this probe wins.
  pub dict_delta: Vec<T>,
}

/// Stored bytes of a block (common header plus body, excluding inter-block
/// padding) as a function of the strategy record and the finalized
/// dictionary key widths.
pub(crate) fn block_bytes<T: Number>(
  method: Method,
  cnt: usize,
  width: Bitlen,
  hdr: &MosaicHeader,
) -> usize {
  match method {
    Method::Raw => raw::block_bytes::<T>(cnt),
    Method::Rle => rle::block_bytes::<T>(),
    Method::Delta => delta::layout::<T>(cnt, width).total,
    Method::Linear => linear::layout::<T>().total,
    Method::Frame => frame::layout::<T>(cnt, hdr.bits_frame as Bitlen).total,
    Method::Prefix => prefix::layout::<T>(cnt, width).total,
    Method::Dict => dict::layout(cnt, hdr.bits_dict as Bitlen).total,
    Method::Dict256 => dict::layout(cnt, hdr.bits_dict256 as Bitlen).total,
  }
}

/// Stored bytes of a block already in the heap, reading the in-block width
/// fields where the method has them.
pub(crate) fn block_stored_bytes<T: Number>(
  buf: &[u8],
  hdr: &MosaicHeader,
  off: usize,
  head: &BlockHead,
) -> usize {
  let method = Method::from_tag(head.tag).expect("block tag out of range");
  let width = match method {
    Method::Delta | Method::Prefix => buf[off + BLOCK_HDR_BYTES] as Bitlen,
    _ => 0,
  };
  block_bytes::<T>(method, head.cnt, width, hdr)
}

/// Feeds `(oid, value)` for every surviving candidate inside the block to
/// `f`, reconstructing values without materialising the block.
pub(crate) fn visit_block<T: Number, F: FnMut(u64, T)>(
  moz: &Mosaic<T>,
  cur: &Cursor,
  head: &BlockHead,
  cs: &mut CandScan,
  f: &mut F,
) {
  let first = moz.base_oid + cur.start as u64;
  let last = first + head.cnt as u64;
  match Method::from_tag(head.tag).expect("block tag out of range") {
    Method::Raw => raw::visit(moz, cur.off, first, last, cs, f),
    Method::Rle => rle::visit(moz, cur.off, first, last, cs, f),
    Method::Delta => delta::visit(moz, cur.off, first, last, cs, f),
    Method::Linear => linear::visit(moz, cur.off, first, last, cs, f),
    Method::Frame => frame::visit(moz, cur.off, first, last, cs, f),
    Method::Prefix => prefix::visit(moz, cur.off, first, last, cs, f),
    Method::Dict => dict::visit(
      moz,
      cur.off,
      moz.dict(),
      moz.hdr.bits_dict as Bitlen,
      first,
      last,
      cs,
      f,
    ),
    Method::Dict256 => dict::visit(
      moz,
      cur.off,
      moz.dict256(),
      moz.hdr.bits_dict256 as Bitlen,
      first,
      last,
      cs,
      f,
    ),
  }
}
