//! The two-pass planner.
//!
//! Pass 0 pre-computes the global dictionary state the dictionary methods
//! need. Pass A walks the column once, probing every enabled method at the
//! current position, scoring the probes by normalised incremental cost and
//! appending the winner to the strategy list. Pass B allocates the heap at
//! exactly the size the finished strategy list implies and emits the blocks.

use crate::block::{self, BlockHead, BLOCK_HDR_BYTES};
use crate::column::Column;
use crate::constants::{
  Bitlen, EOL_TAG, MAX_BLOCK_CNT, MAX_DICT256, MAX_FRAME_DICT, NORMALIZED_CNT_SEED,
};
use crate::data_types::Number;
use crate::dictionary::{self, DictBuilder};
use crate::errors::{MosaicError, MosaicResult};
use crate::header::{MosaicHeader, HEADER_BYTES};
use crate::heap::Mosaic;
use crate::method::{Method, MethodSet};
use crate::methods::{self, delta, dict, frame, linear, prefix, raw, rle, Probe};

/// One strategy-list record: which method encodes the next `cnt` elements.
/// `width` carries DELTA's delta width or PREFIX's suffix width so Pass B
/// does not have to re-derive it.
#[derive(Clone, Copy, Debug)]
struct StrategyRec {
  method: Method,
  cnt: usize,
  width: Bitlen,
}

fn can_merge<T: Number>(prev: Option<&StrategyRec>, probe: &Probe<T>) -> bool {
  match prev {
    Some(rec) if rec.method == probe.method && rec.cnt + probe.cnt <= MAX_BLOCK_CNT => {
      matches!(
        probe.method,
        Method::Raw | Method::Dict | Method::Dict256
      )
    }
    _ => false,
  }
}

/// Incremental bytes of growing the previous record instead of opening a
/// fresh block.
fn merge_growth<T: Number>(probe: &Probe<T>) -> u64 {
  match probe.method {
    Method::Raw => (probe.cnt * T::BYTES) as u64,
    _ => (probe.mosaic_bytes - BLOCK_HDR_BYTES + probe.dict_bytes) as u64,
  }
}

/// Compresses a column under the given method set, producing an immutable
/// compressed heap.
///
/// Errors: `CannotCompress` if no enabled method applies to the column type
/// (or, with RAW disabled, at some position); `NoReduction` if the planned
/// block stream plus dictionaries would not be smaller than the column, in
/// which case the caller keeps the column as-is.
pub fn compress<T: Number>(col: &Column<'_, T>, methods: MethodSet) -> MosaicResult<Mosaic<T>> {
  if methods.is_empty() {
    return Err(MosaicError::invalid_argument("the method set is empty"));
  }
  let enabled = methods.applicable_to::<T>();
  if enabled.is_empty() {
    return Err(MosaicError::cannot_compress(
      "no enabled compression method applies to the column type",
    ));
  }
  let vals = col.values();
  let has_nil = col.has_nil();

  // Pass 0: dictionary pre-computation
  let mut dict_builder = if enabled.contains(Method::Dict) {
    Some(DictBuilder::<T>::unbounded())
  } else {
    None
  };
  let mut dict256_builder = if enabled.contains(Method::Dict256) {
    Some(DictBuilder::capped(
      MAX_DICT256,
      Some(dictionary::top_frequent(vals, MAX_DICT256)),
    ))
  } else {
    None
  };
  let mut frame_builder = if enabled.contains(Method::Frame) {
    Some(DictBuilder::<T>::capped(MAX_FRAME_DICT, None))
  } else {
    None
  };

  // Pass A: estimation
  let mut recs: Vec<StrategyRec> = Vec::new();
  let mut start = 0;
  let mut max_cnt: u64 = 0;
  let mut cost_bytes: u64 = 0;
  while start < vals.len() {
    let rem = &vals[start..];
    let norm_cnt = if max_cnt == 0 {
      NORMALIZED_CNT_SEED
    } else {
      max_cnt
    };

    let mut best: Option<(u64, Probe<T>, u64, bool)> = None;
    let mut step_max = 0;
    for m in enabled.iter() {
      let probe = match m {
        Method::Raw => Some(raw::probe::<T>()),
        Method::Rle => Some(rle::probe(rem, has_nil)),
        Method::Dict256 => dict::probe(m, dict256_builder.as_ref().unwrap(), rem),
        Method::Dict => dict::probe(m, dict_builder.as_ref().unwrap(), rem),
        Method::Delta => delta::probe(rem),
        Method::Linear => linear::probe(rem),
        Method::Frame => frame::probe(frame_builder.as_ref().unwrap(), rem),
        Method::Prefix => prefix::probe(rem),
      };
      let Some(probe) = probe else { continue };
      step_max = step_max.max(probe.cnt as u64);

      let merge = can_merge(recs.last(), &probe);
      let inc = if merge {
        merge_growth::<T>(&probe)
      } else {
        (probe.mosaic_bytes + probe.dict_bytes) as u64
      };
      // compression must strictly improve over storing the run raw
      if probe.method != Method::Raw && inc >= (probe.cnt * T::BYTES) as u64 {
        continue;
      }
      let score = inc * norm_cnt / probe.cnt as u64;
      let better = match &best {
        None => true,
        Some((best_score, best_probe, ..)) => {
          score < *best_score || (score == *best_score && probe.cnt > best_probe.cnt)
        }
      };
      if better {
        best = Some((score, probe, inc, merge));
      }
    }

    let Some((_, probe, inc, merge)) = best else {
      return Err(MosaicError::cannot_compress(format!(
        "no enabled method is applicable at position {}",
        start
      )));
    };

    // post-estimate: commit pending dictionary entries of the winner
    match probe.method {
      Method::Dict => dict_builder.as_mut().unwrap().commit(probe.dict_delta),
      Method::Dict256 => dict256_builder.as_mut().unwrap().commit(probe.dict_delta),
      Method::Frame => frame_builder.as_mut().unwrap().commit(probe.dict_delta),
      _ => {}
    }

    if merge {
      recs.last_mut().unwrap().cnt += probe.cnt;
    } else {
      recs.push(StrategyRec {
        method: probe.method,
        cnt: probe.cnt,
        width: probe.width,
      });
    }
    cost_bytes += inc;
    max_cnt = max_cnt.max(step_max);
    start += probe.cnt;
  }

  // finalize dictionaries into the vmosaic heap
  let mut hdr = MosaicHeader::new(enabled);
  let mut dicts: Vec<T> = Vec::new();
  if let Some(b) = &dict256_builder {
    hdr.pos_dict256 = dicts.len() as u32;
    hdr.length_dict256 = b.len() as u32;
    hdr.bits_dict256 = if b.len() > 0 { b.bits() as u8 } else { 0 };
    dicts.extend_from_slice(b.entries());
  }
  if let Some(b) = &dict_builder {
    hdr.pos_dict = dicts.len() as u32;
    hdr.length_dict = b.len() as u32;
    hdr.bits_dict = if b.len() > 0 { b.bits() as u8 } else { 0 };
    dicts.extend_from_slice(b.entries());
  }
  if let Some(b) = &frame_builder {
    hdr.pos_frame = dicts.len() as u32;
    hdr.length_frame = b.len() as u32;
    hdr.bits_frame = if b.len() > 0 { b.bits() as u8 } else { 0 };
    dicts.extend_from_slice(b.entries());
  }

  let uncompressed = (vals.len() * T::BYTES) as u64;
  if cost_bytes > uncompressed {
    return Err(MosaicError::no_reduction(format!(
      "estimated {} block stream bytes for {} uncompressed",
      cost_bytes, uncompressed
    )));
  }

  // exact heap size implied by the strategy list and the final key widths
  let mut total = HEADER_BYTES;
  for rec in &recs {
    let off = block::align_up(total, block::method_align::<T>(rec.method));
    total = off + methods::block_bytes::<T>(rec.method, rec.cnt, rec.width, &hdr);
  }
  let eol_off = block::align_up(total, 4);
  total = eol_off + BLOCK_HDR_BYTES;

  // Pass B: compression into the exactly-sized heap
  let mut buf = vec![0_u8; total];
  let mut cursor = HEADER_BYTES;
  let mut prev_head: Option<usize> = None;
  let mut start = 0;
  for rec in &recs {
    let off = block::align_up(cursor, block::method_align::<T>(rec.method));
    if let Some(prev) = prev_head {
      block::patch_pad(&mut buf, prev, off - cursor);
    }
    block::write_head(
      &mut buf,
      off,
      BlockHead {
        tag: rec.method.tag(),
        cnt: rec.cnt,
        pad: 0,
      },
    );
    let run = &vals[start..start + rec.cnt];
    match rec.method {
      Method::Raw => raw::compress(&mut buf, off, run),
      Method::Rle => rle::compress(&mut buf, off, run),
      Method::Delta => delta::compress(&mut buf, off, run, rec.width),
      Method::Linear => linear::compress(&mut buf, off, run),
      Method::Prefix => prefix::compress(&mut buf, off, run, rec.width),
      Method::Frame => {
        let pos = hdr.pos_frame as usize;
        let frame_dict = &dicts[pos..pos + hdr.length_frame as usize];
        frame::compress(&mut buf, off, run, frame_dict, hdr.bits_frame as Bitlen);
      }
      Method::Dict => {
        let pos = hdr.pos_dict as usize;
        let d = &dicts[pos..pos + hdr.length_dict as usize];
        dict::compress(&mut buf, off, run, d, hdr.bits_dict as Bitlen);
      }
      Method::Dict256 => {
        let pos = hdr.pos_dict256 as usize;
        let d = &dicts[pos..pos + hdr.length_dict256 as usize];
        dict::compress(&mut buf, off, run, d, hdr.bits_dict256 as Bitlen);
      }
    }
    hdr.update(rec.method, rec.cnt);
    start += rec.cnt;
    cursor = off + methods::block_bytes::<T>(rec.method, rec.cnt, rec.width, &hdr);
    prev_head = Some(off);
  }

  let eol = block::align_up(cursor, 4);
  if let Some(prev) = prev_head {
    block::patch_pad(&mut buf, prev, eol - cursor);
  }
  block::write_head(
    &mut buf,
    eol,
    BlockHead {
      tag: EOL_TAG,
      cnt: 0,
      pad: 0,
    },
  );
  debug_assert_eq!(eol + BLOCK_HDR_BYTES, buf.len());

  hdr.ratio = uncompressed as f32 / (buf.len() + dicts.len() * T::BYTES) as f32;
  hdr.write_to(&mut buf[..HEADER_BYTES]);

  Ok(Mosaic {
    buf,
    dicts,
    hdr,
    n: vals.len(),
    base_oid: col.base_oid(),
    has_nil,
  })
}
