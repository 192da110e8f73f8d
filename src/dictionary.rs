//! The shared sorted-dictionary machinery behind DICT, DICT256 and FRAME.
//!
//! During Pass A a builder accumulates a committed sorted dictionary plus a
//! per-block pending buffer; the block estimate only sees values that are
//! committed, pending, or admissible, and the pending buffer is merged in
//! once the block is actually chosen.

use crate::bits;
use crate::constants::Bitlen;
use crate::data_types::Number;

/// Binary search under the nil-first total order.
pub(crate) fn search<T: Number>(dict: &[T], v: T) -> Result<usize, usize> {
  dict.binary_search_by(|probe| probe.cmp_nil_first(&v))
}

#[derive(Clone, Debug)]
pub(crate) struct BlockProbe<T: Number> {
  /// How many leading values the dictionary can cover.
  pub cnt: usize,
  /// Key width if the pending entries were merged.
  pub bits_extended: Bitlen,
  /// New entries this block would contribute, sorted.
  pub delta: Vec<T>,
}

#[derive(Clone, Debug)]
pub(crate) struct DictBuilder<T: Number> {
  sorted: Vec<T>,
  cap: Option<usize>,
  /// When set, only members may ever be inserted (the DICT256 top set).
  admit: Option<Vec<T>>,
}

impl<T: Number> DictBuilder<T> {
  pub fn unbounded() -> Self {
    DictBuilder {
      sorted: Vec::new(),
      cap: None,
      admit: None,
    }
  }

  pub fn capped(cap: usize, admit: Option<Vec<T>>) -> Self {
    DictBuilder {
      sorted: Vec::new(),
      cap: Some(cap),
      admit,
    }
  }

  pub fn len(&self) -> usize {
    self.sorted.len()
  }

  pub fn entries(&self) -> &[T] {
    &self.sorted
  }

  pub fn bits(&self) -> Bitlen {
    bits::bits_to_index(self.sorted.len())
  }

  fn admits(&self, v: T) -> bool {
    match &self.admit {
      Some(top) => search(top, v).is_ok(),
      None => true,
    }
  }

  /// Probes how far a block starting at the iterator's first value could
  /// extend. Does not mutate the builder; the returned delta must be passed
  /// to [`commit`][Self::commit] if the block is chosen.
  pub fn probe_values<I: Iterator<Item = T>>(&self, values: I, max_cnt: usize) -> BlockProbe<T> {
    let mut delta: Vec<T> = Vec::new();
    let mut cnt = 0;
    for v in values.take(max_cnt) {
      if search(&self.sorted, v).is_ok() {
        cnt += 1;
        continue;
      }
      match search(&delta, v) {
        Ok(_) => {
          cnt += 1;
          continue;
        }
        Err(pos) => {
          let full = self
            .cap
            .map_or(false, |c| self.sorted.len() + delta.len() >= c);
          if full || !self.admits(v) {
            break;
          }
          delta.insert(pos, v);
          cnt += 1;
        }
      }
    }
    BlockProbe {
      cnt,
      bits_extended: bits::bits_to_index(self.sorted.len() + delta.len()),
      delta,
    }
  }

  /// Merges a probe's pending entries into the committed dictionary.
  pub fn commit(&mut self, delta: Vec<T>) {
    if delta.is_empty() {
      return;
    }
    let mut merged = Vec::with_capacity(self.sorted.len() + delta.len());
    let mut di = delta.into_iter().peekable();
    for &v in &self.sorted {
      while let Some(d) = di.peek() {
        if d.cmp_nil_first(&v).is_lt() {
          merged.push(*d);
          di.next();
        } else {
          break;
        }
      }
      merged.push(v);
    }
    merged.extend(di);
    self.sorted = merged;
  }
}

/// The `cap` most frequent distinct values, sorted nil-first. Frequency ties
/// break toward the smaller value.
pub(crate) fn top_frequent<T: Number>(values: &[T], cap: usize) -> Vec<T> {
  let mut sorted = values.to_vec();
  sorted.sort_by(|a, b| a.cmp_nil_first(b));

  let mut groups: Vec<(usize, T)> = Vec::new();
  for &v in &sorted {
    match groups.last_mut() {
      Some((n, w)) if w.cmp_nil_first(&v).is_eq() => *n += 1,
      _ => groups.push((1, v)),
    }
  }

  groups.sort_by(|a, b| b.0.cmp(&a.0));
  groups.truncate(cap);
  let mut top: Vec<T> = groups.into_iter().map(|(_, v)| v).collect();
  top.sort_by(|a, b| a.cmp_nil_first(b));
  top
}
