//! Compressed scan operators: range select, theta select, projection and
//! nested-loop equi-joins, all executed block by block against the
//! compressed form.

pub(crate) mod candidates;

use crate::column::Column;
use crate::constants::EOL_TAG;
use crate::data_types::{are_equal, Number};
use crate::heap::Mosaic;
use crate::method::Method;
use crate::methods::{self, linear, rle};
use self::candidates::Candidates;

/// Comparison operators for [`Mosaic::theta_select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThetaOp {
  Lt,
  Le,
  Eq,
  Ne,
  Ge,
  Gt,
}

/// A range predicate lowered from `(tl, th, li, hi, anti)` under SQL nil
/// semantics. Nil bounds mark open ends; a fully open inclusive range is the
/// one way to select nils.
///
/// The lowering mirrors the combined behavior of the relational range
/// select: see the truth table in the module tests.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ValueTest<T: Number> {
  Empty,
  OnlyNil,
  AnyNonNil,
  Range {
    tl: Option<T>,
    th: Option<T>,
    li: bool,
    hi: bool,
    negate: bool,
  },
}

impl<T: Number> ValueTest<T> {
  pub fn build(tl: T, th: T, li: bool, hi: bool, anti: bool, has_nil: bool) -> Self {
    let lnil = tl.is_nil();
    let hnil = th.is_nil();
    if lnil && hnil {
      return match (li && hi, anti) {
        (true, false) => {
          if has_nil {
            ValueTest::OnlyNil
          } else {
            ValueTest::Empty
          }
        }
        (true, true) => ValueTest::AnyNonNil,
        (false, false) => ValueTest::AnyNonNil,
        (false, true) => ValueTest::Empty,
      };
    }
    if !lnil && !hnil {
      if tl == th && !(li && hi) {
        return if anti {
          ValueTest::AnyNonNil
        } else {
          ValueTest::Empty
        };
      }
      if tl > th {
        return if anti {
          ValueTest::AnyNonNil
        } else {
          ValueTest::Empty
        };
      }
    }
    ValueTest::Range {
      tl: if lnil { None } else { Some(tl) },
      th: if hnil { None } else { Some(th) },
      li,
      hi,
      negate: anti,
    }
  }

  #[inline]
  pub fn matches(&self, v: T) -> bool {
    match *self {
      ValueTest::Empty => false,
      ValueTest::OnlyNil => v.is_nil(),
      ValueTest::AnyNonNil => !v.is_nil(),
      ValueTest::Range {
        tl,
        th,
        li,
        hi,
        negate,
      } => {
        if v.is_nil() {
          return false;
        }
        let lo_ok = tl.map_or(true, |t| if li { v >= t } else { v > t });
        let hi_ok = th.map_or(true, |t| if hi { v <= t } else { v < t });
        (lo_ok && hi_ok) != negate
      }
    }
  }
}

impl<T: Number> Mosaic<T> {
  /// Range select: the sorted oids of values matching
  /// `(tl, th, li, hi, anti)`, restricted to `cands`. Nil bounds mark open
  /// ends.
  pub fn select(&self, tl: T, th: T, li: bool, hi: bool, anti: bool, cands: &Candidates) -> Vec<u64> {
    let test = ValueTest::build(tl, th, li, hi, anti, self.has_nil);
    let mut out = Vec::new();
    let mut cs = cands.scan(self.base_oid, self.n);
    let mut cur = self.begin();
    loop {
      let head = self.head(&cur);
      if head.tag == EOL_TAG || cs.exhausted() {
        break;
      }
      if head.tag == Method::Rle.tag() {
        rle::select_block(self, &cur, &head, &test, &mut cs, &mut out);
      } else {
        methods::visit_block(self, &cur, &head, &mut cs, &mut |oid, v| {
          if test.matches(v) {
            out.push(oid);
          }
        });
      }
      self.advance(&mut cur);
    }
    out
  }

  /// Theta select: `value op x`, lowered onto [`select`][Self::select]. The
  /// strict comparisons convert to closed bounds through the type's
  /// `checked_prev`/`checked_next`; at a domain edge the result is empty.
  pub fn theta_select(&self, val: T, op: ThetaOp, cands: &Candidates) -> Vec<u64> {
    let nil = T::NIL;
    if val.is_nil() && !matches!(op, ThetaOp::Eq | ThetaOp::Ne) {
      return Vec::new();
    }
    let (tl, th, anti) = match op {
      ThetaOp::Eq => (val, val, false),
      ThetaOp::Ne => (val, val, true),
      ThetaOp::Le => (nil, val, false),
      ThetaOp::Ge => (val, nil, false),
      ThetaOp::Lt => match val.checked_prev() {
        Some(p) => (nil, p, false),
        None => return Vec::new(),
      },
      ThetaOp::Gt => match val.checked_next() {
        Some(n) => (n, nil, false),
        None => return Vec::new(),
      },
    };
    self.select(tl, th, true, true, anti, cands)
  }

  /// Materialises the values at the candidate oids, in oid order.
  pub fn project(&self, cands: &Candidates) -> Vec<T> {
    let mut out = Vec::new();
    let mut cs = cands.scan(self.base_oid, self.n);
    let mut cur = self.begin();
    loop {
      let head = self.head(&cur);
      if head.tag == EOL_TAG || cs.exhausted() {
        break;
      }
      methods::visit_block(self, &cur, &head, &mut cs, &mut |_, v| out.push(v));
      self.advance(&mut cur);
    }
    out
  }

  /// Nested-loop equi-join with the uncompressed side in the outer loop and
  /// this compressed column in the inner loop, where methods may use their
  /// inverse instead of scanning. Returns parallel vectors of
  /// (compressed-side oid, uncompressed-side oid) pairs, ordered by the
  /// outer scan.
  pub fn join(
    &self,
    other: &Column<'_, T>,
    self_cands: &Candidates,
    other_cands: &Candidates,
    nil_matches: bool,
  ) -> (Vec<u64>, Vec<u64>) {
    let mut ros = Vec::new();
    let mut los = Vec::new();
    let has_nil = self.has_nil || other.has_nil();
    let obase = other.base_oid();
    let oend = obase + other.len() as u64;
    let mut ls = other_cands.scan(obase, other.len());
    while let Some(lo) = ls.next_in(obase, oend) {
      let lval = other.values()[(lo - obase) as usize];
      if lval.is_nil() && !nil_matches {
        continue;
      }
      let mut rs = self_cands.scan(self.base_oid, self.n);
      let mut cur = self.begin();
      loop {
        let head = self.head(&cur);
        if head.tag == EOL_TAG || rs.exhausted() {
          break;
        }
        if head.tag == Method::Rle.tag() {
          rle::join_inner(self, &cur, &head, lval, lo, has_nil, &mut rs, &mut ros, &mut los);
        } else if head.tag == Method::Linear.tag() {
          linear::join_inner(self, &cur, &head, lval, lo, &mut rs, &mut ros, &mut los);
        } else {
          methods::visit_block(self, &cur, &head, &mut rs, &mut |ro, rv| {
            if are_equal(lval, rv, has_nil) {
              ros.push(ro);
              los.push(lo);
            }
          });
        }
        self.advance(&mut cur);
      }
    }
    (ros, los)
  }

  /// Nested-loop equi-join with this compressed column in the outer loop and
  /// the uncompressed side scanned per element (COUI). Returns parallel
  /// vectors of (compressed-side oid, uncompressed-side oid) pairs, ordered
  /// by the compressed scan.
  pub fn join_coui(
    &self,
    other: &Column<'_, T>,
    self_cands: &Candidates,
    other_cands: &Candidates,
    nil_matches: bool,
  ) -> (Vec<u64>, Vec<u64>) {
    let mut los = Vec::new();
    let mut ros = Vec::new();
    let has_nil = self.has_nil || other.has_nil();
    let obase = other.base_oid();
    let oend = obase + other.len() as u64;
    let mut cs = self_cands.scan(self.base_oid, self.n);
    let mut cur = self.begin();
    loop {
      let head = self.head(&cur);
      if head.tag == EOL_TAG || cs.exhausted() {
        break;
      }
      methods::visit_block(self, &cur, &head, &mut cs, &mut |lo, lval| {
        if lval.is_nil() && !nil_matches {
          return;
        }
        let mut rs = other_cands.scan(obase, other.len());
        while let Some(ro) = rs.next_in(obase, oend) {
          if are_equal(lval, other.values()[(ro - obase) as usize], has_nil) {
            los.push(lo);
            ros.push(ro);
          }
        }
      });
      self.advance(&mut cur);
    }
    (los, ros)
  }
}
