use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoroshiro128PlusPlus;

use crate::data_types::Number;
use crate::scan::ValueTest;
use crate::tests::utils::{compress_col, mixed_i32};
use crate::{compress, Candidates, Column, Method, MethodSet, Mosaic, ThetaOp};

fn reference_select<T: Number>(
  vals: &[T],
  base_oid: u64,
  test: &ValueTest<T>,
  cands: &Candidates,
) -> Vec<u64> {
  vals
    .iter()
    .enumerate()
    .filter_map(|(i, &v)| {
      let oid = base_oid + i as u64;
      let in_cands = match cands {
        Candidates::All => true,
        Candidates::Range(r) => r.contains(&oid),
        Candidates::List(l) => l.binary_search(&oid).is_ok(),
      };
      (in_cands && test.matches(v)).then_some(oid)
    })
    .collect()
}

fn candidate_variants(n: usize, seed: u64) -> Vec<Candidates> {
  let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
  let sparse: Vec<u64> = (0..n as u64).filter(|_| rng.gen_bool(0.13)).collect();
  vec![
    Candidates::All,
    Candidates::Range(n as u64 / 10..n as u64 / 2),
    Candidates::List(sparse),
  ]
}

fn assert_select_equivalence(moz: &Mosaic<i32>, vals: &[i32]) {
  let nil = i32::NIL;
  let predicates: Vec<(i32, i32, bool, bool, bool)> = vec![
    (7, 7, true, true, false),
    (7, 7, true, true, true),
    (0, 15, true, true, false),
    (0, 15, false, false, false),
    (0, 15, true, false, true),
    (nil, 10_050, true, true, false),
    (10_050, nil, true, false, false),
    (nil, nil, true, true, false),
    (nil, nil, true, true, true),
    (nil, nil, false, true, false),
    (nil, nil, false, true, true),
    (100, 0, true, true, false),
    (100, 0, true, true, true),
    (0x7f00_0000, 0x7f00_00ff, true, true, false),
  ];
  for cands in candidate_variants(vals.len(), 7) {
    for &(tl, th, li, hi, anti) in &predicates {
      let got = moz.select(tl, th, li, hi, anti, &cands);
      let test = ValueTest::build(tl, th, li, hi, anti, moz.has_nil());
      let expected = reference_select(vals, moz.base_oid(), &test, &cands);
      assert_eq!(
        got, expected,
        "select({}, {}, {}, {}, {})",
        tl, th, li, hi, anti
      );
      // produced oid lists are sorted
      assert!(got.windows(2).all(|w| w[0] < w[1]));
    }
  }
}

#[test]
fn test_select_equivalence_mixed() {
  let vals = mixed_i32();
  let moz = compress_col(&vals, MethodSet::all());
  assert_select_equivalence(&moz, &vals);
}

#[test]
fn test_select_equivalence_per_method() {
  let vals = mixed_i32();
  for set in [
    MethodSet::of(&[Method::Raw, Method::Rle]),
    MethodSet::of(&[Method::Raw, Method::Delta]),
    MethodSet::of(&[Method::Raw, Method::Dict]),
    MethodSet::of(&[Method::Raw, Method::Frame, Method::Prefix, Method::Linear]),
  ] {
    let moz = compress_col(&vals, set);
    assert_select_equivalence(&moz, &vals);
  }
}

#[test]
fn test_theta_select_equivalence() {
  let vals = mixed_i32();
  let moz = compress_col(&vals, MethodSet::all());
  let ops = [
    ThetaOp::Lt,
    ThetaOp::Le,
    ThetaOp::Eq,
    ThetaOp::Ne,
    ThetaOp::Ge,
    ThetaOp::Gt,
  ];
  for &pivot in &[7, 0, 10_000, i32::MAX, i32::MIN + 1] {
    for op in ops {
      let got = moz.theta_select(pivot, op, &Candidates::All);
      let expected: Vec<u64> = vals
        .iter()
        .enumerate()
        .filter(|(_, v)| {
          !v.is_nil()
            && match op {
              ThetaOp::Lt => **v < pivot,
              ThetaOp::Le => **v <= pivot,
              ThetaOp::Eq => **v == pivot,
              ThetaOp::Ne => **v != pivot,
              ThetaOp::Ge => **v >= pivot,
              ThetaOp::Gt => **v > pivot,
            }
        })
        .map(|(i, _)| i as u64)
        .collect();
      assert_eq!(got, expected, "theta {:?} {}", op, pivot);
    }
  }
}

#[test]
fn test_theta_select_on_nil_value() {
  let vals = mixed_i32();
  let moz = compress_col(&vals, MethodSet::all());
  let nil_oids: Vec<u64> = vals
    .iter()
    .enumerate()
    .filter(|(_, v)| v.is_nil())
    .map(|(i, _)| i as u64)
    .collect();
  assert_eq!(moz.theta_select(i32::NIL, ThetaOp::Eq, &Candidates::All), nil_oids);
  assert!(moz.theta_select(i32::NIL, ThetaOp::Lt, &Candidates::All).is_empty());
}

#[test]
fn test_project_equivalence() {
  let vals = mixed_i32();
  let moz = compress_col(&vals, MethodSet::all());
  assert_eq!(moz.project(&Candidates::All), vals);

  let picks = vec![0_u64, 399, 400, 401, 1000, 1399, (vals.len() - 1) as u64];
  let got = moz.project(&Candidates::List(picks.clone()));
  let expected: Vec<i32> = picks.iter().map(|&o| vals[o as usize]).collect();
  assert_eq!(got, expected);

  let got = moz.project(&Candidates::Range(350..450));
  assert_eq!(got, vals[350..450].to_vec());
}

#[test]
fn test_scans_with_base_oid() {
  let vals = vec![5_i32; 10];
  let col = Column::new(&vals, 1000);
  let moz = compress(&col, MethodSet::of(&[Method::Rle, Method::Raw])).unwrap();
  assert_eq!(
    moz.theta_select(5, ThetaOp::Eq, &Candidates::All),
    (1000..1010).collect::<Vec<u64>>()
  );
  assert_eq!(
    moz.project(&Candidates::List(vec![1003, 1007])),
    vec![5, 5]
  );
  assert_eq!(
    moz.select(5, 5, true, true, false, &Candidates::Range(1005..2000)),
    (1005..1010).collect::<Vec<u64>>()
  );
}

#[test]
fn test_select_on_floats() {
  let mut vals: Vec<f64> = (0..500).map(|i| (i % 9) as f64 * 0.25).collect();
  vals.push(f64::NIL);
  vals.push(f64::NIL);
  let moz = compress_col(&vals, MethodSet::all());
  let got = moz.select(0.5, 1.5, true, false, false, &Candidates::All);
  let expected: Vec<u64> = vals
    .iter()
    .enumerate()
    .filter(|(_, v)| !v.is_nan() && **v >= 0.5 && **v < 1.5)
    .map(|(i, _)| i as u64)
    .collect();
  assert_eq!(got, expected);

  let nil_oids = moz.select(f64::NIL, f64::NIL, true, true, false, &Candidates::All);
  assert_eq!(nil_oids, vec![500, 501]);
}
