use crate::data_types::Number;
use crate::dictionary;
use crate::tests::utils::{assert_nums_eq, compress_col, mixed_i32};
use crate::{Candidates, Method, MethodSet, ThetaOp};

#[test]
fn test_constant_column_plans_one_rle_block() {
  let vals = vec![7_i32; 8];
  let moz = compress_col(&vals, MethodSet::of(&[Method::Rle, Method::Raw]));
  let layout = moz.layout();
  assert_eq!(layout.len(), 1);
  assert_eq!(layout[0].method, Method::Rle);
  assert_eq!(layout[0].cnt, 8);
  assert_eq!(layout[0].output_bytes, 8); // block header + one i32
  // header + RLE block + EOL marker
  assert_eq!(moz.heap_bytes(), 168 + 8 + 4);
  assert_eq!(moz.theta_select(7, ThetaOp::Eq, &Candidates::All), (0..8).collect::<Vec<u64>>());
  assert!(moz.theta_select(6, ThetaOp::Eq, &Candidates::All).is_empty());
}

#[test]
fn test_ramp_plans_one_linear_block() {
  let vals = vec![10_i32, 11, 12, 13, 14, 15];
  let moz = compress_col(&vals, MethodSet::of(&[Method::Linear, Method::Raw]));
  let layout = moz.layout();
  assert_eq!(layout.len(), 1);
  assert_eq!(layout[0].method, Method::Linear);
  assert_eq!(layout[0].cnt, 6);
  assert_eq!(moz.project(&Candidates::List(vec![1, 3, 5])), vec![11, 13, 15]);
  assert_eq!(
    moz.select(12, 14, true, true, false, &Candidates::All),
    vec![2, 3, 4]
  );
}

#[test]
fn test_small_deltas_plan_one_delta_block() {
  let vals = vec![100_i32, 101, 99, 102, 98, 103, 97];
  let moz = compress_col(&vals, MethodSet::of(&[Method::Delta, Method::Raw]));
  let layout = moz.layout();
  assert_eq!(layout.len(), 1);
  assert_eq!(layout[0].method, Method::Delta);
  assert_eq!(layout[0].cnt, 7);
  assert_nums_eq(&moz.decompress(), &vals, "delta scenario");
}

#[test]
fn test_shared_high_bits_plan_one_prefix_block() {
  let vals = vec![0x10a_i32, 0x10b, 0x10c, 0x10f];
  let moz = compress_col(&vals, MethodSet::of(&[Method::Prefix, Method::Raw]));
  let layout = moz.layout();
  assert_eq!(layout.len(), 1);
  assert_eq!(layout[0].method, Method::Prefix);
  assert_eq!(layout[0].cnt, 4);
  assert_nums_eq(&moz.decompress(), &vals, "prefix scenario");
}

#[test]
fn test_two_value_dict256_column() {
  let vals: Vec<i64> = [1_i64, 2].repeat(10_240);
  let moz = compress_col(&vals, MethodSet::of(&[Method::Dict256]));
  let hdr = moz.header();
  assert_eq!(hdr.length_dict256, 2);
  assert_eq!(hdr.bits_dict256, 1);
  let layout = moz.layout();
  assert_eq!(layout.len(), 1);
  assert_eq!(layout[0].method, Method::Dict256);
  assert_eq!(layout[0].cnt, 20_480);
  // one key bit per element, plus constants
  assert_eq!(moz.heap_bytes(), 168 + 4 + 20_480 / 8 + 4);
  assert_nums_eq(&moz.decompress(), &vals, "dict256 scenario");
}

#[test]
fn test_block_stream_invariants() {
  let vals = mixed_i32();
  for set in [
    MethodSet::all(),
    MethodSet::of(&[Method::Raw, Method::Rle, Method::Delta]),
  ] {
    let moz = compress_col(&vals, set);
    let layout = moz.layout();
    assert_eq!(layout.iter().map(|b| b.cnt).sum::<usize>(), vals.len());
    assert!(layout.iter().all(|b| b.cnt >= 1 && b.cnt < (1 << 24)));
    assert_eq!(layout.len() as u32, moz.header().nblocks);
  }
}

#[test]
fn test_per_method_counters() {
  let vals = vec![7_i32; 100];
  let moz = compress_col(&vals, MethodSet::of(&[Method::Rle, Method::Raw]));
  let blks = moz.blocks_per_method();
  let elms = moz.elements_per_method();
  assert_eq!(blks[Method::Rle.tag() as usize], 1);
  assert_eq!(elms[Method::Rle.tag() as usize], 100);
  assert_eq!(blks[Method::Raw.tag() as usize], 0);
  // methods outside the mask are marked unavailable
  assert_eq!(blks[Method::Dict.tag() as usize], -1);
  assert_eq!(elms[Method::Linear.tag() as usize], -1);
}

#[test]
fn test_dictionary_invariants() {
  let vals = mixed_i32();
  let moz = compress_col(&vals, MethodSet::all());
  let hdr = moz.header();
  assert!(hdr.length_dict256 <= 256);
  for dict in [
    moz_dict_slice(&moz, hdr.pos_dict, hdr.length_dict),
    moz_dict_slice(&moz, hdr.pos_dict256, hdr.length_dict256),
  ] {
    // strictly sorted, nil (if present) first
    assert!(dict
      .windows(2)
      .all(|w| w[0].cmp_nil_first(&w[1]).is_lt()));
    for (i, v) in dict.iter().enumerate() {
      assert_eq!(dictionary::search(&dict, *v), Ok(i));
    }
  }
}

fn moz_dict_slice(moz: &crate::Mosaic<i32>, pos: u32, len: u32) -> Vec<i32> {
  let (_, dicts) = moz.clone().into_parts();
  dicts[pos as usize..(pos + len) as usize].to_vec()
}

#[test]
fn test_size_monotonicity() {
  let vals = mixed_i32();
  let small = MethodSet::of(&[Method::Raw, Method::Rle]);
  let medium = small.with(Method::Delta).with(Method::Linear);
  let large = MethodSet::all();

  let size = |set: MethodSet| {
    let moz = compress_col(&vals, set);
    assert_nums_eq(&moz.decompress(), &vals, "monotonicity round trip");
    moz.heap_bytes() + moz.dict_bytes()
  };
  let s_small = size(small);
  let s_medium = size(medium);
  let s_large = size(large);
  let slack = 64;
  assert!(s_medium <= s_small + slack, "{} vs {}", s_medium, s_small);
  assert!(s_large <= s_medium + slack, "{} vs {}", s_large, s_medium);
}

#[test]
fn test_raw_runs_merge_into_one_block() {
  // noise under a tiny run: raw elements coalesce instead of fragmenting
  let mut vals: Vec<i32> = vec![0x5eed_1234, -77, 0x00c0_ffee, 55_555, -1_234_567, 42];
  vals.extend(vec![9_i32; 400]);
  vals.extend([0x7777_7777, -3]);
  let moz = compress_col(&vals, MethodSet::of(&[Method::Raw, Method::Rle]));
  let layout = moz.layout();
  assert_eq!(layout.len(), 3);
  assert_eq!(layout[0].method, Method::Raw);
  assert_eq!(layout[0].cnt, 6);
  assert_eq!(layout[1].method, Method::Rle);
  assert_eq!(layout[1].cnt, 400);
  assert_eq!(layout[2].method, Method::Raw);
  assert_eq!(layout[2].cnt, 2);
  assert_nums_eq(&moz.decompress(), &vals, "raw merge");
}

#[test]
fn test_ratio_reported() {
  let vals = vec![1_i32; 4096];
  let moz = compress_col(&vals, MethodSet::of(&[Method::Rle, Method::Raw]));
  assert!(moz.ratio() > 50.0);
  let info = moz.layout();
  assert_eq!(info[0].input_bytes, 4096 * 4);
}
