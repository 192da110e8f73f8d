use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoroshiro128PlusPlus;

use crate::data_types::{are_equal, Number};
use crate::{compress, Column, MethodSet, Mosaic};

pub fn compress_col<T: Number>(vals: &[T], methods: MethodSet) -> Mosaic<T> {
  compress(&Column::new(vals, 0), methods).unwrap()
}

pub fn assert_nums_eq<T: Number>(got: &[T], expected: &[T], name: &str) {
  assert_eq!(got.len(), expected.len(), "length; name={}", name);
  for (i, (x, y)) in got.iter().zip(expected).enumerate() {
    assert!(
      are_equal(*x, *y, true),
      "at {}: {:?} vs {:?}; name={}",
      i,
      x,
      y,
      name
    );
  }
}

pub fn uses_method<T: Number>(moz: &Mosaic<T>, m: crate::Method) -> bool {
  moz.blocks_per_method()[m.tag() as usize] > 0
}

/// A column exercising every method: a run, an arithmetic ramp, a small
/// alphabet, a shared-prefix stretch, a frame-friendly stretch, a random
/// walk, raw noise, and a few nils.
pub fn mixed_i32() -> Vec<i32> {
  let mut rng = Xoroshiro128PlusPlus::seed_from_u64(42);
  let mut v = Vec::new();
  v.extend(std::iter::repeat(7).take(400));
  v.extend(0..300);
  v.extend((0..400).map(|_| rng.gen_range(0..16)));
  v.push(i32::NIL);
  v.extend((0..200).map(|_| 0x7f00_0000 | rng.gen_range(0..256)));
  v.extend((0..300).map(|_| 10_000 + rng.gen_range(0..100)));
  let mut acc = -5_000;
  v.extend((0..300).map(|_| {
    acc += rng.gen_range(-5..=5);
    acc
  }));
  v.push(i32::NIL);
  v.extend((0..100).map(|_| rng.gen::<i32>()));
  v
}
