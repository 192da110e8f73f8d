// Bit widths and shifts are done in u32, the same width as the code vector
// cells themselves.
pub type Bitlen = u32;

// persisted format
pub const MOSAIC_VERSION: u32 = 2;
pub const CNT_BITS: Bitlen = 24;
pub const MAX_BLOCK_CNT: usize = (1 << CNT_BITS) - 1;
pub const N_METHODS: usize = 8;
pub const EOL_TAG: u8 = 8;
pub const METHOD_NOT_AVAILABLE: i64 = -1;

// code vectors
pub const MAX_CODE_WIDTH: Bitlen = 32;
pub const MAX_DICT256: usize = 256;
pub const MAX_FRAME_DICT: usize = 256;

// planner
pub const NORMALIZED_CNT_SEED: u64 = 100;

#[cfg(test)]
mod tests {
  use crate::constants::*;

  #[test]
  fn test_block_cnt_fits_header() {
    assert_eq!(MAX_BLOCK_CNT, 0xff_ffff);
    assert!(MAX_BLOCK_CNT < (1 << CNT_BITS));
  }

  #[test]
  fn test_eol_tag_past_methods() {
    assert_eq!(EOL_TAG as usize, N_METHODS);
  }
}
