use crate::constants::Bitlen;
use crate::data_types::Latent;

macro_rules! impl_latent {
  ($t: ty) => {
    impl Latent for $t {
      const BITS: Bitlen = Self::BITS as Bitlen;
      const BYTES: usize = (Self::BITS / 8) as usize;

      #[inline]
      fn from_u64(x: u64) -> Self {
        x as Self
      }

      #[inline]
      fn to_u64(self) -> u64 {
        self as u64
      }

      #[inline]
      fn read_le(src: &[u8]) -> Self {
        Self::from_le_bytes(src[..Self::BYTES].try_into().unwrap())
      }

      #[inline]
      fn write_le(self, dst: &mut [u8]) {
        dst[..Self::BYTES].copy_from_slice(&self.to_le_bytes());
      }
    }
  };
}

impl_latent!(u8);
impl_latent!(u16);
impl_latent!(u32);
impl_latent!(u64);
