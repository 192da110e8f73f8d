use std::cmp::Ordering;

use crate::data_types::Number;

macro_rules! impl_signed {
  ($t: ty, $latent: ty) => {
    impl Number for $t {
      const BYTES: usize = (Self::BITS / 8) as usize;
      const NIL: Self = Self::MIN;
      const INTEGER: bool = true;

      type L = $latent;

      #[inline]
      fn is_nil(self) -> bool {
        self == Self::NIL
      }

      #[inline]
      fn to_latent(self) -> Self::L {
        self as $latent
      }

      #[inline]
      fn from_latent(l: Self::L) -> Self {
        l as Self
      }

      #[inline]
      fn checked_prev(self) -> Option<Self> {
        // the predecessor of MIN + 1 would be the nil sentinel
        match self.checked_sub(1) {
          Some(p) if p != Self::NIL => Some(p),
          _ => None,
        }
      }

      #[inline]
      fn checked_next(self) -> Option<Self> {
        self.checked_add(1)
      }

      #[inline]
      fn cmp_nil_first(&self, other: &Self) -> Ordering {
        self.cmp(other)
      }
    }
  };
}

impl_signed!(i8, u8);
impl_signed!(i16, u16);
impl_signed!(i32, u32);
impl_signed!(i64, u64);
