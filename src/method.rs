use crate::data_types::Number;

/// The compression methods a block can be encoded with.
///
/// The discriminants are persisted as block tags and must stay stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Method {
  /// No compression at all.
  Raw = 0,
  /// Run-length encoding of a single repeated value.
  Rle = 1,
  /// Global dictionary capped at the 256 most frequent values.
  Dict256 = 2,
  /// Unbounded global dictionary.
  Dict = 3,
  /// Per-block bit-packed differences between consecutive values.
  Delta = 4,
  /// An exact arithmetic sequence, stored as offset and step.
  Linear = 5,
  /// Frame of reference with a shared dictionary of deltas.
  Frame = 6,
  /// Shared high bits plus a bit-packed suffix per value.
  Prefix = 7,
}

impl Method {
  /// All methods, in tag order. Ties in the planner resolve in this order.
  pub const ALL: [Method; 8] = [
    Method::Raw,
    Method::Rle,
    Method::Dict256,
    Method::Dict,
    Method::Delta,
    Method::Linear,
    Method::Frame,
    Method::Prefix,
  ];

  #[inline]
  pub fn tag(self) -> u8 {
    self as u8
  }

  pub(crate) fn from_tag(tag: u8) -> Option<Method> {
    Method::ALL.get(tag as usize).copied()
  }

  pub fn name(self) -> &'static str {
    match self {
      Method::Raw => "raw",
      Method::Rle => "rle",
      Method::Dict256 => "dict256",
      Method::Dict => "dict",
      Method::Delta => "delta",
      Method::Linear => "linear",
      Method::Frame => "frame",
      Method::Prefix => "prefix",
    }
  }

  fn from_name(token: &str) -> Option<Method> {
    // "runlength" is the historical spelling for RLE
    match token {
      "raw" => Some(Method::Raw),
      "rle" | "runlength" => Some(Method::Rle),
      "dict256" => Some(Method::Dict256),
      "dict" => Some(Method::Dict),
      "delta" => Some(Method::Delta),
      "linear" => Some(Method::Linear),
      "frame" => Some(Method::Frame),
      "prefix" => Some(Method::Prefix),
      _ => None,
    }
  }

  /// DELTA, LINEAR, FRAME and PREFIX only apply to integer-width types.
  pub fn integer_only(self) -> bool {
    matches!(
      self,
      Method::Delta | Method::Linear | Method::Frame | Method::Prefix
    )
  }
}

/// The set of methods the planner may consider, as a bitmask over tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodSet {
  mask: u16,
}

impl Default for MethodSet {
  fn default() -> Self {
    Self::all()
  }
}

impl MethodSet {
  pub fn all() -> Self {
    let mut set = Self::empty();
    for m in Method::ALL {
      set = set.with(m);
    }
    set
  }

  pub fn empty() -> Self {
    MethodSet { mask: 0 }
  }

  pub fn of(methods: &[Method]) -> Self {
    let mut set = Self::empty();
    for &m in methods {
      set = set.with(m);
    }
    set
  }

  /// Parses a comma-separated list of method names. Tokens are matched
  /// whole, so `dict256` can never be mistaken for `dict`; unknown names are
  /// ignored.
  pub fn from_names(names: &str) -> Self {
    let mut set = Self::empty();
    for token in names.split(',') {
      if let Some(m) = Method::from_name(token.trim().to_ascii_lowercase().as_str()) {
        set = set.with(m);
      }
    }
    set
  }

  pub fn with(self, m: Method) -> Self {
    MethodSet {
      mask: self.mask | (1 << m.tag()),
    }
  }

  pub fn without(self, m: Method) -> Self {
    MethodSet {
      mask: self.mask & !(1 << m.tag()),
    }
  }

  #[inline]
  pub fn contains(self, m: Method) -> bool {
    self.mask & (1 << m.tag()) != 0
  }

  pub fn is_empty(self) -> bool {
    self.mask == 0
  }

  pub fn iter(self) -> impl Iterator<Item = Method> {
    Method::ALL.into_iter().filter(move |m| self.contains(*m))
  }

  /// Drops the methods that do not apply to `T`.
  pub(crate) fn applicable_to<T: Number>(self) -> MethodSet {
    let mut set = self;
    if !T::INTEGER {
      for m in Method::ALL {
        if m.integer_only() {
          set = set.without(m);
        }
      }
    }
    set
  }
}
