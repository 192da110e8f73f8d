use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// The different kinds of errors the library can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
  /// `CannotCompress` errors occur when the enabled compression methods
  /// cannot cover the column, e.g. because none of them is applicable to the
  /// column's type or RAW was disabled and no other method applies at some
  /// position.
  CannotCompress,
  /// `Corruption` errors occur when reconstructing a compressed heap from
  /// bytes that are inconsistent or violate the mosaic format.
  Corruption,
  /// `InvalidArgument` errors occur during compression, indicating
  /// the parameters provided to a function were invalid.
  InvalidArgument,
  /// `NoReduction` errors indicate that the estimated compressed size is not
  /// smaller than the uncompressed column. This is benign; the caller decides
  /// whether to keep the column as-is.
  NoReduction,
}

/// The error type used in results for all `mosaic` functionality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicError {
  pub kind: ErrorKind,
  pub message: String,
}

impl MosaicError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    MosaicError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn cannot_compress<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::CannotCompress, message)
  }

  pub(crate) fn corruption<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::Corruption, message)
  }

  pub(crate) fn invalid_argument<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InvalidArgument, message)
  }

  pub(crate) fn no_reduction<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::NoReduction, message)
  }
}

impl Display for MosaicError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "mosaic {:?} error: {}",
      self.kind, &self.message
    )
  }
}

impl Error for MosaicError {}

pub type MosaicResult<T> = Result<T, MosaicError>;
