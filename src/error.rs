
use crate::level::{IncompatibleLogarithmicUnitsError, LevelError};
use crate::units::convert::{ConversionError, IncompatibleUnitsError, UnresolvableConversionError};
use crate::units::dimension::DimensionError;
use crate::units::registry::{DefineError, UnknownSymbolError};

use thiserror::Error;

/// Any error the crate can produce, for callers who do not want to
/// match on the specific operation's error type.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  Dimension(#[from] DimensionError),
  #[error("{0}")]
  UnknownSymbol(#[from] UnknownSymbolError),
  #[error("{0}")]
  IncompatibleUnits(#[from] IncompatibleUnitsError),
  #[error("{0}")]
  UnresolvableConversion(#[from] UnresolvableConversionError),
  #[error("{0}")]
  IncompatibleLogarithmicUnits(#[from] IncompatibleLogarithmicUnitsError),
  #[error("{0}")]
  Define(#[from] DefineError),
}

impl From<ConversionError> for Error {
  fn from(err: ConversionError) -> Self {
    match err {
      ConversionError::Incompatible(err) => err.into(),
      ConversionError::Unresolvable(err) => err.into(),
    }
  }
}

impl From<LevelError> for Error {
  fn from(err: LevelError) -> Self {
    match err {
      LevelError::Incompatible(err) => err.into(),
      LevelError::Conversion(err) => err.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_conversion_error_flattens() {
    let err = ConversionError::from(UnresolvableConversionError {
      unit: "cbt".to_owned(),
      reason: "no shared root".to_owned(),
    });
    assert!(matches!(Error::from(err), Error::UnresolvableConversion(_)));
  }

  #[test]
  fn test_level_error_flattens() {
    let err = LevelError::from(IncompatibleLogarithmicUnitsError {
      left: "dB[1 m]".to_owned(),
      right: "dB[1 s]".to_owned(),
    });
    assert!(matches!(Error::from(err), Error::IncompatibleLogarithmicUnits(_)));
  }
}
