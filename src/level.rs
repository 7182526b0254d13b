
//! Logarithmic units and levels. A logarithm such as the decibel only
//! becomes a unit once tied to a linear reference quantity; a level
//! is a magnitude on that scale. Levels are never added directly:
//! arithmetic round-trips through the linear domain, so adding a
//! 10 dB ratio to a 0 dB level yields the level of ratio 11, not
//! 10 dB.

use crate::number::Number;
use crate::quantity::{Quantity, Tolerance};
use crate::units::convert::ConversionError;

use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// Two levels whose logarithmic units do not describe the same kind
/// of linear quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot relate levels in {left} and {right}")]
pub struct IncompatibleLogarithmicUnitsError {
  pub left: String,
  pub right: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
  #[error("{0}")]
  Incompatible(#[from] IncompatibleLogarithmicUnitsError),
  #[error("{0}")]
  Conversion(#[from] ConversionError),
}

/// A named logarithmic scale: `value = scale * log_base(ratio)`.
/// Equality is by base and scale, so a renamed decibel is still a
/// decibel.
#[derive(Debug, Clone)]
pub struct Logarithm {
  name: String,
  symbol: String,
  base: f64,
  scale: Number,
}

impl Logarithm {
  pub fn new(name: impl Into<String>, symbol: impl Into<String>, base: f64, scale: impl Into<Number>) -> Self {
    Self {
      name: name.into(),
      symbol: symbol.into(),
      base,
      scale: scale.into(),
    }
  }

  pub fn decibel() -> Self {
    Self::new("decibel", "dB", 10.0, 10)
  }

  pub fn bel() -> Self {
    Self::new("bel", "B", 10.0, 1)
  }

  pub fn neper() -> Self {
    Self::new("neper", "Np", std::f64::consts::E, 1)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  /// Ties this scale to a linear reference quantity, producing a
  /// usable logarithmic unit.
  pub fn against(&self, reference: Quantity) -> LogarithmicUnit {
    LogarithmicUnit::new(self.clone(), reference)
  }

  fn apply(&self, ratio: f64) -> f64 {
    let log = if self.base == 10.0 {
      ratio.log10()
    } else if self.base == std::f64::consts::E {
      ratio.ln()
    } else {
      ratio.log(self.base)
    };
    self.scale.to_f64() * log
  }

  fn invert(&self, value: f64) -> f64 {
    self.base.powf(value / self.scale.to_f64())
  }
}

impl PartialEq for Logarithm {
  fn eq(&self, other: &Self) -> bool {
    self.base == other.base && self.scale == other.scale
  }
}

impl Display for Logarithm {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.symbol)
  }
}

/// A logarithmic scale together with its linear reference, optionally
/// aliased with its own name and symbol (dBW, dBm, dBSPL).
#[derive(Debug, Clone)]
pub struct LogarithmicUnit {
  logarithm: Logarithm,
  reference: Quantity,
  alias_name: Option<String>,
  alias_symbol: Option<String>,
}

impl LogarithmicUnit {
  pub fn new(logarithm: Logarithm, reference: Quantity) -> Self {
    Self {
      logarithm,
      reference,
      alias_name: None,
      alias_symbol: None,
    }
  }

  /// Names this referenced unit, as dBW names decibels referenced to
  /// one watt.
  pub fn alias(mut self, name: impl Into<String>, symbol: impl Into<String>) -> Self {
    self.alias_name = Some(name.into());
    self.alias_symbol = Some(symbol.into());
    self
  }

  pub fn logarithm(&self) -> &Logarithm {
    &self.logarithm
  }

  pub fn reference(&self) -> &Quantity {
    &self.reference
  }

  /// A level of the given magnitude on this scale.
  pub fn level(&self, magnitude: impl Into<Number>) -> Level {
    Level {
      magnitude: magnitude.into(),
      unit: self.clone(),
    }
  }

  /// The level of a linear quantity on this scale. Fails when the
  /// quantity is not convertible into the reference's unit. The
  /// magnitude passes through `f64`.
  pub fn level_of(&self, quantity: &Quantity) -> Result<Level, LevelError> {
    let converted = quantity.convert_to(self.reference.unit())?;
    let ratio = converted.magnitude().to_f64() / self.reference.magnitude().to_f64();
    Ok(self.level(self.logarithm.apply(ratio)))
  }

  fn check_compatible(&self, other: &LogarithmicUnit) -> Result<(), IncompatibleLogarithmicUnitsError> {
    if self.reference.dimension() != other.reference.dimension() {
      return Err(IncompatibleLogarithmicUnitsError {
        left: self.to_string(),
        right: other.to_string(),
      });
    }
    Ok(())
  }
}

impl PartialEq for LogarithmicUnit {
  fn eq(&self, other: &Self) -> bool {
    self.logarithm == other.logarithm && self.reference == other.reference
  }
}

impl Display for LogarithmicUnit {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if let Some(symbol) = &self.alias_symbol {
      write!(f, "{symbol}")
    } else {
      write!(f, "{}[{}]", self.logarithm, self.reference)
    }
  }
}

/// A magnitude on a logarithmic scale, such as 30 dBm.
#[derive(Debug, Clone)]
pub struct Level {
  magnitude: Number,
  unit: LogarithmicUnit,
}

impl Level {
  pub fn magnitude(&self) -> &Number {
    &self.magnitude
  }

  pub fn unit(&self) -> &LogarithmicUnit {
    &self.unit
  }

  /// The linear quantity this level denotes, in the reference's unit.
  pub fn to_quantity(&self) -> Quantity {
    let ratio = self.unit.logarithm.invert(self.magnitude.to_f64());
    self.unit.reference.clone() * Number::from(ratio)
  }

  /// The same level on another scale, going through the linear
  /// domain.
  pub fn convert_to(&self, unit: &LogarithmicUnit) -> Result<Level, LevelError> {
    self.unit.check_compatible(unit)?;
    unit.level_of(&self.to_quantity())
  }

  /// Sum of the underlying linear quantities, expressed on this
  /// level's scale. Logarithmic magnitudes themselves are never
  /// summed.
  pub fn try_add(&self, other: &Level) -> Result<Level, LevelError> {
    self.unit.check_compatible(&other.unit)?;
    let sum = self.to_quantity().try_add(&other.to_quantity())?;
    self.unit.level_of(&sum)
  }

  /// Difference of the underlying linear quantities on this level's
  /// scale.
  pub fn try_sub(&self, other: &Level) -> Result<Level, LevelError> {
    self.unit.check_compatible(&other.unit)?;
    let difference = self.to_quantity().try_sub(&other.to_quantity())?;
    self.unit.level_of(&difference)
  }

  /// Approximate equality through the linear domain.
  pub fn approximates(&self, other: &Level, tolerance: &Tolerance) -> bool {
    self.to_quantity().approximates(&other.to_quantity(), tolerance)
  }
}

impl PartialEq for Level {
  fn eq(&self, other: &Self) -> bool {
    if self.unit == other.unit {
      return self.magnitude == other.magnitude;
    }
    match other.convert_to(&self.unit) {
      Ok(converted) => self.magnitude == converted.magnitude,
      Err(_) => false,
    }
  }
}

impl Display for Level {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} {}", self.magnitude, self.unit)
  }
}
