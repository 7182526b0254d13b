
//! Quantities: a magnitude paired with a unit. Multiplication and
//! division are total and combine units algebraically; addition,
//! subtraction, and comparison are partial and require convertible
//! units, with the result carried in the left operand's unit.

use crate::number::Number;
use crate::units::composite::{Unit, UnitSpec};
use crate::units::convert::{ConversionError, IncompatibleUnitsError};
use crate::units::dimension::{Dimension, DimensionError};

use num::pow::Pow;
use num::{One, Zero};
use serde::{Deserialize, Serialize};

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Div, Mul, Neg};

#[derive(Debug, Clone)]
pub struct Quantity {
  magnitude: Number,
  unit: Unit,
}

/// Stable external representation of a [`Quantity`]. The magnitude is
/// carried as a float; reconstruct the unit through
/// [`UnitRegistry::unit_from_spec`](crate::units::registry::UnitRegistry::unit_from_spec).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySpec {
  pub magnitude: f64,
  pub unit: UnitSpec,
}

/// Tolerance for approximate quantity comparison: two quantities
/// approximate each other when `|a - b| <= absolute + relative * |b|`
/// after converting into shared units.
#[derive(Debug, Clone)]
pub struct Tolerance {
  pub absolute: Number,
  pub relative: Number,
}

impl Tolerance {
  pub fn absolute(absolute: impl Into<Number>) -> Self {
    Self { absolute: absolute.into(), relative: Number::zero() }
  }

  pub fn relative(relative: impl Into<Number>) -> Self {
    Self { absolute: Number::zero(), relative: relative.into() }
  }
}

impl Default for Tolerance {
  fn default() -> Self {
    Self::absolute(1e-9)
  }
}

impl Quantity {
  pub fn of(magnitude: impl Into<Number>, unit: impl Into<Unit>) -> Self {
    Self { magnitude: magnitude.into(), unit: unit.into() }
  }

  /// A dimensionless quantity.
  pub fn scalar(magnitude: impl Into<Number>) -> Self {
    Self::of(magnitude, Unit::dimensionless())
  }

  pub fn magnitude(&self) -> &Number {
    &self.magnitude
  }

  pub fn unit(&self) -> &Unit {
    &self.unit
  }

  pub fn dimension(&self) -> &Dimension {
    self.unit.dimension()
  }

  /// The same physical quantity expressed in `unit`. Exact whenever
  /// the magnitude and the conversion ratio are exact.
  pub fn convert_to(&self, unit: &Unit) -> Result<Quantity, ConversionError> {
    let ratio = crate::units::convert::ratio(&self.unit, unit)?;
    Ok(Quantity {
      magnitude: self.magnitude.clone() * ratio,
      unit: unit.clone(),
    })
  }

  /// Sum in the left operand's unit. Fails when the units are not
  /// convertible.
  pub fn try_add(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
    let other = other.convert_to(&self.unit)?;
    Ok(Quantity {
      magnitude: self.magnitude.clone() + other.magnitude,
      unit: self.unit.clone(),
    })
  }

  /// Difference in the left operand's unit. Fails when the units are
  /// not convertible.
  pub fn try_sub(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
    let other = other.convert_to(&self.unit)?;
    Ok(Quantity {
      magnitude: self.magnitude.clone() - other.magnitude,
      unit: self.unit.clone(),
    })
  }

  /// Quotient that fails instead of panicking when `other` has an
  /// exact zero magnitude. A float zero still divides through to an
  /// infinity, as floats do.
  pub fn try_div(&self, other: &Quantity) -> Option<Quantity> {
    if other.magnitude.is_exact() && other.magnitude.is_zero() {
      return None;
    }
    Some(self.clone() / other.clone())
  }

  pub fn abs(&self) -> Quantity {
    Quantity {
      magnitude: self.magnitude.abs(),
      unit: self.unit.clone(),
    }
  }

  pub fn pow(self, power: i32) -> Quantity {
    Quantity {
      magnitude: self.magnitude.powi(power),
      unit: self.unit.pow(power),
    }
  }

  /// The `degree`-th root. The unit's exponents must divide evenly;
  /// the magnitude is taken through `f64`, so the result is generally
  /// inexact. Odd-degree roots of negative magnitudes are negative;
  /// an even-degree root of a negative magnitude has no real value
  /// and yields a NaN magnitude.
  pub fn root(&self, degree: i32) -> Result<Quantity, DimensionError> {
    let unit = self.unit.root(degree)?;
    let value = self.magnitude.to_f64();
    let magnitude = if value < 0.0 && degree % 2 != 0 {
      -(-value).powf(1.0 / f64::from(degree))
    } else {
      value.powf(1.0 / f64::from(degree))
    };
    Ok(Quantity { magnitude: Number::from(magnitude), unit })
  }

  /// Three-way comparison across convertible units. `Ok(None)` marks
  /// an unordered float comparison (NaN).
  pub fn try_cmp(&self, other: &Quantity) -> Result<Option<Ordering>, ConversionError> {
    if self.dimension() != other.dimension() {
      return Err(IncompatibleUnitsError::new(&self.unit, &other.unit).into());
    }
    let other = other.convert_to(&self.unit)?;
    Ok(self.magnitude.partial_cmp(&other.magnitude))
  }

  /// Approximate equality within `tolerance`, converting `other` into
  /// this quantity's unit first. Quantities of different dimensions
  /// never approximate each other.
  pub fn approximates(&self, other: &Quantity, tolerance: &Tolerance) -> bool {
    let Ok(other) = other.convert_to(&self.unit) else {
      return false;
    };
    let difference = (self.magnitude.clone() - other.magnitude.clone()).abs();
    let bound = tolerance.absolute.clone() + tolerance.relative.clone() * other.magnitude.abs();
    difference <= bound
  }

  pub fn spec(&self) -> QuantitySpec {
    QuantitySpec {
      magnitude: self.magnitude.to_f64(),
      unit: self.unit.spec(),
    }
  }
}

impl Mul for Quantity {
  type Output = Quantity;

  fn mul(self, rhs: Quantity) -> Quantity {
    Quantity {
      magnitude: self.magnitude * rhs.magnitude,
      unit: self.unit * rhs.unit,
    }
  }
}

impl Mul<Number> for Quantity {
  type Output = Quantity;

  fn mul(self, rhs: Number) -> Quantity {
    Quantity {
      magnitude: self.magnitude * rhs,
      unit: self.unit,
    }
  }
}

// Panics when `rhs` has an exact zero magnitude; `try_div` is the
// non-panicking form.
impl Div for Quantity {
  type Output = Quantity;

  fn div(self, rhs: Quantity) -> Quantity {
    Quantity {
      magnitude: self.magnitude / rhs.magnitude,
      unit: self.unit / rhs.unit,
    }
  }
}

impl Div<Number> for Quantity {
  type Output = Quantity;

  fn div(self, rhs: Number) -> Quantity {
    Quantity {
      magnitude: self.magnitude / rhs,
      unit: self.unit,
    }
  }
}

impl Neg for Quantity {
  type Output = Quantity;

  fn neg(self) -> Quantity {
    Quantity {
      magnitude: -self.magnitude,
      unit: self.unit,
    }
  }
}

impl PartialEq for Quantity {
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

impl PartialOrd for Quantity {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.try_cmp(other).ok().flatten()
  }
}

impl Display for Quantity {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.unit.is_one() {
      write!(f, "{}", self.magnitude)
    } else {
      write!(f, "{} {}", self.magnitude, self.unit)
    }
  }
}
