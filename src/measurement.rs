
//! Measurements: a quantity together with a symmetric absolute
//! uncertainty. Two measurements are equal when their uncertainty
//! intervals overlap after conversion into shared units; addition and
//! subtraction propagate uncertainties by simple summation.

use crate::quantity::Quantity;
use crate::units::composite::Unit;
use crate::units::convert::{ConversionError, IncompatibleUnitsError};

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone)]
pub struct Measurement {
  quantity: Quantity,
  uncertainty: Quantity,
}

impl Measurement {
  /// Pairs a quantity with its uncertainty. The uncertainty must be
  /// of the same dimension; its sign is ignored.
  pub fn new(quantity: Quantity, uncertainty: Quantity) -> Result<Self, IncompatibleUnitsError> {
    if quantity.dimension() != uncertainty.dimension() {
      return Err(IncompatibleUnitsError::new(quantity.unit(), uncertainty.unit()));
    }
    Ok(Self {
      uncertainty: uncertainty.abs(),
      quantity,
    })
  }

  pub fn quantity(&self) -> &Quantity {
    &self.quantity
  }

  pub fn uncertainty(&self) -> &Quantity {
    &self.uncertainty
  }

  pub fn convert_to(&self, unit: &Unit) -> Result<Measurement, ConversionError> {
    Ok(Measurement {
      quantity: self.quantity.convert_to(unit)?,
      uncertainty: self.uncertainty.convert_to(unit)?,
    })
  }

  /// Sum with uncertainties added.
  pub fn try_add(&self, other: &Measurement) -> Result<Measurement, ConversionError> {
    Ok(Measurement {
      quantity: self.quantity.try_add(&other.quantity)?,
      uncertainty: self.uncertainty.try_add(&other.uncertainty)?,
    })
  }

  /// Difference, with uncertainties still added.
  pub fn try_sub(&self, other: &Measurement) -> Result<Measurement, ConversionError> {
    Ok(Measurement {
      quantity: self.quantity.try_sub(&other.quantity)?,
      uncertainty: self.uncertainty.try_add(&other.uncertainty)?,
    })
  }

  /// Whether the uncertainty intervals of the two measurements
  /// intersect: `|a - b| <= ua + ub` after conversion.
  pub fn overlaps(&self, other: &Measurement) -> bool {
    let Ok(difference) = self.quantity.try_sub(&other.quantity) else {
      return false;
    };
    let Ok(spread) = self.uncertainty.try_add(&other.uncertainty) else {
      return false;
    };
    difference.abs() <= spread
  }
}

impl PartialEq for Measurement {
  fn eq(&self, other: &Self) -> bool {
    self.overlaps(other)
  }
}

impl Display for Measurement {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} ± {}", self.quantity, self.uncertainty)
  }
}
