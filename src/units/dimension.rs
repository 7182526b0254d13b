
//! Dimensions describe the kind of physical quantity a unit
//! measures: length, mass, time, or any formal product and quotient
//! of registered base dimensions.

use itertools::Itertools;
use num::pow::Pow;
use num::One;
use thiserror::Error;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Div, Mul};
use std::sync::Arc;

/// An orthogonal axis of physical quantity: length, mass, time, and
/// so on. The set of base dimensions is open; new ones are registered
/// through [`UnitRegistry::define_base_dimension`](crate::units::registry::UnitRegistry::define_base_dimension).
///
/// Base dimensions are compared structurally by name and symbol, so
/// equality does not depend on which registry produced them.
#[derive(Debug, Clone)]
pub struct BaseDimension(Arc<BaseDimensionData>);

#[derive(Debug)]
struct BaseDimensionData {
  name: String,
  symbol: String,
}

/// A dimension is a formal product and quotient of zero or more
/// [`BaseDimension`] values, stored in canonical sparse form: the
/// exponents are sorted by base-dimension symbol and zero exponents
/// are never stored. The empty product is the unique dimensionless
/// dimension, [`Dimension::one`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
  exponents: Vec<(BaseDimension, i32)>,
}

/// Error produced by invalid exponent operations on dimensions, such
/// as roots that do not divide evenly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DimensionError {
  #[error("cannot take the zeroth root of a dimension")]
  ZeroRoot,
  #[error("exponent {exponent} on '{symbol}' is not divisible by {degree}")]
  UnevenRoot {
    symbol: String,
    exponent: i32,
    degree: i32,
  },
}

impl BaseDimension {
  /// Constructs a new base dimension. Most callers should go through
  /// the registry instead, which interns base dimensions by symbol.
  pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
    BaseDimension(Arc::new(BaseDimensionData {
      name: name.into(),
      symbol: symbol.into(),
    }))
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  pub fn symbol(&self) -> &str {
    &self.0.symbol
  }
}

impl PartialEq for BaseDimension {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
      || (self.0.symbol == other.0.symbol && self.0.name == other.0.name)
  }
}

impl Eq for BaseDimension {}

impl PartialOrd for BaseDimension {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for BaseDimension {
  fn cmp(&self, other: &Self) -> Ordering {
    self.0.symbol.cmp(&other.0.symbol).then_with(|| self.0.name.cmp(&other.0.name))
  }
}

impl std::hash::Hash for BaseDimension {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.0.symbol.hash(state);
    self.0.name.hash(state);
  }
}

impl Display for BaseDimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0.symbol)
  }
}

impl Dimension {
  /// Constructs a dimension from base-dimension exponent pairs,
  /// merging duplicates, dropping zero exponents, and sorting into
  /// canonical order.
  pub fn new(exponents: impl IntoIterator<Item = (BaseDimension, i32)>) -> Self {
    let mut exponents: Vec<(BaseDimension, i32)> = exponents
      .into_iter()
      .into_grouping_map()
      .sum()
      .into_iter()
      .filter(|(_, exp)| *exp != 0)
      .collect();
    exponents.sort_by(|a, b| a.0.cmp(&b.0));
    Self { exponents }
  }

  /// The dimension consisting of a single base dimension to the first
  /// power.
  pub fn base(base: BaseDimension) -> Self {
    Self { exponents: vec![(base, 1)] }
  }

  pub fn is_dimensionless(&self) -> bool {
    self.exponents.is_empty()
  }

  /// The exponent pairs in canonical order. All returned exponents
  /// are non-zero.
  pub fn components(&self) -> impl Iterator<Item = (&BaseDimension, i32)> {
    self.exponents.iter().map(|(base, exp)| (base, *exp))
  }

  /// The exponent of a particular base dimension, zero if absent.
  pub fn exponent_of(&self, base: &BaseDimension) -> i32 {
    self.exponents
      .iter()
      .find(|(b, _)| b == base)
      .map(|(_, exp)| *exp)
      .unwrap_or(0)
  }

  pub fn recip(self) -> Self {
    self.pow(-1)
  }

  /// The `degree`-th root of this dimension. Fails if `degree` is
  /// zero or if any exponent is not evenly divisible by `degree`.
  pub fn root(&self, degree: i32) -> Result<Dimension, DimensionError> {
    if degree == 0 {
      return Err(DimensionError::ZeroRoot);
    }
    let exponents = self
      .exponents
      .iter()
      .map(|(base, exp)| {
        if exp % degree != 0 {
          Err(DimensionError::UnevenRoot {
            symbol: base.symbol().to_owned(),
            exponent: *exp,
            degree,
          })
        } else {
          Ok((base.clone(), exp / degree))
        }
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Dimension { exponents })
  }

  /// Stable external representation: (symbol, exponent) pairs in
  /// canonical order. A registry can rebuild the dimension with
  /// [`UnitRegistry::dimension_from_spec`](crate::units::registry::UnitRegistry::dimension_from_spec).
  pub fn spec(&self) -> Vec<(String, i32)> {
    self.exponents
      .iter()
      .map(|(base, exp)| (base.symbol().to_owned(), *exp))
      .collect()
  }
}

impl From<BaseDimension> for Dimension {
  fn from(base: BaseDimension) -> Self {
    Dimension::base(base)
  }
}

impl Mul for Dimension {
  type Output = Dimension;

  fn mul(self, rhs: Dimension) -> Dimension {
    Dimension::new(self.exponents.into_iter().chain(rhs.exponents))
  }
}

impl Mul for &Dimension {
  type Output = Dimension;

  fn mul(self, rhs: &Dimension) -> Dimension {
    self.clone() * rhs.clone()
  }
}

impl Mul<BaseDimension> for Dimension {
  type Output = Dimension;

  fn mul(self, rhs: BaseDimension) -> Dimension {
    self * Dimension::base(rhs)
  }
}

impl Mul for BaseDimension {
  type Output = Dimension;

  fn mul(self, rhs: BaseDimension) -> Dimension {
    Dimension::base(self) * Dimension::base(rhs)
  }
}

impl Mul<Dimension> for BaseDimension {
  type Output = Dimension;

  fn mul(self, rhs: Dimension) -> Dimension {
    Dimension::base(self) * rhs
  }
}

impl Div for Dimension {
  type Output = Dimension;

  #[allow(clippy::suspicious_arithmetic_impl)] // Multiply by reciprocal is correct
  fn div(self, rhs: Dimension) -> Dimension {
    self * rhs.recip()
  }
}

impl Div for &Dimension {
  type Output = Dimension;

  fn div(self, rhs: &Dimension) -> Dimension {
    self.clone() / rhs.clone()
  }
}

impl Div<BaseDimension> for Dimension {
  type Output = Dimension;

  fn div(self, rhs: BaseDimension) -> Dimension {
    self / Dimension::base(rhs)
  }
}

impl Div for BaseDimension {
  type Output = Dimension;

  fn div(self, rhs: BaseDimension) -> Dimension {
    Dimension::base(self) / Dimension::base(rhs)
  }
}

impl Div<Dimension> for BaseDimension {
  type Output = Dimension;

  fn div(self, rhs: Dimension) -> Dimension {
    Dimension::base(self) / rhs
  }
}

impl Pow<i32> for Dimension {
  type Output = Dimension;

  fn pow(self, power: i32) -> Dimension {
    if power == 0 {
      return Dimension::one();
    }
    Dimension {
      exponents: self
        .exponents
        .into_iter()
        .map(|(base, exp)| (base, exp * power))
        .collect(),
    }
  }
}

impl Pow<i32> for &Dimension {
  type Output = Dimension;

  fn pow(self, power: i32) -> Dimension {
    self.clone().pow(power)
  }
}

impl Pow<i32> for BaseDimension {
  type Output = Dimension;

  fn pow(self, power: i32) -> Dimension {
    Dimension::base(self).pow(power)
  }
}

impl One for Dimension {
  fn one() -> Self {
    Dimension { exponents: Vec::new() }
  }

  fn is_one(&self) -> bool {
    self.exponents.is_empty()
  }
}

impl Display for Dimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let mut numerator: Vec<String> = Vec::new();
    let mut denominator: Vec<String> = Vec::new();
    for (base, exp) in self.components() {
      match exp {
        1 => numerator.push(base.to_string()),
        -1 => denominator.push(base.to_string()),
        exp if exp > 0 => numerator.push(format!("{}^{}", base, exp)),
        exp => denominator.push(format!("{}^{}", base, -exp)),
      }
    }
    if numerator.is_empty() {
      write!(f, "1")?;
    } else {
      write!(f, "{}", numerator.join(" "))?;
    }
    if !denominator.is_empty() {
      write!(f, " / {}", denominator.join(" "))?;
    }
    Ok(())
  }
}

#[cfg(test)]
pub(crate) mod test_utils {
  use super::*;
  use once_cell::sync::Lazy;

  pub static LENGTH: Lazy<BaseDimension> = Lazy::new(|| BaseDimension::new("length", "L"));
  pub static TIME: Lazy<BaseDimension> = Lazy::new(|| BaseDimension::new("time", "T"));
  pub static MASS: Lazy<BaseDimension> = Lazy::new(|| BaseDimension::new("mass", "M"));
}

#[cfg(test)]
mod tests {
  use super::test_utils::{LENGTH, MASS, TIME};
  use super::*;

  #[test]
  fn test_base_dimension_equality_is_structural() {
    let a = BaseDimension::new("length", "L");
    let b = BaseDimension::new("length", "L");
    assert_eq!(a, b);
    assert_ne!(a, BaseDimension::new("luminosity", "L"));
  }

  #[test]
  fn test_canonical_form_drops_zeros() {
    let dim = Dimension::new([(LENGTH.clone(), 1), (LENGTH.clone(), -1)]);
    assert!(dim.is_dimensionless());
    assert_eq!(dim, Dimension::one());
  }

  #[test]
  fn test_canonical_form_is_order_independent() {
    let a = Dimension::new([(LENGTH.clone(), 1), (TIME.clone(), -2)]);
    let b = Dimension::new([(TIME.clone(), -2), (LENGTH.clone(), 1)]);
    assert_eq!(a, b);
  }

  #[test]
  fn test_mul_sums_exponents() {
    let speed = LENGTH.clone() / TIME.clone();
    let accel = speed.clone() / Dimension::base(TIME.clone());
    assert_eq!(accel.exponent_of(&LENGTH), 1);
    assert_eq!(accel.exponent_of(&TIME), -2);
  }

  #[test]
  fn test_div_by_self_is_dimensionless() {
    let speed = LENGTH.clone() / TIME.clone();
    assert!((speed.clone() / speed).is_dimensionless());
  }

  #[test]
  fn test_pow() {
    let volume = LENGTH.clone().pow(3);
    assert_eq!(volume.exponent_of(&LENGTH), 3);
    assert_eq!(volume.clone().pow(0), Dimension::one());
    assert_eq!(volume.pow(-1).exponent_of(&LENGTH), -3);
  }

  #[test]
  fn test_root_even() {
    let area = LENGTH.clone().pow(2);
    assert_eq!(area.root(2), Ok(Dimension::base(LENGTH.clone())));
  }

  #[test]
  fn test_root_uneven_fails() {
    let volume = LENGTH.clone().pow(3);
    assert!(matches!(volume.root(2), Err(DimensionError::UnevenRoot { .. })));
  }

  #[test]
  fn test_root_zero_fails() {
    let area = LENGTH.clone().pow(2);
    assert_eq!(area.root(0), Err(DimensionError::ZeroRoot));
  }

  #[test]
  fn test_root_of_dimensionless_never_fails() {
    assert_eq!(Dimension::one().root(5), Ok(Dimension::one()));
  }

  #[test]
  fn test_display() {
    let energy = MASS.clone() * LENGTH.clone().pow(2) / TIME.clone().pow(2);
    assert_eq!(energy.to_string(), "L^2 M / T^2");
    assert_eq!(Dimension::one().to_string(), "1");
    assert_eq!((LENGTH.clone() / TIME.clone()).to_string(), "L / T");
  }

  #[test]
  fn test_spec_round_trip_shape() {
    let speed = LENGTH.clone() / TIME.clone();
    assert_eq!(speed.spec(), vec![("L".to_owned(), 1), ("T".to_owned(), -1)]);
  }
}
