
//! Canonical composite units: formal products and quotients of
//! atomic units. The canonical form is what makes unit equality
//! work: `(m / s) * s` and `m` reduce to the same representation no
//! matter how they were built.

use super::base::BaseUnit;
use super::dimension::{Dimension, DimensionError};

use itertools::Itertools;
use num::pow::Pow;
use num::One;
use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Div, Mul};
use std::sync::OnceLock;

/// An atomic unit raised to a non-zero integer power.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitFactor {
  pub unit: BaseUnit,
  pub exponent: i32,
}

/// A composite unit in canonical form: a sequence of
/// (atomic unit, exponent) pairs sorted by symbol, with duplicates
/// merged and zero exponents dropped. The empty sequence is the
/// unique dimensionless unit.
///
/// Equality and hashing are defined by the canonical sequence alone.
/// The registry additionally interns canonical forms so repeated
/// algebra returns cached instances, but correctness never depends on
/// interning.
#[derive(Debug, Clone)]
pub struct Unit {
  factors: Vec<UnitFactor>,
  // Derived dimension, computed once on first request.
  dimension: OnceLock<Dimension>,
}

/// Stable external representation of a [`Unit`]: (symbol, exponent)
/// pairs in canonical order. Reconstructable into a `Unit` through
/// [`UnitRegistry::unit_from_spec`](crate::units::registry::UnitRegistry::unit_from_spec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec(pub Vec<(String, i32)>);

impl UnitFactor {
  pub fn dimension(&self) -> Dimension {
    self.unit.dimension().pow(self.exponent)
  }
}

impl Unit {
  /// Constructs a unit as the product of the given factors, merging
  /// duplicate atomic units, dropping zero exponents, and sorting by
  /// symbol into the canonical order.
  pub fn new(factors: impl IntoIterator<Item = UnitFactor>) -> Self {
    let mut factors: Vec<UnitFactor> = factors
      .into_iter()
      .map(|f| (f.unit, f.exponent))
      .into_grouping_map()
      .sum()
      .into_iter()
      .filter(|(_, exponent)| *exponent != 0)
      .map(|(unit, exponent)| UnitFactor { unit, exponent })
      .collect();
    factors.sort_by(|a, b| a.unit.cmp(&b.unit));
    Self { factors, dimension: OnceLock::new() }
  }

  /// The dimensionless unit, the "one" of unit multiplication.
  pub fn dimensionless() -> Self {
    Self::new([])
  }

  pub fn is_dimensionless(&self) -> bool {
    self.factors.is_empty()
  }

  /// The distinct atomic units with their exponents, in canonical
  /// order. All returned exponents are non-zero.
  pub fn factors(&self) -> &[UnitFactor] {
    &self.factors
  }

  pub fn iter(&self) -> impl Iterator<Item = &UnitFactor> {
    self.factors.iter()
  }

  /// The reciprocal of `self`.
  pub fn recip(self) -> Self {
    let factors = self
      .factors
      .into_iter()
      .map(|f| UnitFactor { unit: f.unit, exponent: -f.exponent })
      .collect();
    Self { factors, dimension: OnceLock::new() }
  }

  /// The dimension of this unit: the product of the atomic units'
  /// dimensions raised to their exponents. Computed on first call and
  /// cached on the instance.
  pub fn dimension(&self) -> &Dimension {
    self.dimension.get_or_init(|| {
      self
        .factors
        .iter()
        .map(UnitFactor::dimension)
        .fold(Dimension::one(), |acc, dim| acc * dim)
    })
  }

  /// The `degree`-th root of this unit. Fails if `degree` is zero or
  /// if any factor's exponent is not evenly divisible by `degree`.
  pub fn root(&self, degree: i32) -> Result<Unit, DimensionError> {
    if degree == 0 {
      return Err(DimensionError::ZeroRoot);
    }
    let factors = self
      .factors
      .iter()
      .map(|f| {
        if f.exponent % degree != 0 {
          Err(DimensionError::UnevenRoot {
            symbol: f.unit.symbol().to_owned(),
            exponent: f.exponent,
            degree,
          })
        } else {
          Ok(UnitFactor { unit: f.unit.clone(), exponent: f.exponent / degree })
        }
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Unit { factors, dimension: OnceLock::new() })
  }

  /// Stable external representation as (symbol, exponent) pairs.
  pub fn spec(&self) -> UnitSpec {
    UnitSpec(
      self
        .factors
        .iter()
        .map(|f| (f.unit.symbol().to_owned(), f.exponent))
        .collect(),
    )
  }
}

impl From<BaseUnit> for Unit {
  fn from(unit: BaseUnit) -> Self {
    Unit::new([UnitFactor { unit, exponent: 1 }])
  }
}

impl From<UnitFactor> for Unit {
  fn from(factor: UnitFactor) -> Self {
    Unit::new([factor])
  }
}

impl PartialEq for Unit {
  fn eq(&self, other: &Self) -> bool {
    self.factors == other.factors
  }
}

impl Eq for Unit {}

impl Hash for Unit {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.factors.hash(state);
  }
}

impl<S> Mul<S> for Unit
where
  S: Into<Unit>,
{
  type Output = Unit;

  fn mul(self, rhs: S) -> Unit {
    let mut factors = self.factors;
    factors.extend(rhs.into().factors);
    Unit::new(factors)
  }
}

impl<S> Div<S> for Unit
where
  S: Into<Unit>,
{
  type Output = Unit;

  #[allow(clippy::suspicious_arithmetic_impl)] // Multiply by reciprocal is correct
  fn div(self, rhs: S) -> Unit {
    self * rhs.into().recip()
  }
}

impl Mul for &Unit {
  type Output = Unit;

  fn mul(self, rhs: &Unit) -> Unit {
    self.clone() * rhs.clone()
  }
}

impl Div for &Unit {
  type Output = Unit;

  fn div(self, rhs: &Unit) -> Unit {
    self.clone() / rhs.clone()
  }
}

impl Pow<i32> for Unit {
  type Output = Unit;

  fn pow(self, power: i32) -> Unit {
    Unit::new(
      self
        .factors
        .into_iter()
        .map(|f| UnitFactor { unit: f.unit, exponent: f.exponent * power }),
    )
  }
}

impl Pow<i32> for &Unit {
  type Output = Unit;

  fn pow(self, power: i32) -> Unit {
    self.clone().pow(power)
  }
}

impl One for Unit {
  fn one() -> Self {
    Unit::dimensionless()
  }

  fn is_one(&self) -> bool {
    self.factors.is_empty()
  }
}

impl Display for UnitFactor {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.exponent == 1 {
      write!(f, "{}", self.unit)
    } else {
      write!(f, "{}^{}", self.unit, self.exponent)
    }
  }
}

impl Display for Unit {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.factors.is_empty() {
      write!(f, "1")
    } else {
      write!(f, "{}", self.factors.iter().map(|u| u.to_string()).join(" "))
    }
  }
}
