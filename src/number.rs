
//! Scalar magnitudes for quantities and conversion factors.
//!
//! A [`Number`] is exact (an arbitrary-precision integer or rational)
//! whenever it can be, and demotes to an IEEE 754 float only when an
//! operation or an input forces it. Conversion ratios registered as
//! exact rationals stay exact through arbitrarily long conversion
//! chains; a single float anywhere in a computation makes the result
//! a float.

use num::{BigInt, BigRational, One, Signed, ToPrimitive, Zero};

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops;

/// Magnitude type for quantities, prefixes, and conversion ratios.
///
/// The representation switches automatically: integer arithmetic
/// stays integral, division of exact values produces exact rationals,
/// and any operation touching a float produces a float. Use
/// [`Number::is_exact`] to check which side of the divide a value
/// landed on.
#[derive(Debug, Clone)]
pub struct Number {
  inner: NumberImpl,
}

#[derive(Debug, Clone)]
enum NumberImpl {
  Integer(BigInt),
  Ratio(BigRational),
  Float(f64),
}

/// Pair of numbers promoted to a common representation, so binary
/// operations can be written per-representation.
enum NumberPair {
  Integers(BigInt, BigInt),
  Ratios(BigRational, BigRational),
  Floats(f64, f64),
}

impl NumberPair {
  fn promote(left: Number, right: Number) -> NumberPair {
    use NumberImpl::*;
    use NumberPair::*;
    match (left.inner, right.inner) {
      (Integer(a), Integer(b)) => Integers(a, b),
      (Integer(a), Ratio(b)) => Ratios(BigRational::from_integer(a), b),
      (Ratio(a), Integer(b)) => Ratios(a, BigRational::from_integer(b)),
      (Ratio(a), Ratio(b)) => Ratios(a, b),
      (Integer(a), Float(b)) => Floats(int_to_float(&a), b),
      (Ratio(a), Float(b)) => Floats(rational_to_float(&a), b),
      (Float(a), Integer(b)) => Floats(a, int_to_float(&b)),
      (Float(a), Ratio(b)) => Floats(a, rational_to_float(&b)),
      (Float(a), Float(b)) => Floats(a, b),
    }
  }
}

fn int_to_float(i: &BigInt) -> f64 {
  i.to_f64().unwrap_or(f64::NAN)
}

fn rational_to_float(r: &BigRational) -> f64 {
  r.to_f64().unwrap_or(f64::NAN)
}

impl Number {
  /// Produces an exact rational number. If the denominator divides
  /// evenly into the numerator, the result is stored as an integer.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Number {
    Number::from(BigRational::new(numer.into(), denom.into()))
  }

  /// Whether this number has an exact (integer or rational)
  /// representation, as opposed to a float.
  pub fn is_exact(&self) -> bool {
    !matches!(self.inner, NumberImpl::Float(_))
  }

  /// The value as a float, possibly losing precision. Values too
  /// large for an `f64` become infinite.
  pub fn to_f64(&self) -> f64 {
    match &self.inner {
      NumberImpl::Integer(i) => int_to_float(i),
      NumberImpl::Ratio(r) => rational_to_float(r),
      NumberImpl::Float(f) => *f,
    }
  }

  pub fn abs(&self) -> Number {
    match &self.inner {
      NumberImpl::Integer(i) => Number::from(i.clone().abs()),
      NumberImpl::Ratio(r) => Number::from(r.clone().abs()),
      NumberImpl::Float(f) => Number::from(f.abs()),
    }
  }

  /// The multiplicative inverse.
  ///
  /// Panics if `self` is an exact zero.
  pub fn recip(&self) -> Number {
    match &self.inner {
      NumberImpl::Integer(i) => {
        assert!(!i.is_zero(), "Attempted to take reciprocal of exact zero");
        Number::from(BigRational::new(BigInt::one(), i.clone()))
      }
      NumberImpl::Ratio(r) => Number::from(r.recip()),
      NumberImpl::Float(f) => Number::from(f.recip()),
    }
  }

  /// Raises `self` to an integer power. Exact inputs produce exact
  /// outputs; negative exponents on exact values produce rationals.
  ///
  /// Panics on `0.powi(n)` for negative `n` with an exact zero base.
  pub fn powi(&self, exp: i32) -> Number {
    if exp < 0 {
      return self.recip().powi(-exp);
    }
    match &self.inner {
      NumberImpl::Integer(i) => Number::from(num::pow::pow(i.clone(), exp as usize)),
      NumberImpl::Ratio(r) => Number::from(num::pow::pow(r.clone(), exp as usize)),
      NumberImpl::Float(f) => Number::from(f.powi(exp)),
    }
  }

  /// Simplify representation: a rational with denominator one becomes
  /// an integer. Floats are never promoted back to exact values, even
  /// when integral.
  fn simplify(self) -> Number {
    if let NumberImpl::Ratio(r) = &self.inner {
      if r.denom().is_one() {
        return Number::from(r.numer().clone());
      }
    }
    self
  }
}

impl From<BigInt> for Number {
  fn from(i: BigInt) -> Number {
    Number { inner: NumberImpl::Integer(i) }
  }
}

impl From<BigRational> for Number {
  fn from(r: BigRational) -> Number {
    Number { inner: NumberImpl::Ratio(r) }.simplify()
  }
}

impl From<f64> for Number {
  fn from(f: f64) -> Number {
    Number { inner: NumberImpl::Float(f) }
  }
}

impl From<i64> for Number {
  fn from(i: i64) -> Number {
    Number::from(BigInt::from(i))
  }
}

impl From<i32> for Number {
  fn from(i: i32) -> Number {
    Number::from(BigInt::from(i))
  }
}

impl From<u32> for Number {
  fn from(i: u32) -> Number {
    Number::from(BigInt::from(i))
  }
}

impl ops::Add for Number {
  type Output = Number;

  fn add(self, other: Number) -> Number {
    match NumberPair::promote(self, other) {
      NumberPair::Integers(a, b) => Number::from(a + b),
      NumberPair::Ratios(a, b) => Number::from(a + b),
      NumberPair::Floats(a, b) => Number::from(a + b),
    }
  }
}

impl ops::Add for &Number {
  type Output = Number;

  fn add(self, other: &Number) -> Number {
    self.clone() + other.clone()
  }
}

impl ops::Sub for Number {
  type Output = Number;

  fn sub(self, other: Number) -> Number {
    match NumberPair::promote(self, other) {
      NumberPair::Integers(a, b) => Number::from(a - b),
      NumberPair::Ratios(a, b) => Number::from(a - b),
      NumberPair::Floats(a, b) => Number::from(a - b),
    }
  }
}

impl ops::Sub for &Number {
  type Output = Number;

  fn sub(self, other: &Number) -> Number {
    self.clone() - other.clone()
  }
}

impl ops::Mul for Number {
  type Output = Number;

  fn mul(self, other: Number) -> Number {
    match NumberPair::promote(self, other) {
      NumberPair::Integers(a, b) => Number::from(a * b),
      NumberPair::Ratios(a, b) => Number::from(a * b),
      NumberPair::Floats(a, b) => Number::from(a * b),
    }
  }
}

impl ops::Mul for &Number {
  type Output = Number;

  fn mul(self, other: &Number) -> Number {
    self.clone() * other.clone()
  }
}

// Division does not truncate: two exact integers divide into an
// exact rational. Division by an exact zero panics; division by a
// float zero produces an infinity, as floats do.
impl ops::Div for Number {
  type Output = Number;

  fn div(self, other: Number) -> Number {
    match NumberPair::promote(self, other) {
      NumberPair::Integers(a, b) => {
        assert!(!b.is_zero(), "Attempted to divide by exact zero");
        Number::from(BigRational::new(a, b))
      }
      NumberPair::Ratios(a, b) => {
        assert!(!b.is_zero(), "Attempted to divide by exact zero");
        Number::from(a / b)
      }
      NumberPair::Floats(a, b) => Number::from(a / b),
    }
  }
}

impl ops::Div for &Number {
  type Output = Number;

  fn div(self, other: &Number) -> Number {
    self.clone() / other.clone()
  }
}

impl ops::Neg for Number {
  type Output = Number;

  fn neg(self) -> Number {
    match self.inner {
      NumberImpl::Integer(i) => Number::from(-i),
      NumberImpl::Ratio(r) => Number::from(-r),
      NumberImpl::Float(f) => Number::from(-f),
    }
  }
}

impl ops::Neg for &Number {
  type Output = Number;

  fn neg(self) -> Number {
    -self.clone()
  }
}

impl PartialEq for Number {
  fn eq(&self, other: &Number) -> bool {
    match NumberPair::promote(self.clone(), other.clone()) {
      NumberPair::Integers(a, b) => a == b,
      NumberPair::Ratios(a, b) => a == b,
      NumberPair::Floats(a, b) => a == b,
    }
  }
}

impl PartialOrd for Number {
  fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
    match NumberPair::promote(self.clone(), other.clone()) {
      NumberPair::Integers(a, b) => a.partial_cmp(&b),
      NumberPair::Ratios(a, b) => a.partial_cmp(&b),
      NumberPair::Floats(a, b) => a.partial_cmp(&b),
    }
  }
}

impl Zero for Number {
  fn zero() -> Number {
    Number::from(0)
  }

  fn is_zero(&self) -> bool {
    match &self.inner {
      NumberImpl::Integer(i) => i.is_zero(),
      NumberImpl::Ratio(r) => r.is_zero(),
      NumberImpl::Float(f) => f.is_zero(),
    }
  }
}

impl One for Number {
  fn one() -> Number {
    Number::from(1)
  }

  fn is_one(&self) -> bool {
    match &self.inner {
      NumberImpl::Integer(i) => i.is_one(),
      NumberImpl::Ratio(r) => r.is_one(),
      NumberImpl::Float(f) => f.is_one(),
    }
  }
}

impl Display for Number {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match &self.inner {
      NumberImpl::Integer(i) => write!(f, "{}", i),
      NumberImpl::Ratio(r) => write!(f, "{}/{}", r.numer(), r.denom()),
      NumberImpl::Float(x) => write!(f, "{}", x),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exact_arithmetic_stays_exact() {
    let a = Number::from(3);
    let b = Number::from(4);
    assert_eq!(a.clone() + b.clone(), Number::from(7));
    assert_eq!(a.clone() * b.clone(), Number::from(12));
    assert!((a / b).is_exact());
  }

  #[test]
  fn test_integer_division_produces_ratio() {
    assert_eq!(Number::from(1) / Number::from(3), Number::ratio(1, 3));
    assert_eq!(Number::from(6) / Number::from(3), Number::from(2));
  }

  #[test]
  fn test_ratio_simplifies_to_integer() {
    assert_eq!(Number::ratio(8, 4), Number::from(2));
    assert!(Number::ratio(8, 4).is_exact());
  }

  #[test]
  fn test_float_contaminates() {
    let result = Number::from(1) + Number::from(0.5);
    assert!(!result.is_exact());
    assert_eq!(result, Number::from(1.5));
  }

  #[test]
  fn test_powi() {
    assert_eq!(Number::from(3).powi(2), Number::from(9));
    assert_eq!(Number::from(2).powi(-2), Number::ratio(1, 4));
    assert_eq!(Number::ratio(3, 2).powi(3), Number::ratio(27, 8));
    assert_eq!(Number::from(5).powi(0), Number::from(1));
  }

  #[test]
  fn test_abs() {
    assert_eq!(Number::from(-3).abs(), Number::from(3));
    assert_eq!(Number::ratio(-1, 2).abs(), Number::ratio(1, 2));
    assert_eq!(Number::from(-2.5).abs(), Number::from(2.5));
    assert_eq!(Number::from(4).abs(), Number::from(4));
  }

  #[test]
  fn test_recip() {
    assert_eq!(Number::from(4).recip(), Number::ratio(1, 4));
    assert_eq!(Number::ratio(2, 3).recip(), Number::ratio(3, 2));
  }

  #[test]
  #[should_panic]
  fn test_recip_of_zero_panics() {
    let _ = Number::from(0).recip();
  }

  #[test]
  fn test_cross_representation_equality() {
    assert_eq!(Number::from(2), Number::from(2.0));
    assert_eq!(Number::ratio(1, 2), Number::from(0.5));
    assert_ne!(Number::ratio(1, 3), Number::from(0.5));
  }

  #[test]
  fn test_ordering() {
    assert!(Number::ratio(1, 3) < Number::ratio(1, 2));
    assert!(Number::from(2) > Number::from(1.5));
    assert!(Number::from(f64::NAN).partial_cmp(&Number::from(1)).is_none());
  }

  #[test]
  fn test_to_f64() {
    assert_eq!(Number::ratio(1, 4).to_f64(), 0.25);
    assert_eq!(Number::from(3).to_f64(), 3.0);
  }

  #[test]
  fn test_display() {
    assert_eq!(Number::from(42).to_string(), "42");
    assert_eq!(Number::ratio(1, 3).to_string(), "1/3");
    assert_eq!(Number::from(2.5).to_string(), "2.5");
  }
}
