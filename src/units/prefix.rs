
//! Multiplicative prefixes: named scale factors applied to atomic
//! units, such as the SI powers of ten or the IEC binary prefixes.

use crate::number::Number;

use num::One;
use once_cell::sync::Lazy;

use std::fmt::{self, Display, Formatter};

/// The SI powers-of-ten prefixes, from quetta down to quecto.
pub static SI_PREFIXES: Lazy<Vec<Prefix>> = Lazy::new(|| {
  vec![
    Prefix::new(10, 30, "quetta", "Q"),
    Prefix::new(10, 27, "ronna", "R"),
    Prefix::new(10, 24, "yotta", "Y"),
    Prefix::new(10, 21, "zetta", "Z"),
    Prefix::new(10, 18, "exa", "E"),
    Prefix::new(10, 15, "peta", "P"),
    Prefix::new(10, 12, "tera", "T"),
    Prefix::new(10, 9, "giga", "G"),
    Prefix::new(10, 6, "mega", "M"),
    Prefix::new(10, 3, "kilo", "k"),
    Prefix::new(10, 2, "hecto", "h"),
    Prefix::new(10, 1, "deca", "da"),
    Prefix::new(10, -1, "deci", "d"),
    Prefix::new(10, -2, "centi", "c"),
    Prefix::new(10, -3, "milli", "m"),
    Prefix::new(10, -6, "micro", "μ"),
    Prefix::new(10, -9, "nano", "n"),
    Prefix::new(10, -12, "pico", "p"),
    Prefix::new(10, -15, "femto", "f"),
    Prefix::new(10, -18, "atto", "a"),
    Prefix::new(10, -21, "zepto", "z"),
    Prefix::new(10, -24, "yocto", "y"),
    Prefix::new(10, -27, "ronto", "r"),
    Prefix::new(10, -30, "quecto", "q"),
  ]
});

/// The IEC binary prefixes, kibi through yobi.
pub static IEC_PREFIXES: Lazy<Vec<Prefix>> = Lazy::new(|| {
  vec![
    Prefix::new(2, 10, "kibi", "Ki"),
    Prefix::new(2, 20, "mebi", "Mi"),
    Prefix::new(2, 30, "gibi", "Gi"),
    Prefix::new(2, 40, "tebi", "Ti"),
    Prefix::new(2, 50, "pebi", "Pi"),
    Prefix::new(2, 60, "exbi", "Ei"),
    Prefix::new(2, 70, "zebi", "Zi"),
    Prefix::new(2, 80, "yobi", "Yi"),
  ]
});

/// A named multiplicative factor, stored as a (base, exponent) pair
/// so the factor is exact: `kilo` is `10^3`, `kibi` is `2^10`. Two
/// prefixes are equal iff their base and exponent are equal; the
/// identity prefix (factor one) is `Prefix::identity()`.
#[derive(Debug, Clone)]
pub struct Prefix {
  base: u32,
  exponent: i32,
  name: String,
  symbol: String,
}

impl Prefix {
  pub fn new(base: u32, exponent: i32, name: impl Into<String>, symbol: impl Into<String>) -> Self {
    Self {
      base,
      exponent,
      name: name.into(),
      symbol: symbol.into(),
    }
  }

  /// The prefix of factor one. Applying it to a unit is a no-op.
  pub fn identity() -> Self {
    Self::new(0, 0, "", "")
  }

  pub fn is_identity(&self) -> bool {
    self.exponent == 0
  }

  pub fn base(&self) -> u32 {
    self.base
  }

  pub fn exponent(&self) -> i32 {
    self.exponent
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  /// The exact scale factor this prefix denotes.
  pub fn factor(&self) -> Number {
    if self.is_identity() {
      return Number::one();
    }
    Number::from(self.base).powi(self.exponent)
  }

  /// Composes two prefixes into one, multiplying their factors.
  /// Succeeds when either side is the identity or both share a base;
  /// prefixes of different bases have no common (base, exponent) form
  /// and the caller should fold [`Prefix::factor`] into the unit
  /// factor instead.
  pub fn compose(&self, other: &Prefix) -> Option<Prefix> {
    if other.is_identity() {
      return Some(self.clone());
    }
    if self.is_identity() {
      return Some(other.clone());
    }
    if self.base == other.base {
      let prefix = Prefix {
        base: self.base,
        exponent: self.exponent + other.exponent,
        name: format!("{}{}", self.name, other.name),
        symbol: format!("{}{}", self.symbol, other.symbol),
      };
      return Some(prefix);
    }
    None
  }
}

impl PartialEq for Prefix {
  fn eq(&self, other: &Self) -> bool {
    if self.is_identity() && other.is_identity() {
      return true;
    }
    self.base == other.base && self.exponent == other.exponent
  }
}

impl Eq for Prefix {}

impl std::hash::Hash for Prefix {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    if self.is_identity() {
      // All identity prefixes are equal regardless of base.
      0u32.hash(state);
      0i32.hash(state);
    } else {
      self.base.hash(state);
      self.exponent.hash(state);
    }
  }
}

impl Display for Prefix {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.symbol)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kilo() -> Prefix {
    Prefix::new(10, 3, "kilo", "k")
  }

  fn milli() -> Prefix {
    Prefix::new(10, -3, "milli", "m")
  }

  fn kibi() -> Prefix {
    Prefix::new(2, 10, "kibi", "Ki")
  }

  #[test]
  fn test_factor_is_exact() {
    assert_eq!(kilo().factor(), Number::from(1000));
    assert_eq!(milli().factor(), Number::ratio(1, 1000));
    assert_eq!(kibi().factor(), Number::from(1024));
  }

  #[test]
  fn test_identity_factor() {
    assert_eq!(Prefix::identity().factor(), Number::one());
    assert!(Prefix::identity().is_identity());
  }

  #[test]
  fn test_equality_by_base_and_exponent() {
    assert_eq!(kilo(), Prefix::new(10, 3, "chiliad", "k'"));
    assert_ne!(kilo(), kibi());
    assert_ne!(kilo(), milli());
  }

  #[test]
  fn test_compose_same_base() {
    let mega = kilo().compose(&kilo()).unwrap();
    assert_eq!(mega.factor(), Number::from(1_000_000));
    let one = kilo().compose(&milli()).unwrap();
    assert_eq!(one.factor(), Number::one());
  }

  #[test]
  fn test_compose_with_identity() {
    assert_eq!(kilo().compose(&Prefix::identity()), Some(kilo()));
    assert_eq!(Prefix::identity().compose(&kibi()), Some(kibi()));
  }

  #[test]
  fn test_compose_mixed_bases_unsupported() {
    assert_eq!(kilo().compose(&kibi()), None);
  }

  #[test]
  fn test_standard_catalogs() {
    assert!(SI_PREFIXES.contains(&kilo()));
    assert!(SI_PREFIXES.contains(&milli()));
    assert!(IEC_PREFIXES.contains(&kibi()));
    assert!(SI_PREFIXES.iter().all(|p| p.base() == 10));
    assert!(IEC_PREFIXES.iter().all(|p| p.base() == 2));
  }
}
