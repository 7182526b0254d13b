
//! The unit registry: the process-wide catalog of base dimensions,
//! prefixes, and units. All tables are append-only behind an interior
//! `RwLock`; the first write for a symbol wins and later conflicting
//! writes are rejected, so readers never observe a definition
//! changing. The registry also interns composite units and memoizes
//! conversion ratios, purely as a cache; equality of units never
//! depends on interning.

use super::base::{BaseUnit, ConversionEdge};
use super::composite::{Unit, UnitSpec};
use super::convert::{self, ConversionError};
use super::dimension::{BaseDimension, Dimension};
use super::prefix::Prefix;
use crate::number::Number;

use thiserror::Error;

use std::collections::HashMap;
use std::sync::RwLock;

/// A symbol lookup failed because nothing was registered under it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownSymbolError {
  #[error("unknown unit symbol {0:?}")]
  Unit(String),
  #[error("unknown prefix symbol {0:?}")]
  Prefix(String),
  #[error("unknown dimension symbol {0:?}")]
  Dimension(String),
}

/// A definition was rejected by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefineError {
  #[error("symbol {symbol:?} is already defined as a different {kind}")]
  ConflictingSymbol { kind: &'static str, symbol: String },
  #[error("conversion from {unit} to {parent} crosses dimensions")]
  DimensionMismatch { unit: String, parent: String },
  #[error("unit {unit} already has a conversion with a different ratio")]
  InconsistentConversion { unit: String },
}

#[derive(Debug, Default)]
struct Tables {
  base_dimensions: HashMap<String, BaseDimension>,
  dimension_names: HashMap<Dimension, (String, String)>,
  prefixes: HashMap<String, Prefix>,
  units: HashMap<String, BaseUnit>,
  scaled: HashMap<(String, String), BaseUnit>,
  interned: HashMap<Unit, Unit>,
  ratios: HashMap<(Unit, Unit), Number>,
}

/// The catalog of registered dimensions, prefixes, and units.
/// Construct one at startup and register everything through it; all
/// methods take `&self` and are safe to call concurrently.
#[derive(Debug, Default)]
pub struct UnitRegistry {
  tables: RwLock<Tables>,
}

impl UnitRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a base dimension under its symbol. Re-registering the
  /// same name and symbol returns the original value; a different
  /// name under an existing symbol is rejected.
  pub fn define_base_dimension(
    &self,
    name: impl Into<String>,
    symbol: impl Into<String>,
  ) -> Result<BaseDimension, DefineError> {
    let name = name.into();
    let symbol = symbol.into();
    let mut tables = self.tables.write().unwrap();
    if let Some(existing) = tables.base_dimensions.get(&symbol) {
      if existing.name() == name {
        return Ok(existing.clone());
      }
      return Err(DefineError::ConflictingSymbol { kind: "dimension", symbol });
    }
    let dimension = BaseDimension::new(name, symbol.clone());
    tables.base_dimensions.insert(symbol, dimension.clone());
    Ok(dimension)
  }

  /// Gives a derived dimension a name and symbol, such as Speed for
  /// length over time. Naming never affects dimension equality.
  pub fn define_dimension(
    &self,
    dimension: Dimension,
    name: impl Into<String>,
    symbol: impl Into<String>,
  ) -> Result<(), DefineError> {
    let name = name.into();
    let symbol = symbol.into();
    let mut tables = self.tables.write().unwrap();
    if let Some((existing_name, _)) = tables.dimension_names.get(&dimension) {
      if *existing_name == name {
        return Ok(());
      }
      return Err(DefineError::ConflictingSymbol { kind: "dimension", symbol });
    }
    tables.dimension_names.insert(dimension, (name, symbol));
    Ok(())
  }

  /// The registered name of a derived dimension, if any.
  pub fn dimension_name(&self, dimension: &Dimension) -> Option<String> {
    let tables = self.tables.read().unwrap();
    tables.dimension_names.get(dimension).map(|(name, _)| name.clone())
  }

  pub fn define_prefix(
    &self,
    base: u32,
    exponent: i32,
    name: impl Into<String>,
    symbol: impl Into<String>,
  ) -> Result<Prefix, DefineError> {
    let prefix = Prefix::new(base, exponent, name, symbol.into());
    let mut tables = self.tables.write().unwrap();
    if let Some(existing) = tables.prefixes.get(prefix.symbol()) {
      if *existing == prefix {
        return Ok(existing.clone());
      }
      return Err(DefineError::ConflictingSymbol {
        kind: "prefix",
        symbol: prefix.symbol().to_owned(),
      });
    }
    tables.prefixes.insert(prefix.symbol().to_owned(), prefix.clone());
    Ok(prefix)
  }

  /// Registers every prefix in a catalog, such as
  /// [`SI_PREFIXES`](crate::units::prefix::SI_PREFIXES) or
  /// [`IEC_PREFIXES`](crate::units::prefix::IEC_PREFIXES).
  pub fn define_prefix_catalog(&self, catalog: &[Prefix]) -> Result<(), DefineError> {
    for prefix in catalog {
      self.define_prefix(prefix.base(), prefix.exponent(), prefix.name(), prefix.symbol())?;
    }
    Ok(())
  }

  /// Registers a new atomic unit under its symbol. The unit starts as
  /// the reference of its own conversion tree; connect it with
  /// [`define_conversion`](Self::define_conversion).
  pub fn define_unit(
    &self,
    name: impl Into<String>,
    symbol: impl Into<String>,
    dimension: Dimension,
  ) -> Result<BaseUnit, DefineError> {
    let name = name.into();
    let symbol = symbol.into();
    let mut tables = self.tables.write().unwrap();
    if let Some(existing) = tables.units.get(&symbol) {
      if existing.name() == name && *existing.dimension() == dimension {
        return Ok(existing.clone());
      }
      return Err(DefineError::ConflictingSymbol { kind: "unit", symbol });
    }
    let unit = BaseUnit::new(name, symbol.clone(), dimension);
    tables.units.insert(symbol, unit.clone());
    Ok(unit)
  }

  /// Registers the prefixed variant of an atomic unit, interned by
  /// (prefix, unit) so applying the same prefix twice yields the same
  /// value.
  pub fn define_scaled_unit(&self, prefix: &Prefix, unit: &BaseUnit) -> Result<BaseUnit, DefineError> {
    let key = (prefix.symbol().to_owned(), unit.symbol().to_owned());
    {
      let tables = self.tables.read().unwrap();
      if let Some(existing) = tables.scaled.get(&key) {
        return Ok(existing.clone());
      }
    }
    let scaled = BaseUnit::scaled(prefix.clone(), unit);
    let mut tables = self.tables.write().unwrap();
    if let Some(existing) = tables.scaled.get(&key) {
      // Another writer got here first.
      return Ok(existing.clone());
    }
    if let Some(existing) = tables.units.get(scaled.symbol()) {
      if *existing != scaled {
        return Err(DefineError::ConflictingSymbol {
          kind: "unit",
          symbol: scaled.symbol().to_owned(),
        });
      }
    } else {
      tables.units.insert(scaled.symbol().to_owned(), scaled.clone());
    }
    tables.scaled.insert(key, scaled.clone());
    Ok(scaled)
  }

  /// Installs the defining conversion edge of `unit`: one `unit`
  /// equals `ratio` of `parent`. Set-once; a duplicate definition is
  /// accepted only when it is consistent with the installed one.
  pub fn define_conversion(&self, unit: &BaseUnit, ratio: Number, parent: &Unit) -> Result<(), DefineError> {
    if unit.dimension() != parent.dimension() {
      return Err(DefineError::DimensionMismatch {
        unit: unit.to_string(),
        parent: parent.to_string(),
      });
    }
    let edge = ConversionEdge { ratio: ratio.clone(), parent: parent.clone() };
    if unit.install_edge(edge).is_err() {
      let installed = convert::ratio(&Unit::from(unit.clone()), parent);
      if installed != Ok(ratio) {
        return Err(DefineError::InconsistentConversion { unit: unit.to_string() });
      }
    }
    Ok(())
  }

  pub fn unit_by_symbol(&self, symbol: &str) -> Result<BaseUnit, UnknownSymbolError> {
    let tables = self.tables.read().unwrap();
    tables
      .units
      .get(symbol)
      .cloned()
      .ok_or_else(|| UnknownSymbolError::Unit(symbol.to_owned()))
  }

  pub fn prefix_by_symbol(&self, symbol: &str) -> Result<Prefix, UnknownSymbolError> {
    let tables = self.tables.read().unwrap();
    tables
      .prefixes
      .get(symbol)
      .cloned()
      .ok_or_else(|| UnknownSymbolError::Prefix(symbol.to_owned()))
  }

  pub fn base_dimension_by_symbol(&self, symbol: &str) -> Result<BaseDimension, UnknownSymbolError> {
    let tables = self.tables.read().unwrap();
    tables
      .base_dimensions
      .get(symbol)
      .cloned()
      .ok_or_else(|| UnknownSymbolError::Dimension(symbol.to_owned()))
  }

  /// Reconstructs a dimension from its (symbol, exponent) list.
  pub fn dimension_from_spec(&self, spec: &[(String, i32)]) -> Result<Dimension, UnknownSymbolError> {
    let mut exponents = Vec::with_capacity(spec.len());
    for (symbol, exponent) in spec {
      exponents.push((self.base_dimension_by_symbol(symbol)?, *exponent));
    }
    Ok(Dimension::new(exponents))
  }

  /// Reconstructs a composite unit from its external representation,
  /// interning the result.
  pub fn unit_from_spec(&self, spec: &UnitSpec) -> Result<Unit, UnknownSymbolError> {
    let mut factors = Vec::with_capacity(spec.0.len());
    for (symbol, exponent) in &spec.0 {
      let unit = self.unit_by_symbol(symbol)?;
      factors.push(super::composite::UnitFactor { unit, exponent: *exponent });
    }
    Ok(self.intern(Unit::new(factors)))
  }

  /// Returns the cached instance of a canonical unit, caching `unit`
  /// itself if it is the first of its kind.
  pub fn intern(&self, unit: Unit) -> Unit {
    {
      let tables = self.tables.read().unwrap();
      if let Some(existing) = tables.interned.get(&unit) {
        return existing.clone();
      }
    }
    let mut tables = self.tables.write().unwrap();
    tables
      .interned
      .entry(unit.clone())
      .or_insert(unit)
      .clone()
  }

  /// The conversion ratio from `from` to `to`, memoized on success.
  pub fn ratio(&self, from: &Unit, to: &Unit) -> Result<Number, ConversionError> {
    let key = (from.clone(), to.clone());
    {
      let tables = self.tables.read().unwrap();
      if let Some(cached) = tables.ratios.get(&key) {
        return Ok(cached.clone());
      }
    }
    let ratio = convert::ratio(from, to)?;
    let mut tables = self.tables.write().unwrap();
    tables.ratios.insert(key, ratio.clone());
    Ok(ratio)
  }
}
