
//! Conversion resolution. Every atomic unit carries at most one
//! defining edge to a parent unit, so the definitions form a forest;
//! resolving a unit walks its factors down to the roots of that
//! forest, accumulating an exact factor. Two units are convertible
//! when they share a dimension and their resolved root signatures
//! cancel exactly.

use super::base::BaseUnit;
use super::composite::Unit;
use crate::number::Number;

use num::One;
use thiserror::Error;

use std::collections::BTreeMap;

/// Conversion was requested between units of different dimensions,
/// such as meters to seconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {from} ({from_dimension}) to {to} ({to_dimension})")]
pub struct IncompatibleUnitsError {
  pub from: String,
  pub to: String,
  pub from_dimension: String,
  pub to_dimension: String,
}

/// The units share a dimension but their definitions do not connect:
/// the walk to the conversion roots left factors that do not cancel,
/// or a definition cycle was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no conversion path for {unit}: {reason}")]
pub struct UnresolvableConversionError {
  pub unit: String,
  pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
  #[error("{0}")]
  Incompatible(#[from] IncompatibleUnitsError),
  #[error("{0}")]
  Unresolvable(#[from] UnresolvableConversionError),
}

impl IncompatibleUnitsError {
  pub fn new(from: &Unit, to: &Unit) -> Self {
    Self {
      from: from.to_string(),
      to: to.to_string(),
      from_dimension: from.dimension().to_string(),
      to_dimension: to.dimension().to_string(),
    }
  }
}

/// A unit resolved down to the roots of the conversion forest: the
/// exact multiple of the root units it denotes, together with the
/// root units and their exponents.
#[derive(Debug, Clone)]
struct Resolved {
  factor: Number,
  signature: BTreeMap<BaseUnit, i32>,
}

/// The exact factor `r` such that a magnitude in `from` times `r` is
/// the same physical quantity in `to`. Pure with respect to the
/// units' defining edges; callers wanting memoization go through
/// [`UnitRegistry::ratio`](crate::units::registry::UnitRegistry::ratio).
pub fn ratio(from: &Unit, to: &Unit) -> Result<Number, ConversionError> {
  if from == to {
    return Ok(Number::one());
  }
  if from.dimension() != to.dimension() {
    return Err(IncompatibleUnitsError::new(from, to).into());
  }
  let from_resolved = resolve_unit(from)?;
  let to_resolved = resolve_unit(to)?;
  if from_resolved.signature != to_resolved.signature {
    return Err(
      UnresolvableConversionError {
        unit: from.to_string(),
        reason: format!("definitions of {from} and {to} do not share conversion roots"),
      }
      .into(),
    );
  }
  Ok(from_resolved.factor / to_resolved.factor)
}

fn merge_signature(signature: &mut BTreeMap<BaseUnit, i32>, root: BaseUnit, exponent: i32) {
  let entry = signature.entry(root.clone()).or_insert(0);
  *entry += exponent;
  if *entry == 0 {
    signature.remove(&root);
  }
}

fn resolve_unit(unit: &Unit) -> Result<Resolved, ConversionError> {
  let mut factor = Number::one();
  let mut signature = BTreeMap::new();
  for f in unit.iter() {
    let atom = resolve_atom(&f.unit, &mut Vec::new())?;
    factor = factor * atom.factor.powi(f.exponent);
    for (root, exponent) in atom.signature {
      merge_signature(&mut signature, root, exponent * f.exponent);
    }
  }
  Ok(Resolved { factor, signature })
}

fn resolve_atom(unit: &BaseUnit, visiting: &mut Vec<BaseUnit>) -> Result<Resolved, ConversionError> {
  if visiting.contains(unit) {
    return Err(
      UnresolvableConversionError {
        unit: unit.to_string(),
        reason: format!("definition of {unit} refers back to itself"),
      }
      .into(),
    );
  }
  let Some(edge) = unit.edge() else {
    // A reference unit is its own root.
    let mut signature = BTreeMap::new();
    signature.insert(unit.clone(), 1);
    return Ok(Resolved { factor: Number::one(), signature });
  };
  visiting.push(unit.clone());
  let mut factor = edge.ratio.clone();
  let mut signature = BTreeMap::new();
  for f in edge.parent.iter() {
    let parent_atom = resolve_atom(&f.unit, visiting)?;
    factor = factor * parent_atom.factor.powi(f.exponent);
    for (root, exponent) in parent_atom.signature {
      merge_signature(&mut signature, root, exponent * f.exponent);
    }
  }
  visiting.pop();
  Ok(Resolved { factor, signature })
}
