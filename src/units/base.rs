
//! Atomic units: named, optionally prefixed primitives that the unit
//! algebra does not decompose further. Each atomic unit carries a
//! dimension and at most one defining conversion edge to another unit
//! of the same dimension; the edges form a forest whose roots are the
//! coherent reference units of their dimensions.

use super::composite::Unit;
use super::dimension::Dimension;
use super::prefix::Prefix;
use crate::number::Number;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, OnceLock};

/// A named atomic unit. Cheap to clone; equality and ordering are by
/// symbol, which the registry keeps unique.
#[derive(Debug, Clone)]
pub struct BaseUnit(Arc<BaseUnitData>);

#[derive(Debug)]
struct BaseUnitData {
  name: String,
  symbol: String,
  dimension: Dimension,
  prefix: Prefix,
  /// The defining conversion edge, set at most once. `None` marks
  /// this unit as the reference (root) of its conversion tree.
  edge: OnceLock<ConversionEdge>,
}

/// A defining conversion: one of this unit equals `ratio` of
/// `parent`. The parent may be composite (for example, a knot is
/// defined as a ratio of meters per second).
#[derive(Debug, Clone)]
pub struct ConversionEdge {
  pub ratio: Number,
  pub parent: Unit,
}

impl BaseUnit {
  /// Constructs a new reference unit: the root of a conversion tree,
  /// with an implicit factor of one.
  pub fn new(name: impl Into<String>, symbol: impl Into<String>, dimension: Dimension) -> Self {
    BaseUnit(Arc::new(BaseUnitData {
      name: name.into(),
      symbol: symbol.into(),
      dimension,
      prefix: Prefix::identity(),
      edge: OnceLock::new(),
    }))
  }

  /// Constructs a prefixed variant of `unit`: same dimension, symbol
  /// and name concatenated with the prefix's, and a defining edge
  /// back to `unit` with the prefix's exact factor. The registry
  /// interns the result by (prefix, unit) so repeated applications
  /// yield the same value.
  ///
  /// When `unit` already carries a prefix of the same base, the
  /// recorded prefix is their composition. Prefixes of different
  /// bases have no single (base, exponent) form, so the metadata
  /// keeps only the outer prefix; the combined scale is still exact,
  /// carried by the chain of conversion edges.
  pub fn scaled(prefix: Prefix, unit: &BaseUnit) -> Self {
    let applied = prefix.factor();
    let composed = prefix
      .compose(unit.prefix())
      .unwrap_or_else(|| prefix.clone());
    let edge = OnceLock::new();
    edge
      .set(ConversionEdge {
        ratio: applied,
        parent: Unit::from(unit.clone()),
      })
      .expect("Freshly created OnceLock cannot already be set");
    BaseUnit(Arc::new(BaseUnitData {
      name: format!("{}{}", prefix.name(), unit.name()),
      symbol: format!("{}{}", prefix.symbol(), unit.symbol()),
      dimension: unit.dimension().clone(),
      prefix: composed,
      edge,
    }))
  }

  pub fn name(&self) -> &str {
    &self.0.name
  }

  pub fn symbol(&self) -> &str {
    &self.0.symbol
  }

  pub fn dimension(&self) -> &Dimension {
    &self.0.dimension
  }

  pub fn prefix(&self) -> &Prefix {
    &self.0.prefix
  }

  /// Whether this unit is the reference (root) of its conversion
  /// tree.
  pub fn is_reference(&self) -> bool {
    self.0.edge.get().is_none()
  }

  pub(crate) fn edge(&self) -> Option<&ConversionEdge> {
    self.0.edge.get()
  }

  /// Installs the defining conversion edge. Returns the rejected edge
  /// if one was already installed (set-once semantics; the registry
  /// checks the rejected edge for consistency).
  pub(crate) fn install_edge(&self, edge: ConversionEdge) -> Result<(), ConversionEdge> {
    self.0.edge.set(edge)
  }
}

impl PartialEq for BaseUnit {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0) || self.0.symbol == other.0.symbol
  }
}

impl Eq for BaseUnit {}

impl PartialOrd for BaseUnit {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for BaseUnit {
  fn cmp(&self, other: &Self) -> Ordering {
    self.0.symbol.cmp(&other.0.symbol)
  }
}

impl std::hash::Hash for BaseUnit {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.0.symbol.hash(state);
  }
}

impl Display for BaseUnit {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0.symbol)
  }
}
