
//! Dimensional analysis and unit conversion with exact rational
//! arithmetic.
//!
//! The crate builds up in layers: [`Dimension`] values describe what
//! a unit measures, [`Unit`] values are canonical products of atomic
//! units, and [`Quantity`] pairs a magnitude with a unit. Conversion
//! ratios are resolved through each atomic unit's defining edge and
//! stay exact as long as the inputs are exact, so three miles is
//! precisely 15840 feet, not a float approximation of it.
//!
//! Definitions live in a [`UnitRegistry`]:
//!
//! ```
//! use mensura::{Dimension, Quantity, Unit, UnitRegistry};
//!
//! # fn main() -> Result<(), mensura::Error> {
//! let registry = UnitRegistry::new();
//! let length = registry.define_base_dimension("Length", "L")?;
//! let meter = registry.define_unit("meter", "m", Dimension::base(length))?;
//! let kilo = registry.define_prefix(10, 3, "kilo", "k")?;
//! let kilometer = registry.define_scaled_unit(&kilo, &meter)?;
//!
//! let distance = Quantity::of(3, kilometer);
//! let in_meters = distance.convert_to(&Unit::from(meter))?;
//! assert_eq!(in_meters.to_string(), "3000 m");
//! # Ok(())
//! # }
//! ```
//!
//! Logarithmic units such as the decibel live in [`level`], and
//! quantities with uncertainty in [`measurement`].

pub mod error;
pub mod level;
pub mod measurement;
pub mod number;
pub mod quantity;
pub mod units;

pub use error::Error;
pub use level::{IncompatibleLogarithmicUnitsError, Level, LevelError, Logarithm, LogarithmicUnit};
pub use measurement::Measurement;
pub use number::Number;
pub use quantity::{Quantity, QuantitySpec, Tolerance};
pub use units::base::BaseUnit;
pub use units::composite::{Unit, UnitFactor, UnitSpec};
pub use units::convert::{
  ratio, ConversionError, IncompatibleUnitsError, UnresolvableConversionError,
};
pub use units::dimension::{BaseDimension, Dimension, DimensionError};
pub use units::prefix::{Prefix, IEC_PREFIXES, SI_PREFIXES};
pub use units::registry::{DefineError, UnitRegistry, UnknownSymbolError};
