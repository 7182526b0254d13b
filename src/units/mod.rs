
//! Subsystem for dimensions, units, and conversions between them.

pub mod base;
pub mod composite;
pub mod convert;
pub mod dimension;
pub mod prefix;
pub mod registry;
