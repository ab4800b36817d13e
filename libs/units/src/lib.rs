#![forbid(unsafe_code)]

//! Unit catalogue and conversion rules for the mensura calculator.
//!
//! Units are identified two ways: a *spelling* as it appears in an expression
//! (`"D"`, `"deg"`, `"degC"`) and a canonical *key* used to match conversion
//! rules (`"deg"`, `"C"`). Several spellings may share one key. Conversion
//! rules are directional and carry their transformation as a calculator
//! expression fragment, which the engine evaluates through its own pipeline.

mod catalog;
mod convert;
mod error;

pub use catalog::{find_unit, Category, Unit, UnitDef, UNITS};
pub use convert::{find_conversion, ConversionRule, CONVERSIONS};
pub use error::{Error, Result};
