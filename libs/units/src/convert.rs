//! Pairwise conversion rules.
//!
//! A rule's formula is a calculator expression fragment that is appended to
//! the source value and re-evaluated by the engine, so `25` C to F becomes
//! the expression `25*9/5+32.`. Rules are directional; both directions of a
//! pair must be listed to convert both ways.

use crate::catalog::Category;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct ConversionRule {
    pub category: Category,
    pub from: &'static str,
    pub to: &'static str,
    pub formula: &'static str,
}

macro_rules! rule {
    ($cat:ident, $from:literal, $to:literal, $formula:literal) => {
        ConversionRule {
            category: Category::$cat,
            from: $from,
            to: $to,
            formula: $formula,
        }
    };
}

pub static CONVERSIONS: &[ConversionRule] = &[
    rule!(Angle, "deg", "rad", "*pi/180"),
    rule!(Angle, "rad", "deg", "*180/pi"),
    rule!(Temperature, "C", "F", "*9/5+32."),
    rule!(Temperature, "F", "C", "- 32.*5/9"),
    rule!(Length, "mm", "cm", "/10."),
    rule!(Length, "mm", "m", "/1000."),
    rule!(Length, "mm", "km", "/1000000."),
    rule!(Length, "mm", "in", "/25.4"),
    rule!(Length, "mm", "ft", "/304.8"),
    rule!(Length, "mm", "yds", "/914.4"),
    rule!(Length, "mm", "mi", "/1609344."),
    rule!(Length, "cm", "mm", "*10."),
    rule!(Length, "cm", "m", "/100."),
    rule!(Length, "cm", "km", "/100000."),
    rule!(Length, "cm", "in", "/2.54"),
    rule!(Length, "cm", "ft", "/30.48"),
    rule!(Length, "cm", "yds", "/91.44"),
    rule!(Length, "cm", "mi", "/160934.4"),
    rule!(Length, "m", "mm", "*1000."),
    rule!(Length, "m", "cm", "*100."),
    rule!(Length, "m", "km", "/1000."),
    rule!(Length, "m", "in", "*100./2.54"),
    rule!(Length, "m", "ft", "/0.3048"),
    rule!(Length, "m", "yds", "/0.9144"),
    rule!(Length, "m", "mi", "/1609.344"),
    rule!(Length, "km", "mm", "*1000000."),
    rule!(Length, "km", "cm", "*100000."),
    rule!(Length, "km", "m", "*1000."),
    rule!(Length, "km", "in", "*100000./2.54"),
    rule!(Length, "km", "ft", "*1000./0.3048"),
    rule!(Length, "km", "yds", "*1000./0.9144"),
    rule!(Length, "km", "mi", "/1.609344"),
    rule!(Length, "in", "mm", "*25.4"),
    rule!(Length, "in", "cm", "*2.54"),
    rule!(Length, "in", "m", "*2.54/100."),
    rule!(Length, "in", "km", "*2.54/100000."),
    rule!(Length, "in", "ft", "/12."),
    rule!(Length, "in", "yds", "/36."),
    rule!(Length, "in", "mi", "/63360."),
    rule!(Length, "ft", "mm", "*304.8"),
    rule!(Length, "ft", "cm", "*30.48"),
    rule!(Length, "ft", "m", "*0.3048"),
    rule!(Length, "ft", "km", "*0.3048/1000."),
    rule!(Length, "ft", "in", "*12."),
    rule!(Length, "ft", "yds", "/3."),
    rule!(Length, "ft", "mi", "/5280."),
    rule!(Length, "yds", "mm", "*914.4"),
    rule!(Length, "yds", "cm", "*91.44"),
    rule!(Length, "yds", "m", "*0.9144"),
    rule!(Length, "yds", "km", "*0.9144/1000."),
    rule!(Length, "yds", "in", "*36."),
    rule!(Length, "yds", "ft", "*3."),
    rule!(Length, "yds", "mi", "/1760."),
    rule!(Length, "mi", "mm", "*1609344."),
    rule!(Length, "mi", "cm", "*160934.4"),
    rule!(Length, "mi", "m", "*1609.344"),
    rule!(Length, "mi", "km", "*1.609344"),
    rule!(Length, "mi", "in", "*63360."),
    rule!(Length, "mi", "ft", "*5280."),
    rule!(Length, "mi", "yds", "*1760."),
    rule!(Speed, "mph", "kph", "*1.609344"),
    rule!(Speed, "kph", "mph", "/1.609344"),
];

/// Look up the rule converting `from` to `to` within `category`.
pub fn find_conversion(
    category: Category,
    from: &str,
    to: &str,
) -> Result<&'static ConversionRule> {
    CONVERSIONS
        .iter()
        .find(|r| r.category == category && r.from == from && r.to == to)
        .ok_or_else(|| Error::NoConversion {
            from: from.to_string(),
            to: to.to_string(),
        })
}
