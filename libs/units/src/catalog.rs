//! Static unit catalogue.
//!
//! The table reproduces the calculator's surface spellings grouped by
//! category. Lookup is longest-spelling-prefix match over the whole table,
//! keeping the first maximal hit, so `"degC"` wins over `"deg"` and `"D"`.

use once_cell::sync::Lazy;

/// Physical category a unit belongs to. Conversion rules only ever relate
/// units within one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Angle,
    Temperature,
    Length,
    Frequency,
    Wavelength,
    Speed,
    Mass,
    Force,
    Energy,
    Pressure,
    Voltage,
    Current,
    Resistance,
    Capacitance,
    Inductance,
    Time,
}

/// One row of the unit catalogue.
#[derive(Debug)]
pub struct UnitDef {
    /// Canonical key used to match conversion rules.
    pub key: &'static str,
    /// Surface spelling as parsed out of an expression.
    pub spelling: &'static str,
    pub category: Category,
    /// Conversions for this unit always run in floating point.
    pub expect_float: bool,
    /// Suffix appended when a value of this unit is displayed.
    pub display: &'static str,
    pub description: &'static str,
}

macro_rules! unit {
    ($key:literal, $spelling:literal, $cat:ident, $display:literal, $desc:literal) => {
        UnitDef {
            key: $key,
            spelling: $spelling,
            category: Category::$cat,
            expect_float: true,
            display: $display,
            description: $desc,
        }
    };
}

pub static UNITS: &[UnitDef] = &[
    // Angle
    unit!("deg", "D", Angle, "deg", "degrees"),
    unit!("rad", "R", Angle, "rad", "radians"),
    unit!("deg", "deg", Angle, "deg", "degrees"),
    unit!("rad", "rad", Angle, "rad", "radians"),
    // Temperature
    unit!("C", "C", Temperature, "C", "Celsius"),
    unit!("F", "F", Temperature, "F", "Fahrenheit"),
    unit!("K", "K", Temperature, "K", "Kelvin"),
    unit!("C", "degC", Temperature, "C", "Celsius"),
    unit!("F", "degF", Temperature, "F", "Fahrenheit"),
    unit!("K", "degK", Temperature, "K", "Kelvin"),
    // Length
    unit!("mm", "mm", Length, "mm", "millimeters"),
    unit!("cm", "cm", Length, "cm", "centimeters"),
    unit!("m", "m", Length, "m", "meters"),
    unit!("km", "km", Length, "km", "kilometers"),
    unit!("in", "\"", Length, "in", "inches"),
    unit!("in", "in", Length, "in", "inches"),
    unit!("ft", "ft", Length, "ft", "feet"),
    unit!("yds", "yds", Length, "yds", "yards"),
    unit!("mi", "mi", Length, "mi", "miles"),
    unit!("au", "au", Length, "au", "astronomical units"),
    unit!("pars", "pars", Length, "pars", "parsecs"),
    // Frequency
    unit!("Hz", "hz", Frequency, "Hz", "Hertz"),
    unit!("Hz", "Hz", Frequency, "Hz", "Hertz"),
    unit!("kHz", "kHz", Frequency, "kHz", "kilo-Hertz"),
    unit!("kHz", "khz", Frequency, "kHz", "kilo-Hertz"),
    unit!("MHz", "MHz", Frequency, "MHz", "mega-Hertz"),
    unit!("MHz", "mhz", Frequency, "MHz", "mega-Hertz"),
    unit!("GHz", "GHz", Frequency, "GHz", "giga-Hertz"),
    unit!("GHz", "ghz", Frequency, "GHz", "giga-Hertz"),
    // Wavelength
    unit!("Ang", "Ang", Wavelength, "A", "Angstroms"),
    unit!("Ang", "ang", Wavelength, "A", "Angstroms"),
    unit!("waves", "w", Wavelength, "waves", "waves"),
    unit!("waves", "wave", Wavelength, "waves", "waves"),
    unit!("ftw", "ftw", Wavelength, "ft-wave", "foot-wavelength"),
    // Speed
    unit!("mph", "mph", Speed, "mph", "miles-per-hour"),
    unit!("kph", "kph", Speed, "kph", "kilometers-per-hour"),
    // Mass
    unit!("g", "g", Mass, "g", "grams"),
    unit!("mg", "mg", Mass, "mg", "milligrams"),
    unit!("kg", "kg", Mass, "kg", "kilograms"),
    // Force
    unit!("N", "N", Force, "N", "Newtons"),
    unit!("ftlbs", "ftlbs", Force, "ftlbs", "foot-pounds"),
    unit!("ftlbs", "ftlb", Force, "ftlbs", "foot-pounds"),
    // Energy
    unit!("J", "J", Energy, "J", "Joules"),
    // Pressure
    unit!("atm", "atm", Pressure, "atm", "atmospheres"),
    unit!("psi", "psi", Pressure, "psi", "pounds-per-square-inch"),
    unit!("kPa", "kpa", Pressure, "kPa", "kilo-Pascals"),
    unit!("kPa", "kPa", Pressure, "kPa", "kilo-Pascals"),
    // Voltage
    unit!("kV", "kV", Voltage, "kV", "kilo-Volts"),
    unit!("V", "V", Voltage, "V", "Volts"),
    unit!("mV", "mV", Voltage, "mV", "milli-Volts"),
    unit!("uV", "uV", Voltage, "uV", "micro-Volts"),
    // Current
    unit!("A", "A", Current, "A", "Amps"),
    unit!("mA", "mA", Current, "mA", "milli-Amps"),
    unit!("uA", "uA", Current, "uA", "micro-Amps"),
    // Resistance
    unit!("Ohm", "Ohm", Resistance, "Ohm", "Ohms"),
    unit!("Ohm", "ohm", Resistance, "Ohm", "Ohms"),
    unit!("kOhm", "kOhm", Resistance, "kOhm", "kilo-Ohms"),
    unit!("kOhm", "kohm", Resistance, "kOhm", "kilo-Ohms"),
    unit!("MOhm", "MOhm", Resistance, "MOhm", "mega-Ohms"),
    unit!("MOhm", "mohm", Resistance, "MOhm", "mega-Ohms"),
    // Capacitance
    unit!("capF", "cF", Capacitance, "F", "Farads"),
    unit!("capF", "capF", Capacitance, "F", "Farads"),
    unit!("mF", "mF", Capacitance, "mF", "milli-Farads"),
    unit!("uF", "uF", Capacitance, "uF", "micro-Farads"),
    unit!("nF", "nF", Capacitance, "nF", "nano-Farads"),
    unit!("pF", "pF", Capacitance, "pF", "pico-Farads"),
    // Inductance
    unit!("indH", "iH", Inductance, "H", "Henrys"),
    unit!("indmH", "mH", Inductance, "mH", "milli-Henrys"),
    // Time / duration
    unit!("ns", "ns", Time, "ns", "nanoseconds"),
    unit!("us", "us", Time, "us", "microseconds"),
    unit!("ms", "ms", Time, "ms", "milliseconds"),
    unit!("sec", "S", Time, "sec", "seconds"),
    unit!("min", "M", Time, "min", "minutes"),
    unit!("hrs", "H", Time, "hrs", "hours"),
    unit!("sec", "sec", Time, "sec", "seconds"),
    unit!("min", "min", Time, "min", "minutes"),
    unit!("hrs", "hr", Time, "hrs", "hours"),
    unit!("days", "dy", Time, "days", "days"),
    unit!("mon", "mon", Time, "mon", "months"),
    unit!("yrs", "yrs", Time, "yrs", "years"),
    unit!("Jd", "JD", Time, "Jd", "Julian days"),
    unit!("Jd", "Jd", Time, "Jd", "Julian days"),
    unit!("J2000", "J2k", Time, "J2000", "J2000"),
    unit!("J2000", "J2000", Time, "J2000", "J2000"),
];

/// Catalogue entries ordered by descending spelling length, so the first
/// prefix hit is the longest match. Ties keep original table order.
static BY_SPELLING_LEN: Lazy<Vec<&'static UnitDef>> = Lazy::new(|| {
    let mut defs: Vec<&'static UnitDef> = UNITS.iter().collect();
    defs.sort_by(|a, b| b.spelling.len().cmp(&a.spelling.len()));
    defs
});

/// Find the unit whose spelling is the longest prefix of `input`.
///
/// Returns the matched spelling length along with the definition. Ties on
/// length resolve to the earlier table entry.
pub fn find_unit(input: &str) -> Option<(usize, &'static UnitDef)> {
    if input.is_empty() {
        return None;
    }
    BY_SPELLING_LEN
        .iter()
        .find(|def| input.starts_with(def.spelling))
        .map(|def| (def.spelling.len(), *def))
}

/// A unit attached to a value. `Unit::none()` marks a plain number.
///
/// Equality is by conversion key only: `5D` and `5deg` carry the same unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unit(Option<&'static UnitDef>);

impl Unit {
    pub fn none() -> Self {
        Unit(None)
    }

    pub fn from_def(def: &'static UnitDef) -> Self {
        Unit(Some(def))
    }

    /// Resolve a spelling covering the whole of `name`.
    pub fn parse(name: &str) -> Option<Self> {
        match find_unit(name) {
            Some((len, def)) if len == name.len() => Some(Unit(Some(def))),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn def(&self) -> Option<&'static UnitDef> {
        self.0
    }

    pub fn key(&self) -> &'static str {
        self.0.map_or("", |d| d.key)
    }

    pub fn category(&self) -> Option<Category> {
        self.0.map(|d| d.category)
    }

    pub fn is_category(&self, category: Category) -> bool {
        self.category() == Some(category)
    }

    pub fn is_rad(&self) -> bool {
        self.is_category(Category::Angle) && self.key() == "rad"
    }

    pub fn expect_float(&self) -> bool {
        self.0.map_or(false, |d| d.expect_float)
    }

    /// Suffix shown after the numeric text, empty for plain numbers.
    pub fn display(&self) -> &'static str {
        self.0.map_or("", |d| d.display)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.category() == other.category() && self.key() == other.key()
    }
}

impl Eq for Unit {}
