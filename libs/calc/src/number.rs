//! Numeric values and the literal scanner.
//!
//! A [`Number`] is an integer or a float plus an optional unit, an optional
//! C-style display format carried over from its literal, and variable
//! metadata when the value came from (or names) a store entry.

use mensura_units::{find_unit, Unit};

use crate::cursor::Cursor;
use crate::error::{Error, MessageKind, Messages, Result};
use crate::vars::VariableStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    value: Value,
    unit: Unit,
    format: Option<String>,
    name: Option<String>,
    variable: bool,
    unset: bool,
    constant: bool,
}

impl Number {
    pub fn int(value: i64) -> Self {
        Number {
            value: Value::Int(value),
            unit: Unit::none(),
            format: None,
            name: None,
            variable: false,
            unset: false,
            constant: false,
        }
    }

    pub fn float(value: f64) -> Self {
        Number {
            value: Value::Float(value),
            ..Number::int(0)
        }
    }

    /// Named immutable value seeded into the variable store, such as `pi`.
    pub fn constant(name: &str, value: f64, unit: Unit) -> Self {
        Number {
            value: Value::Float(value),
            unit,
            name: Some(name.to_string()),
            constant: true,
            ..Number::int(0)
        }
    }

    /// Placeholder for a name not present in the store. Resolves to zero
    /// unless the store learns a value before the operand is consumed.
    pub fn unset_variable(name: &str) -> Self {
        Number {
            value: Value::Float(0.0),
            name: Some(name.to_string()),
            variable: true,
            unset: true,
            ..Number::int(0)
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_variable(&self) -> bool {
        self.variable
    }

    pub fn is_unset(&self) -> bool {
        self.unset
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn is_float(&self) -> bool {
        matches!(self.value, Value::Float(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self.value, Value::Int(_))
    }

    pub fn as_f64(&self) -> f64 {
        match self.value {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self.value {
            Value::Int(v) => v,
            Value::Float(v) => v as i64,
        }
    }

    pub fn promote_to_float(&mut self) {
        if let Value::Int(v) = self.value {
            self.value = Value::Float(v as f64);
        }
    }

    /// Take on another number's value, unit, and format, keeping this
    /// number's name. Marks the result a resolved variable.
    pub fn assign_from(&mut self, other: &Number) {
        self.value = other.value;
        self.unit = other.unit;
        self.format = other.format.clone();
        self.variable = true;
        self.unset = false;
    }

    /// Refresh an in-flight variable operand from its store entry.
    pub fn update_from(&mut self, entry: &Number) {
        self.value = entry.value;
        self.unit = entry.unit;
        self.format = entry.format.clone();
        self.unset = false;
    }

    pub fn to_display_string(&self) -> String {
        self.display_with(crate::settings::Settings::default().precision)
    }

    /// Render with `precision` fractional digits. Integers print plain,
    /// floats strip trailing zeros, and a carried format string wins over
    /// both. The unit's display suffix is always appended.
    pub fn display_with(&self, precision: usize) -> String {
        let body = match &self.format {
            Some(fmt) => render_format(fmt, self, precision),
            None => self.render_plain(precision),
        };
        format!("{body}{}", self.unit.display())
    }

    fn render_plain(&self, precision: usize) -> String {
        match self.value {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => clean_decimal(format!("{v:.precision$}")),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

fn clean_decimal(mut text: String) -> String {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

/// Render the subset of C-style formats a literal can carry, e.g. `0x%X`
/// from a hex literal or `%.3f` from a `:%` suffix.
fn render_format(fmt: &str, n: &Number, precision: usize) -> String {
    let Some(idx) = fmt.find('%') else {
        return n.render_plain(precision);
    };
    let (prefix, spec) = fmt.split_at(idx);
    let rendered = match spec {
        "%X" => format!("{:X}", n.as_i64()),
        "%x" => format!("{:x}", n.as_i64()),
        "%d" | "%i" | "%ld" | "%lld" => n.as_i64().to_string(),
        "%e" => format!("{:e}", n.as_f64()),
        "%f" => format!("{:.6}", n.as_f64()),
        _ => {
            let digits = spec
                .strip_prefix("%.")
                .and_then(|s| s.strip_suffix('f'))
                .and_then(|s| s.parse::<usize>().ok());
            match digits {
                Some(p) => format!("{:.p$}", n.as_f64()),
                None => n.render_plain(precision),
            }
        }
    };
    format!("{prefix}{rendered}")
}

/// Scan one numeric literal: digits, then any of a unit suffix, a `:unit`
/// override, or a `:%fmt` display format. `::` is left for the conversion
/// operator. A unit spelling alone is a valid literal; it carries the
/// target unit of a conversion.
pub fn parse(cur: &mut Cursor<'_>, msgs: &mut Messages) -> Result<Number> {
    cur.skip_whitespace();
    let mut n = Number::int(0);
    let mut have_value = false;
    let mut done = false;
    while !done && !cur.is_empty() {
        if !have_value && cur.starts_number() {
            // Hex literals take no unit or format suffix; any trailing
            // text is the tree builder's to deal with.
            if parse_digits(&mut n, cur, msgs)? {
                return Ok(n);
            }
            have_value = true;
        } else if cur.first() == Some(':') {
            match cur.peek(1) {
                Some(':') => done = true,
                Some('%') => {
                    cur.consume(1);
                    parse_format(&mut n, cur);
                    done = true;
                }
                _ => {
                    cur.consume(1);
                    parse_unit_suffix(&mut n, cur, msgs)?;
                }
            }
        } else if cur.starts_alpha() || find_unit(cur.remaining()).is_some() {
            match find_unit(cur.remaining()) {
                Some((len, def)) => {
                    n.unit = Unit::from_def(def);
                    msgs.append_to_last(MessageKind::Number, def.spelling);
                    cur.consume(len);
                }
                // Not a unit: the run is a name, left in place for
                // variable resolution.
                None => done = true,
            }
        } else {
            done = true;
        }
    }
    Ok(n)
}

/// Scan the digit run into `n`. Returns true for a hex literal, which
/// ends the whole literal on the spot.
fn parse_digits(n: &mut Number, cur: &mut Cursor<'_>, msgs: &mut Messages) -> Result<bool> {
    let rest = cur.remaining();
    if let Some(tail) = rest.strip_prefix("0x") {
        let end = tail
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(tail.len());
        let digits = &tail[..end];
        let value = if digits.is_empty() {
            0
        } else {
            i64::from_str_radix(digits, 16)
                .map_err(|_| Error::MalformedNumber(format!("0x{digits}")))?
        };
        cur.consume(2 + digits.len());
        n.value = Value::Int(value);
        n.format = Some("0x%X".to_string());
        msgs.push(MessageKind::Number, format!("0x{digits}"));
        return Ok(true);
    }

    let mut text = String::new();
    let mut decimal = false;
    let mut len = 0;
    let bytes = rest.as_bytes();
    if bytes.first() == Some(&b'-') {
        text.push('-');
        len += 1;
    }
    while len < bytes.len() {
        let c = bytes[len] as char;
        if c.is_ascii_digit() {
            text.push(c);
            len += 1;
        } else if c == '.' && !decimal {
            if text.is_empty() || text == "-" {
                text.push('0');
            }
            text.push('.');
            decimal = true;
            len += 1;
        } else {
            break;
        }
    }
    cur.consume(len);
    n.value = if decimal {
        Value::Float(
            text.parse::<f64>()
                .map_err(|_| Error::MalformedNumber(text.clone()))?,
        )
    } else {
        Value::Int(
            text.parse::<i64>()
                .map_err(|_| Error::MalformedNumber(text.clone()))?,
        )
    };
    msgs.push(MessageKind::Number, text);
    Ok(false)
}

fn parse_format(n: &mut Number, cur: &mut Cursor<'_>) {
    let rest = cur.remaining();
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    n.format = Some(rest[..end].to_string());
    cur.consume(end);
}

fn parse_unit_suffix(n: &mut Number, cur: &mut Cursor<'_>, msgs: &mut Messages) -> Result<()> {
    match find_unit(cur.remaining()) {
        Some((len, def)) => {
            n.unit = Unit::from_def(def);
            msgs.append_to_last(MessageKind::Number, def.spelling);
            cur.consume(len);
            Ok(())
        }
        None => {
            let rest = cur.remaining();
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            Err(Error::UnknownUnit(rest[..end.min(12)].to_string()))
        }
    }
}

/// Resolve a name against the store, with two suffix forms: `name:unit`
/// overrides the unit on the resolved value, and `name=literal` is a
/// parse-time assignment that updates the store and yields no operand
/// (signalled by `Ok(None)`).
pub fn parse_variable(
    cur: &mut Cursor<'_>,
    vars: &mut VariableStore,
    msgs: &mut Messages,
) -> Result<Option<Number>> {
    cur.skip_whitespace();
    let name = cur.alpha_run();
    if name.is_empty() {
        return Err(Error::MissingVariableName);
    }
    let name = name.to_string();
    cur.consume(name.len());
    msgs.push(MessageKind::Variable, &name);

    let mut n = match vars.lookup(&name) {
        Some(entry) => entry.clone(),
        None => Number::unset_variable(&name),
    };

    if cur.first() == Some(':') && cur.peek(1) != Some(':') {
        let mut ahead = *cur;
        ahead.consume(1);
        if let Some((len, def)) = find_unit(ahead.remaining()) {
            n.set_unit(Unit::from_def(def));
            cur.consume(1 + len);
        }
    }

    if cur.first() == Some('=') && cur.peek(1).is_some_and(|c| c.is_ascii_digit() || c == '-') {
        cur.consume(1);
        let value = parse(cur, msgs)?;
        n.assign_from(&value);
        n.name = Some(name);
        if let Err(err) = vars.upsert(n) {
            msgs.error(err.to_string());
        }
        return Ok(None);
    }
    Ok(Some(n))
}
