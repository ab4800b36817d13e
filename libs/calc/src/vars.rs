//! Named value store shared across expressions in a session.
//!
//! The store is plain data passed to the parser and evaluator by the
//! caller; nothing here is global. It seeds the `pi` constant, which can
//! be read but never reassigned.

use mensura_units::Unit;

use crate::error::{Error, Result};
use crate::number::Number;

/// Supplies a value for a name the evaluator cannot resolve. One request
/// per unresolved operand; `None` or empty text leaves the name unset and
/// the operand defaults to integer zero.
pub trait Prompt {
    fn read_value(&mut self, name: &str) -> Option<String>;
}

/// Prompt that never answers. Unresolved names evaluate to zero.
#[derive(Debug, Default)]
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn read_value(&mut self, _name: &str) -> Option<String> {
        None
    }
}

#[derive(Debug)]
pub struct VariableStore {
    entries: Vec<Number>,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableStore {
    pub fn new() -> Self {
        let rad = Unit::parse("rad").unwrap_or_default();
        VariableStore {
            entries: vec![Number::constant("pi", std::f64::consts::PI, rad)],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Number> {
        self.entries.iter().find(|e| e.name() == Some(name))
    }

    /// Insert or replace the entry named by `value`. Constants are
    /// immutable and reject the update.
    pub fn upsert(&mut self, value: Number) -> Result<()> {
        let Some(name) = value.name().map(str::to_string) else {
            return Err(Error::MissingVariableName);
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.name() == Some(name.as_str()))
        {
            Some(existing) if existing.is_constant() => Err(Error::ConstantImmutable(name)),
            Some(existing) => {
                *existing = value;
                Ok(())
            }
            None => {
                self.entries.push(value);
                Ok(())
            }
        }
    }

    /// Entries in insertion order, constants first.
    pub fn iter(&self) -> impl Iterator<Item = &Number> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Value;

    #[test]
    fn pi_is_seeded_as_a_radian_constant() {
        let vars = VariableStore::new();
        let pi = vars.lookup("pi").unwrap();
        assert!(pi.is_constant());
        assert!(pi.unit().is_rad());
        assert!(pi.is_float());
    }

    #[test]
    fn upsert_inserts_then_replaces() {
        let mut vars = VariableStore::new();
        let mut y = Number::unset_variable("y");
        y.assign_from(&Number::float(3.2));
        vars.upsert(y.clone()).unwrap();
        assert_eq!(vars.lookup("y").unwrap().value(), Value::Float(3.2));

        y.assign_from(&Number::int(7));
        vars.upsert(y).unwrap();
        assert_eq!(vars.lookup("y").unwrap().value(), Value::Int(7));
    }

    #[test]
    fn constants_reject_updates() {
        let mut vars = VariableStore::new();
        let mut fake = Number::unset_variable("pi");
        fake.assign_from(&Number::int(3));
        assert!(matches!(
            vars.upsert(fake),
            Err(Error::ConstantImmutable(_))
        ));
    }
}
