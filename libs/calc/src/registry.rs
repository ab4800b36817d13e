//! Static operator registry.
//!
//! Lookup is longest-spelling-prefix match keeping the first maximal hit,
//! the same scheme the unit catalogue uses. An entry without an
//! implementation is recognized by the parser but fails at evaluation
//! time, which keeps unfinished surface syntax from being mistaken for a
//! variable name.

use crate::error::{Error, Result};
use crate::eval::EvalCtx;
use crate::ops;

/// How an operator takes its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Pops two values, pushes one.
    Binary,
    /// Operates on the top of the stack.
    Unary,
    /// Unit conversion; the target unit follows as a literal.
    Convert,
    /// Writes the value beneath the target back into the variable store.
    Assign,
    /// Opens a grouped subexpression.
    GroupOpen,
    /// Closes a grouped subexpression.
    GroupClose,
    /// Argument separator inside a group.
    Separator,
}

pub type OpFn = fn(&mut EvalCtx<'_>) -> Result<()>;

pub struct OpDef {
    /// Surface spelling matched in the input.
    pub spelling: &'static str,
    pub name: &'static str,
    pub arity: Arity,
    /// `None` marks a recognized but not executable operator.
    pub imp: Option<OpFn>,
}

impl std::fmt::Debug for OpDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpDef")
            .field("spelling", &self.spelling)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("implemented", &self.imp.is_some())
            .finish()
    }
}

macro_rules! op {
    ($sp:literal, $name:literal, $arity:ident, $imp:expr) => {
        OpDef {
            spelling: $sp,
            name: $name,
            arity: Arity::$arity,
            imp: Some($imp),
        }
    };
    ($sp:literal, $name:literal, $arity:ident) => {
        OpDef {
            spelling: $sp,
            name: $name,
            arity: Arity::$arity,
            imp: None,
        }
    };
}

pub static OPERATORS: &[OpDef] = &[
    op!("+", "add", Binary, ops::add),
    op!("-", "subtract", Binary, ops::subtract),
    op!("*", "multiply", Binary, ops::multiply),
    op!("/", "divide", Binary, ops::divide),
    op!("^", "power", Binary, ops::power),
    op!("\\", "root", Binary, ops::root),
    op!("%", "modulo", Binary, ops::modulo),
    op!("max", "maximum", Binary, ops::maximum),
    op!("min", "minimum", Binary, ops::minimum),
    op!("::", "convert", Convert, ops::convert),
    op!("=", "assign", Assign, ops::assign),
    op!("+=", "add-assign", Assign, ops::assign),
    op!("*=", "multiply-assign", Assign, ops::assign),
    op!(";", "clear", Unary, ops::clear),
    op!("swap", "swap", Unary, ops::swap),
    op!("sqrt", "square-root", Unary, ops::sqrt),
    op!("sqr", "square", Unary, ops::square),
    op!("abs", "absolute-value", Unary, ops::abs),
    op!("neg", "negate", Unary, ops::negate),
    op!("~", "negate", Unary, ops::negate),
    op!("inv", "invert", Unary, ops::invert),
    op!("exp10", "exp-base-10", Unary, ops::exp10),
    op!("exp2", "exp-base-2", Unary, ops::exp2),
    op!("exp", "exp", Unary, ops::exp),
    op!("e10x", "exp-base-10", Unary, ops::exp10),
    op!("e2x", "exp-base-2", Unary, ops::exp2),
    op!("log10", "log-base-10", Unary, ops::log10),
    op!("log2", "log-base-2", Unary, ops::log2),
    op!("logn", "natural-log", Unary, ops::ln),
    op!("log", "log-base-10", Unary, ops::log10),
    op!("ln", "natural-log", Unary, ops::ln),
    op!("sin", "sine", Unary, ops::sin),
    op!("cos", "cosine", Unary, ops::cos),
    op!("tan", "tangent", Unary, ops::tan),
    op!("asin", "arc-sine", Unary, ops::asin),
    op!("acos", "arc-cosine", Unary, ops::acos),
    op!("atan", "arc-tangent", Unary, ops::atan),
    op!("sinh", "hyperbolic-sine", Unary, ops::sinh),
    op!("cosh", "hyperbolic-cosine", Unary, ops::cosh),
    op!("tanh", "hyperbolic-tangent", Unary, ops::tanh),
    op!("asinh", "arc-hyperbolic-sine", Unary, ops::asinh),
    op!("acosh", "arc-hyperbolic-cosine", Unary, ops::acosh),
    op!("atanh", "arc-hyperbolic-tangent", Unary, ops::atanh),
    op!("ceil", "ceiling", Unary, ops::ceil),
    op!("floor", "floor", Unary, ops::floor),
    op!("frac", "fractional-part", Unary, ops::frac),
    op!("(", "open-paren", GroupOpen),
    op!(")", "close-paren", GroupClose),
    op!("[", "open-bracket", GroupOpen),
    op!("]", "close-bracket", GroupClose),
    op!(",", "separator", Separator),
    op!("<[[", "open-matrix", GroupOpen),
    op!("<[", "open-vector", GroupOpen),
    op!("|", "column-separator", GroupOpen),
    op!("<@", "open-tuple", GroupOpen),
    op!(">", "close-vector", GroupClose),
];

/// Find the operator whose spelling is the longest prefix of `input`.
/// Ties on length keep the earlier table entry.
pub fn find_longest(input: &str) -> Option<(usize, &'static OpDef)> {
    let mut best: Option<(usize, &'static OpDef)> = None;
    for def in OPERATORS {
        if input.starts_with(def.spelling) {
            let len = def.spelling.len();
            if best.map_or(true, |(b, _)| len > b) {
                best = Some((len, def));
            }
        }
    }
    best
}

/// The multiply operator, used for implicit multiplication such as `2pi`.
pub fn multiply() -> &'static OpDef {
    OPERATORS
        .iter()
        .find(|o| o.spelling == "*")
        .unwrap_or(&OPERATORS[0])
}

impl OpDef {
    /// Gate and dispatch. Checks operand availability, resolves variable
    /// operands from the store, then runs the implementation.
    pub fn run(&self, ctx: &mut EvalCtx<'_>) -> Result<()> {
        let Some(imp) = self.imp else {
            return Err(Error::NotImplemented(self.spelling));
        };
        if ctx.stack.is_empty() {
            return Err(Error::MissingOperand(self.spelling));
        }
        if self.arity == Arity::Assign {
            let top_is_var = ctx.stack.last().is_some_and(|n| n.is_variable());
            if ctx.stack.len() < 2 && !top_is_var {
                return Err(Error::AssignmentTargetInvalid);
            }
        } else {
            crate::eval::confirm_entry(ctx, 0)?;
        }
        if self.arity == Arity::Binary {
            if ctx.stack.len() < 2 {
                return Err(Error::MissingOperand(self.spelling));
            }
            crate::eval::confirm_entry(ctx, 1)?;
        }
        imp(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_spelling_wins() {
        let (len, def) = find_longest("::F").unwrap();
        assert_eq!(len, 2);
        assert_eq!(def.arity, Arity::Convert);

        let (len, def) = find_longest("+=2").unwrap();
        assert_eq!(len, 2);
        assert_eq!(def.arity, Arity::Assign);

        let (len, def) = find_longest("<[[1|2").unwrap();
        assert_eq!(len, 3);
        assert!(def.imp.is_none());
    }

    #[test]
    fn single_character_operators() {
        let (len, def) = find_longest("+2").unwrap();
        assert_eq!(len, 1);
        assert_eq!(def.name, "add");

        let (len, def) = find_longest("\\3").unwrap();
        assert_eq!(len, 1);
        assert_eq!(def.name, "root");
    }

    #[test]
    fn names_are_not_operators() {
        assert!(find_longest("pi").is_none());
        assert!(find_longest("y+2").is_none());
    }

    #[test]
    fn longer_word_operator_wins() {
        // "sin" must resolve as an operator, not the start of a name.
        let (len, def) = find_longest("sinh(2)").unwrap();
        assert_eq!(len, 4);
        assert_eq!(def.name, "hyperbolic-sine");
    }

    #[test]
    fn grouping_tokens_are_recognized_but_inert() {
        for sp in ["(", ")", "[", "]", ",", "<[", "<[[", "|", "<@", ">"] {
            let (_, def) = find_longest(sp).unwrap();
            assert!(def.imp.is_none(), "{sp} should have no implementation");
        }
    }
}
