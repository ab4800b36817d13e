//! Operator implementations.
//!
//! Every function pops its operands from the evaluation stack and pushes
//! one result. Mixed integer/float operands promote to float; integer
//! division stays integral only when the remainder is zero. For addition
//! and subtraction the unit survives only when both operands agree; for
//! multiplication and division the result takes whichever operand carries
//! a unit.

use mensura_units::{find_conversion, Category, Unit};

use crate::error::{Error, Result};
use crate::eval::{run_formula, EvalCtx};
use crate::number::{Number, Value};

enum Pair {
    Int(i64, i64),
    Float(f64, f64),
}

fn pair(a: &Number, b: &Number) -> Pair {
    if a.is_float() || b.is_float() {
        Pair::Float(a.as_f64(), b.as_f64())
    } else {
        Pair::Int(a.as_i64(), b.as_i64())
    }
}

fn shared_unit(a: &Number, b: &Number) -> Unit {
    if a.unit() == b.unit() {
        a.unit()
    } else {
        Unit::none()
    }
}

fn carried_unit(a: &Number, b: &Number) -> Unit {
    if !a.unit().is_none() {
        a.unit()
    } else {
        b.unit()
    }
}

fn pop1(ctx: &mut EvalCtx<'_>, op: &'static str) -> Result<Number> {
    ctx.stack.pop().ok_or(Error::MissingOperand(op))
}

/// Pop two operands as `(below, top)`, restoring the stack on failure.
fn pop2(ctx: &mut EvalCtx<'_>, op: &'static str) -> Result<(Number, Number)> {
    let b = ctx.stack.pop().ok_or(Error::MissingOperand(op))?;
    match ctx.stack.pop() {
        Some(a) => Ok((a, b)),
        None => {
            ctx.stack.push(b);
            Err(Error::MissingOperand(op))
        }
    }
}

pub(crate) fn add(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "+")?;
    let unit = shared_unit(&a, &b);
    let out = match pair(&a, &b) {
        Pair::Int(x, y) => Number::int(x.wrapping_add(y)),
        Pair::Float(x, y) => Number::float(x + y),
    };
    ctx.stack.push(out.with_unit(unit));
    Ok(())
}

pub(crate) fn subtract(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "-")?;
    let unit = shared_unit(&a, &b);
    let out = match pair(&a, &b) {
        Pair::Int(x, y) => Number::int(x.wrapping_sub(y)),
        Pair::Float(x, y) => Number::float(x - y),
    };
    ctx.stack.push(out.with_unit(unit));
    Ok(())
}

pub(crate) fn multiply(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "*")?;
    let unit = carried_unit(&a, &b);
    let out = match pair(&a, &b) {
        Pair::Int(x, y) => Number::int(x.wrapping_mul(y)),
        Pair::Float(x, y) => Number::float(x * y),
    };
    ctx.stack.push(out.with_unit(unit));
    Ok(())
}

pub(crate) fn divide(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "/")?;
    let zero = match b.value() {
        Value::Int(v) => v == 0,
        Value::Float(v) => v == 0.0,
    };
    if zero {
        ctx.stack.push(a);
        ctx.stack.push(b);
        return Err(Error::DivisionByZero);
    }
    let unit = carried_unit(&a, &b);
    let out = match pair(&a, &b) {
        // Integer division stays integral only when it is exact.
        Pair::Int(x, y) if x % y == 0 => Number::int(x / y),
        Pair::Int(x, y) => Number::float(x as f64 / y as f64),
        Pair::Float(x, y) => Number::float(x / y),
    };
    ctx.stack.push(out.with_unit(unit));
    Ok(())
}

pub(crate) fn modulo(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "%")?;
    let zero = match b.value() {
        Value::Int(v) => v == 0,
        Value::Float(v) => v == 0.0,
    };
    if zero {
        ctx.stack.push(a);
        ctx.stack.push(b);
        return Err(Error::DivisionByZero);
    }
    let out = match pair(&a, &b) {
        Pair::Int(x, y) => Number::int(x % y),
        Pair::Float(x, y) => Number::float(x % y),
    };
    ctx.stack.push(out);
    Ok(())
}

pub(crate) fn power(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "^")?;
    let unit = carried_unit(&a, &b);
    let out = match pair(&a, &b) {
        Pair::Int(x, y) => {
            let exact = u32::try_from(y).ok().and_then(|e| x.checked_pow(e));
            match exact {
                Some(v) => Number::int(v),
                None => Number::float((x as f64).powf(y as f64)),
            }
        }
        Pair::Float(x, y) => Number::float(x.powf(y)),
    };
    ctx.stack.push(out.with_unit(unit));
    Ok(())
}

/// `x \ y` is the y-th root of x.
pub(crate) fn root(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "\\")?;
    ctx.stack
        .push(Number::float(a.as_f64().powf(1.0 / b.as_f64())));
    Ok(())
}

pub(crate) fn maximum(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "max")?;
    ctx.stack.push(if a.as_f64() >= b.as_f64() { a } else { b });
    Ok(())
}

pub(crate) fn minimum(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "min")?;
    ctx.stack.push(if a.as_f64() <= b.as_f64() { a } else { b });
    Ok(())
}

/// `::` pops the target-unit carrier and rewrites the value beneath it.
/// Failure restores both operands so the caller can inspect them.
pub(crate) fn convert(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (source, target) = pop2(ctx, "::")?;
    let from_key = source.unit().key().to_string();
    let to_key = target.unit().key().to_string();
    let Some(tdef) = target.unit().def() else {
        ctx.stack.push(source);
        ctx.stack.push(target);
        return Err(Error::ConversionNotSupported {
            from: from_key,
            to: to_key,
        });
    };

    // A plain value adopts the target unit outright.
    if source.unit().is_none() {
        let mut out = source;
        out.set_unit(target.unit());
        if tdef.expect_float {
            out.promote_to_float();
        }
        ctx.stack.push(out);
        return Ok(());
    }
    if source.unit() == target.unit() {
        ctx.stack.push(source);
        return Ok(());
    }

    let mismatch = !source.unit().is_category(tdef.category);
    let rule = if mismatch {
        None
    } else {
        find_conversion(tdef.category, source.unit().key(), tdef.key).ok()
    };
    match rule {
        Some(rule) => {
            tracing::debug!(from = %from_key, to = %to_key, formula = rule.formula, "unit conversion");
            let seed = Number::float(source.as_f64());
            let result = run_formula(ctx, seed, rule.formula)?;
            ctx.stack
                .push(Number::float(result.as_f64()).with_unit(target.unit()));
            Ok(())
        }
        None => {
            ctx.stack.push(source);
            ctx.stack.push(target);
            Err(Error::ConversionNotSupported {
                from: from_key,
                to: to_key,
            })
        }
    }
}

/// Runtime assignment: the top of the stack names the variable, the value
/// beneath it is written to the store and left as the expression result.
pub(crate) fn assign(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let target_ok = ctx
        .stack
        .last()
        .is_some_and(|n| n.is_variable() && n.name().is_some());
    if !target_ok {
        return Err(Error::AssignmentTargetInvalid);
    }
    let mut var = pop1(ctx, "=")?;
    let Some(value) = ctx.stack.last().cloned() else {
        ctx.stack.push(var);
        return Err(Error::MissingOperand("="));
    };
    var.assign_from(&value);
    ctx.vars.upsert(var)?;
    Ok(())
}

pub(crate) fn clear(ctx: &mut EvalCtx<'_>) -> Result<()> {
    pop1(ctx, ";")?;
    Ok(())
}

pub(crate) fn swap(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let (a, b) = pop2(ctx, "swap")?;
    ctx.stack.push(b);
    ctx.stack.push(a);
    Ok(())
}

pub(crate) fn sqrt(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "sqrt")?;
    ctx.stack.push(Number::float(x.as_f64().sqrt()));
    Ok(())
}

pub(crate) fn square(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "sqr")?;
    let out = match x.value() {
        Value::Int(v) => Number::int(v.wrapping_mul(v)),
        Value::Float(v) => Number::float(v * v),
    };
    ctx.stack.push(out.with_unit(x.unit()));
    Ok(())
}

pub(crate) fn abs(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "abs")?;
    let out = match x.value() {
        Value::Int(v) => Number::int(v.wrapping_abs()),
        Value::Float(v) => Number::float(v.abs()),
    };
    ctx.stack.push(out.with_unit(x.unit()));
    Ok(())
}

pub(crate) fn negate(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "neg")?;
    let out = match x.value() {
        Value::Int(v) => Number::int(v.wrapping_neg()),
        Value::Float(v) => Number::float(-v),
    };
    ctx.stack.push(out.with_unit(x.unit()));
    Ok(())
}

pub(crate) fn invert(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "inv")?;
    if x.as_f64() == 0.0 {
        ctx.stack.push(x);
        return Err(Error::DivisionByZero);
    }
    ctx.stack.push(Number::float(1.0 / x.as_f64()));
    Ok(())
}

pub(crate) fn exp(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "exp")?;
    ctx.stack.push(Number::float(x.as_f64().exp()));
    Ok(())
}

pub(crate) fn exp10(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "exp10")?;
    let out = match x.value() {
        Value::Int(v) if (0..=18).contains(&v) => Number::int(10i64.pow(v as u32)),
        _ => Number::float(10f64.powf(x.as_f64())),
    };
    ctx.stack.push(out);
    Ok(())
}

pub(crate) fn exp2(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "exp2")?;
    let out = match x.value() {
        Value::Int(v) if (0..=62).contains(&v) => Number::int(1i64 << v),
        _ => Number::float(2f64.powf(x.as_f64())),
    };
    ctx.stack.push(out);
    Ok(())
}

pub(crate) fn log10(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "log10")?;
    ctx.stack.push(Number::float(x.as_f64().log10()));
    Ok(())
}

pub(crate) fn log2(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "log2")?;
    ctx.stack.push(Number::float(x.as_f64().log2()));
    Ok(())
}

pub(crate) fn ln(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "ln")?;
    ctx.stack.push(Number::float(x.as_f64().ln()));
    Ok(())
}

/// Angle inputs normalize to radians through the same conversion rules
/// `::` uses. Explicit `rad` values pass through; everything else is
/// degrees unless the session default says radians.
fn to_radians(ctx: &mut EvalCtx<'_>, x: &Number) -> Result<f64> {
    if x.unit().is_rad() || (x.unit().is_none() && ctx.settings.is_default_rad()) {
        return Ok(x.as_f64());
    }
    let rule = find_conversion(Category::Angle, "deg", "rad").map_err(|_| {
        Error::ConversionNotSupported {
            from: "deg".to_string(),
            to: "rad".to_string(),
        }
    })?;
    let out = run_formula(ctx, Number::float(x.as_f64()), rule.formula)?;
    Ok(out.as_f64())
}

/// Angle results come back in the session's default angle unit.
fn from_radians(ctx: &mut EvalCtx<'_>, rads: f64) -> Result<Number> {
    if ctx.settings.is_default_rad() {
        return Ok(Number::float(rads).with_unit(Unit::parse("rad").unwrap_or_default()));
    }
    let rule = find_conversion(Category::Angle, "rad", "deg").map_err(|_| {
        Error::ConversionNotSupported {
            from: "rad".to_string(),
            to: "deg".to_string(),
        }
    })?;
    let out = run_formula(ctx, Number::float(rads), rule.formula)?;
    Ok(Number::float(out.as_f64()).with_unit(Unit::parse("deg").unwrap_or_default()))
}

fn trig(ctx: &mut EvalCtx<'_>, op: &'static str, f: fn(f64) -> f64) -> Result<()> {
    let x = pop1(ctx, op)?;
    let rads = to_radians(ctx, &x)?;
    ctx.stack.push(Number::float(f(rads)));
    Ok(())
}

fn arc(ctx: &mut EvalCtx<'_>, op: &'static str, f: fn(f64) -> f64) -> Result<()> {
    let x = pop1(ctx, op)?;
    let out = from_radians(ctx, f(x.as_f64()))?;
    ctx.stack.push(out);
    Ok(())
}

pub(crate) fn sin(ctx: &mut EvalCtx<'_>) -> Result<()> {
    trig(ctx, "sin", f64::sin)
}

pub(crate) fn cos(ctx: &mut EvalCtx<'_>) -> Result<()> {
    trig(ctx, "cos", f64::cos)
}

pub(crate) fn tan(ctx: &mut EvalCtx<'_>) -> Result<()> {
    trig(ctx, "tan", f64::tan)
}

pub(crate) fn asin(ctx: &mut EvalCtx<'_>) -> Result<()> {
    arc(ctx, "asin", f64::asin)
}

pub(crate) fn acos(ctx: &mut EvalCtx<'_>) -> Result<()> {
    arc(ctx, "acos", f64::acos)
}

pub(crate) fn atan(ctx: &mut EvalCtx<'_>) -> Result<()> {
    arc(ctx, "atan", f64::atan)
}

fn plain(ctx: &mut EvalCtx<'_>, op: &'static str, f: fn(f64) -> f64) -> Result<()> {
    let x = pop1(ctx, op)?;
    ctx.stack.push(Number::float(f(x.as_f64())));
    Ok(())
}

pub(crate) fn sinh(ctx: &mut EvalCtx<'_>) -> Result<()> {
    plain(ctx, "sinh", f64::sinh)
}

pub(crate) fn cosh(ctx: &mut EvalCtx<'_>) -> Result<()> {
    plain(ctx, "cosh", f64::cosh)
}

pub(crate) fn tanh(ctx: &mut EvalCtx<'_>) -> Result<()> {
    plain(ctx, "tanh", f64::tanh)
}

pub(crate) fn asinh(ctx: &mut EvalCtx<'_>) -> Result<()> {
    plain(ctx, "asinh", f64::asinh)
}

pub(crate) fn acosh(ctx: &mut EvalCtx<'_>) -> Result<()> {
    plain(ctx, "acosh", f64::acosh)
}

pub(crate) fn atanh(ctx: &mut EvalCtx<'_>) -> Result<()> {
    plain(ctx, "atanh", f64::atanh)
}

pub(crate) fn ceil(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "ceil")?;
    let out = match x.value() {
        Value::Int(_) => x,
        Value::Float(v) => Number::float(v.ceil()).with_unit(x.unit()),
    };
    ctx.stack.push(out);
    Ok(())
}

pub(crate) fn floor(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "floor")?;
    let out = match x.value() {
        Value::Int(_) => x,
        Value::Float(v) => Number::float(v.floor()).with_unit(x.unit()),
    };
    ctx.stack.push(out);
    Ok(())
}

pub(crate) fn frac(ctx: &mut EvalCtx<'_>) -> Result<()> {
    let x = pop1(ctx, "frac")?;
    let out = match x.value() {
        Value::Int(_) => Number::int(0),
        Value::Float(v) => Number::float(v.fract()).with_unit(x.unit()),
    };
    ctx.stack.push(out);
    Ok(())
}
