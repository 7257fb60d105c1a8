//! Integer arithmetic helpers
//!
//! All integer arithmetic wraps on overflow. Transcendental functions take
//! the detour through `f64` and come back truncated toward zero.

use crate::error::Fault;

pub fn div(a: i32, b: i32) -> Result<i32, Fault> {
    if b == 0 {
        return Err(Fault::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

/// Floored modulo: a non-zero result carries the divisor's sign.
pub fn modulo(a: i32, b: i32) -> Result<i32, Fault> {
    if b == 0 {
        return Err(Fault::DivisionByZero);
    }
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

/// Run an integer through a float function and truncate the result.
pub fn via_float(v: i32, f: fn(f64) -> f64) -> i32 {
    // `as` truncates toward zero and saturates; NaN becomes 0
    f(f64::from(v)) as i32
}
