//! Scalar literal spelling.

use kew_value::{Kind, Type};

use crate::Dependencies;

/// Spell a float the way Go's `%v` does (`strconv.FormatFloat(f, 'g', -1, bits)`).
///
/// NaN and infinities have no literal form; they become `math` calls and
/// record the `math` import.
pub(crate) fn float(value: f64, bits: u32, deps: &mut Dependencies) -> String {
    if value.is_nan() {
        deps.add("math", None);
        return "math.NaN()".to_string();
    }
    if value.is_infinite() {
        deps.add("math", None);
        let sign = if value > 0.0 { 1 } else { -1 };
        return format!("math.Inf({})", sign);
    }
    shortest(value, bits)
}

fn shortest(value: f64, bits: u32) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. `-1.25e-7`.
    let sci = if bits == 32 {
        format!("{:e}", value as f32)
    } else {
        format!("{:e}", value)
    };
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    if !(-4..6).contains(&exp) {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs());
    }

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let point = exp + 1;
    let body = if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        format!("{}{}", digits, "0".repeat(point as usize - digits.len()))
    } else {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    };
    format!("{}{}", sign, body)
}

/// Spell a complex number as `(re+imi)`, or as a `complex(re, im)` call
/// when either part has no literal form.
pub(crate) fn complex(re: f64, im: f64, bits: u32, deps: &mut Dependencies) -> String {
    if !re.is_finite() || !im.is_finite() {
        let re = float(re, bits, deps);
        let im = float(im, bits, deps);
        return format!("complex({}, {})", re, im);
    }
    let re = shortest(re, bits);
    let im = shortest(im, bits);
    let plus = if im.starts_with('-') { "" } else { "+" };
    format!("({}{}{}i)", re, plus, im)
}

/// Spell a string: raw when it spans lines, quoted otherwise.
pub(crate) fn string(s: &str) -> String {
    if s.contains('\n') && raw_safe(s) {
        if let Some(raw) = kew_core::raw_string(s) {
            return raw;
        }
    }
    kew_core::quote(s)
}

/// Spell a byte block: raw when the bytes are printable UTF-8, quoted with
/// `\xNN` escapes otherwise.
pub(crate) fn bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) if raw_safe(s) => kew_core::raw_string(s).unwrap_or_else(|| kew_core::quote(s)),
        _ => kew_core::quote_bytes(bytes),
    }
}

// Raw literals cannot hold NUL and drop carriage returns.
fn raw_safe(s: &str) -> bool {
    !s.chars().any(|c| c.is_control() && c != '\n' && c != '\t')
}

/// Spell an address as Go does for pointers, `nil` for zero.
pub(crate) fn hex(addr: u64) -> String {
    if addr == 0 {
        return "nil".to_string();
    }
    format!("{:#x}", addr)
}

/// Returns true if the untyped `literal` would default to `ty` when stored
/// in an interface, so no conversion is needed to keep the dynamic type.
pub(crate) fn has_default_type(ty: &Type, literal: &str) -> bool {
    if ty.is_named() {
        return false;
    }
    match ty.kind() {
        Kind::Bool | Kind::Int | Kind::String | Kind::Complex128 => true,
        Kind::Float64 => literal.starts_with("math.") || literal.contains(['.', 'e']),
        _ => false,
    }
}
