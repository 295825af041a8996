#[cfg(feature = "expr_target")]
extern crate meval;

use crate::error::{Error, Result};

/// Reads a resistance written in part list notation: `330R`, `4K7`, `2M2`, `1k`.
/// ```
///     # use resistor_synth::parse_ohms;
///     assert_eq!(parse_ohms("4K7"), Some(4700.0));
///     assert_eq!(parse_ohms("330R"), Some(330.0));
///     assert_eq!(parse_ohms("0R47"), Some(0.47));
///     assert_eq!(parse_ohms("330"), None);
/// ```
pub fn parse_ohms(s: &str) -> Option<f64> {
    let s = s.trim();
    let idx = s.find(|c: char| c.is_ascii_alphabetic())?;
    let mult = match &s[idx..=idx] {
        "R" | "r" => 1.0,
        "K" | "k" => 1e3,
        "M" => 1e6,
        _ => return None,
    };
    let (int, frac) = (&s[..idx], &s[idx + 1..]);
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    let digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !digits(int) || !digits(frac) {
        return None;
    }
    let int = if int.is_empty() { "0" } else { int };
    format!("{}.{}", int, frac)
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .map(|v| v * mult)
}

/// Evaluates a target resistance. Accepts part list notation (`4K7`), plain numbers and,
/// with the `expr_target` feature, arithmetic such as `1/(1/330 + 1/470)` or `2*4.7e3`.
pub fn parse_target(s: &str) -> Result<f64> {
    let v = match parse_ohms(s) {
        Some(v) => v,
        None => eval(s)?,
    };
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::BadExpression(s.to_string()))
    }
}

#[cfg(feature = "expr_target")]
fn eval(s: &str) -> Result<f64> {
    meval::eval_str(s.trim()).map_err(|_| Error::BadExpression(s.to_string()))
}

#[cfg(not(feature = "expr_target"))]
fn eval(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| Error::BadExpression(s.to_string()))
}
