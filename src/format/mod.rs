//! Display helpers shared by the portal views
//!
//! Numbers follow en-US conventions (comma grouping, dot decimals) and
//! emissions are tracked in kilograms, shown in tonnes.

pub mod co2e;
pub mod date;
pub mod debounce;

pub use co2e::{calculate_co2e, ActivityType};
pub use date::format_date;
pub use debounce::Debouncer;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Format with comma grouping and exactly `decimals` fraction digits.
///
/// Exact halves round away from zero (`2.5` -> `3`, `0.125` -> `0.13`).
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = round_half_away(value.abs(), decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && !is_zero(&fixed) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Format as US dollars, e.g. `$1,234.50`
pub fn format_currency(value: f64) -> String {
    let amount = format_number(value.abs(), 2);
    if value < 0.0 && amount != "0.00" {
        format!("-${}", amount)
    } else {
        format!("${}", amount)
    }
}

/// Kilograms of CO2e as tonnes, as shown in chart tooltips
pub fn format_tonnes(kg: f64) -> String {
    format!("{} tonnes CO₂e", to_fixed(kg / 1000.0, 3))
}

/// Kilograms of CO2e as a short axis tick label
pub fn format_tonnes_axis(kg: f64) -> String {
    format!("{} t", to_fixed(kg / 1000.0, 1))
}

/// Turn a snake_case category key into a label: `fuel_combustion` -> `Fuel combustion`
pub fn humanize_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.map(|c| if c == '_' { ' ' } else { c }))
            .collect(),
        None => String::new(),
    }
}

/// Fixed-point text without grouping, rounding exact halves away from zero
fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }
    let fixed = round_half_away(value.abs(), decimals);
    if value < 0.0 && !is_zero(&fixed) {
        format!("-{}", fixed)
    } else {
        fixed
    }
}

// No "-0.00" for values that round to zero
fn is_zero(fixed: &str) -> bool {
    fixed.bytes().all(|b| b == b'0' || b == b'.')
}

/// `{:.N}` on a finite, non-negative value, except that a value lying exactly
/// halfway between two N-digit results takes the larger one. std formatting
/// works on the exact binary value, so `1.005` (stored just below) stays `1.00`.
fn round_half_away(abs: f64, decimals: usize) -> String {
    if !is_exact_tie(abs, decimals) {
        return format!("{:.*}", decimals, abs);
    }

    // A tie has exactly `decimals + 1` fraction digits, the last being 5
    let mut digits = format!("{:.*}", decimals + 1, abs).into_bytes();
    digits.pop();
    if digits.last() == Some(&b'.') {
        digits.pop();
    }

    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => continue,
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        digits.insert(0, b'1');
    }
    String::from_utf8(digits).unwrap_or_default()
}

/// Whether `value * 10^decimals` sits exactly halfway between two integers.
///
/// With `value = m * 2^e` and `m` odd, `value * 10^d * 2 = m * 5^d * 2^(e+d+1)`
/// is an odd integer exactly when `e + d + 1 == 0`.
fn is_exact_tie(value: f64, decimals: usize) -> bool {
    if value == 0.0 || !value.is_finite() {
        return false;
    }
    let bits = value.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };
    let exponent = exponent + i64::from(mantissa.trailing_zeros());
    exponent + decimals as i64 + 1 == 0
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.5, 2), "1,234.50");
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_number(-98765.4321, 3), "-98,765.432");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_format_number_rounds_ties_away_from_zero() {
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(3.5, 0), "4");
        assert_eq!(format_number(-2.5, 0), "-3");
        assert_eq!(format_number(0.125, 2), "0.13");
        assert_eq!(format_number(999.5, 0), "1,000");
        assert_eq!(format_number(9.995, 2), "9.99"); // stored just below the tie
        assert_eq!(format_number(1.005, 2), "1.00"); // stored just below the tie
        assert_eq!(format_number(1234.5, 2), "1,234.50");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(99.0), "$99.00");
        assert_eq!(format_currency(-12.0), "-$12.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(0.125), "$0.13");
        assert_eq!(format_currency(-0.125), "-$0.13");
    }

    #[test]
    fn test_format_tonnes() {
        assert_eq!(format_tonnes(1500.0), "1.500 tonnes CO₂e");
        assert_eq!(format_tonnes(42.0), "0.042 tonnes CO₂e");
        assert_eq!(format_tonnes_axis(2500.0), "2.5 t");
        assert_eq!(format_tonnes_axis(250.0), "0.3 t");
        assert_eq!(format_tonnes(62.5), "0.063 tonnes CO₂e");
        assert_eq!(format_tonnes(-1500.0), "-1.500 tonnes CO₂e");
    }

    #[test]
    fn test_humanize_label() {
        assert_eq!(humanize_label("energy"), "Energy");
        assert_eq!(humanize_label("fuel_combustion"), "Fuel combustion");
        assert_eq!(humanize_label("scope_3_travel"), "Scope 3 travel");
        assert_eq!(humanize_label(""), "");
    }
}
