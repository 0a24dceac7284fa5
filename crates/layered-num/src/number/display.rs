//! Display formatting.
//!
//! Three shapes, picked by representation:
//! - small Layer0 values (|exponent| < 6) render as a grouped decimal with
//!   at most two fraction digits, e.g. `1 234,5`;
//! - larger Layer0 values render as scientific notation, e.g. `5.00e10`;
//! - Layer1 values render as `10^x` with the exponent formatted by
//!   magnitude band.

use core::fmt;

use super::{LayeredNumber, Repr, Sign};

/// Separators for the grouped-decimal shape.
///
/// The original application leaned on the host locale here; this crate has
/// no ambient locale, so the separators are explicit with defaults matching
/// the game's reference locale (space grouping, comma decimal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub group_separator: char,
    pub decimal_separator: char,
}

impl FormatOptions {
    pub const DEFAULT: Self = Self {
        group_separator: ' ',
        decimal_separator: ',',
    };
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LayeredNumber {
    /// Renders with [`FormatOptions::DEFAULT`]; same output as `Display`.
    pub fn to_display_string(&self) -> String {
        self.to_string_with(&FormatOptions::DEFAULT)
    }

    /// Renders with explicit separators.
    pub fn to_string_with(&self, opts: &FormatOptions) -> String {
        match self.repr {
            Repr::Zero => "0".to_string(),
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => {
                if exponent.abs() < 6.0 {
                    format_grouped(sign, mantissa * 10f64.powf(exponent), opts)
                } else {
                    format!("{}{:.2}e{}", sign_prefix(sign), mantissa, exponent as i64)
                }
            }
            Repr::Layer1 { sign, value } => {
                format!("{}10^{}", sign_prefix(sign), format_log_exponent(value))
            }
        }
    }
}

impl fmt::Display for LayeredNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&FormatOptions::DEFAULT))
    }
}

const fn sign_prefix(sign: Sign) -> &'static str {
    match sign {
        Sign::Negative => "-",
        Sign::Positive => "",
    }
}

/// Grouped decimal with at most two fraction digits, trailing zeros
/// trimmed. `magnitude` is positive and below 10^6.
fn format_grouped(sign: Sign, magnitude: f64, opts: &FormatOptions) -> String {
    // round once in hundredths space so the integer/fraction split can't
    // drift from the rounded value
    let hundredths = (magnitude * 100.0).round() as i64;
    let int_part = hundredths / 100;
    let frac_part = hundredths % 100;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(opts.group_separator);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    out.push_str(sign_prefix(sign));
    out.push_str(&grouped);
    if frac_part != 0 {
        out.push(opts.decimal_separator);
        if frac_part % 10 == 0 {
            out.push_str(&(frac_part / 10).to_string());
        } else {
            out.push_str(&format!("{frac_part:02}"));
        }
    }
    out
}

/// Formats a Layer1 log-value: infinity symbol for non-finite values, two
/// fraction digits below 1 000, one up to 10 000, scientific notation with
/// trailing zeros and a bare `e0` stripped beyond that.
fn format_log_exponent(value: f64) -> String {
    if !value.is_finite() {
        return "∞".to_string();
    }
    let magnitude = value.abs();
    if magnitude < 1_000.0 {
        format!("{value:.2}")
    } else if magnitude < 10_000.0 {
        format!("{value:.1}")
    } else {
        let formatted = format!("{value:.2e}");
        match formatted.split_once('e') {
            Some((mantissa, exp)) => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                if exp == "0" {
                    mantissa.to_string()
                } else {
                    format!("{mantissa}e{exp}")
                }
            }
            None => formatted,
        }
    }
}
