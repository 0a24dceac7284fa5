//! Parsing the display shapes back into numbers.
//!
//! Accepts the three forms the type itself renders: the literal `0`,
//! plain/scientific decimals (`1 234,5`, `5.00e10`) and the log form
//! (`10^123.46`, `10^1e6`, `10^∞`). This is the inverse of `Display` for
//! the default [`FormatOptions`](crate::FormatOptions) and the only
//! fallible surface of the crate.

use core::str::FromStr;

use thiserror::Error;

use crate::number::{LayeredNumber, Sign};

/// Failure to parse a layered-number literal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseNumberError {
    #[error("empty input")]
    Empty,
    #[error("invalid number literal: {0:?}")]
    InvalidLiteral(String),
    #[error("invalid log-form exponent: {0:?}")]
    InvalidExponent(String),
}

impl FromStr for LayeredNumber {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseNumberError::Empty);
        }
        let (sign, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (Sign::Negative, rest),
            None => (Sign::Positive, trimmed),
        };
        if body == "0" {
            return Ok(Self::ZERO);
        }
        if let Some(exponent) = body.strip_prefix("10^") {
            let value = if exponent == "∞" {
                f64::INFINITY
            } else {
                f64::from_str(exponent)
                    .map_err(|_| ParseNumberError::InvalidExponent(exponent.to_string()))?
            };
            return Ok(Self::from_layer1(value, sign));
        }
        // grouped decimal or scientific: drop grouping spaces, read the
        // comma as the decimal separator
        let cleaned: String = body
            .chars()
            .filter(|c| *c != ' ')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        let invalid = || ParseNumberError::InvalidLiteral(body.to_string());
        let magnitude = match cleaned.split_once(['e', 'E']) {
            // parse mantissa and exponent separately so exponents past the
            // f64 ceiling survive
            Some((mantissa, exponent)) => {
                let mantissa = f64::from_str(mantissa).map_err(|_| invalid())?;
                let exponent = f64::from_str(exponent).map_err(|_| invalid())?;
                return Ok(Self::from_layer0(sign.unit() * mantissa, exponent));
            }
            None => f64::from_str(&cleaned).map_err(|_| invalid())?,
        };
        Ok(Self::from_f64(sign.unit() * magnitude))
    }
}
