//! Layered numbers for game economies.
//!
//! `layered-num` defines the canonical numeric type for quantities that
//! grow from zero to magnitudes far past the `f64` ceiling: currency,
//! lifetime totals, production rates. Values keep an exact
//! mantissa × 10^exponent form while the exponent fits comfortably in an
//! integer, silently switch to a log₁₀ representation when it no longer
//! does, and switch back when they shrink. Every operation is pure and
//! returns a freshly normalized value, so instances can be shared freely
//! across readers.
//!
//! ```
//! use layered_num::{Layer, LayeredNumber};
//!
//! let gold = LayeredNumber::from_f64(1234.5);
//! assert_eq!(gold.to_string(), "1 234,5");
//!
//! // a million orders of magnitude later the exponent itself overflows
//! // into log form
//! let hoard = LayeredNumber::from_layer0(1.0, 1_000_000.0);
//! assert_eq!(hoard.layer(), Layer::Layer1);
//! assert_eq!(hoard.to_string(), "10^1e6");
//! ```

pub mod config;
pub mod number;
pub mod saved;

mod parse;

pub use config::LayerConfig;
pub use number::display::FormatOptions;
pub use number::{Layer, LayeredNumber, Sign};
pub use parse::ParseNumberError;
pub use saved::SavedNumber;
