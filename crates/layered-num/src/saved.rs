//! The persisted five-field form of a layered number.
//!
//! Save files store each quantity as exactly this structure, so its shape
//! is frozen: `sign` (−1|0|1), `layer` (0|1), `mantissa`, `exponent`,
//! `value`. Fields that don't belong to the current layer hold their zero
//! defaults. Loading runs the full normalizing constructor, so a
//! hand-edited or stale save still comes back invariant-consistent.

use crate::config::LayerConfig;
use crate::number::{Layer, LayeredNumber, Repr, Sign};

/// Plain serialized form of a [`LayeredNumber`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedNumber {
    pub sign: i8,
    pub layer: u8,
    pub mantissa: f64,
    pub exponent: f64,
    pub value: f64,
}

impl SavedNumber {
    /// The persisted zero state.
    pub const ZERO: Self = Self {
        sign: 0,
        layer: 0,
        mantissa: 0.0,
        exponent: 0.0,
        value: 0.0,
    };
}

impl LayeredNumber {
    /// The five logical fields exactly as held, nothing derived.
    pub fn to_saved(&self) -> SavedNumber {
        match self.repr {
            Repr::Zero => SavedNumber::ZERO,
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => SavedNumber {
                sign: sign.as_i8(),
                layer: 0,
                mantissa,
                exponent,
                value: 0.0,
            },
            Repr::Layer1 { sign, value } => SavedNumber {
                sign: sign.as_i8(),
                layer: 1,
                mantissa: 0.0,
                exponent: 0.0,
                value,
            },
        }
    }

    /// Rebuilds a number from its persisted form, renormalizing
    /// defensively. A zero sign, an unknown layer discriminator or
    /// non-finite Layer0 parts all degrade to zero.
    pub fn from_saved(saved: &SavedNumber) -> Self {
        Self::from_saved_with(saved, &LayerConfig::DEFAULT)
    }

    /// [`Self::from_saved`] with explicit thresholds.
    pub fn from_saved_with(saved: &SavedNumber, cfg: &LayerConfig) -> Self {
        let sign = if saved.sign < 0 {
            Sign::Negative
        } else if saved.sign > 0 {
            Sign::Positive
        } else {
            return Self::ZERO;
        };
        match Layer::from_repr(saved.layer) {
            Some(Layer::Layer0) => {
                if !saved.mantissa.is_finite() || !saved.exponent.is_finite() {
                    return Self::ZERO;
                }
                Self::normalized(
                    Repr::Layer0 {
                        sign,
                        mantissa: saved.mantissa,
                        exponent: saved.exponent,
                    },
                    cfg,
                )
            }
            Some(Layer::Layer1) => Self::normalized(
                Repr::Layer1 {
                    sign,
                    value: saved.value,
                },
                cfg,
            ),
            None => Self::ZERO,
        }
    }
}

impl From<SavedNumber> for LayeredNumber {
    fn from(saved: SavedNumber) -> Self {
        Self::from_saved(&saved)
    }
}

impl From<LayeredNumber> for SavedNumber {
    fn from(number: LayeredNumber) -> Self {
        number.to_saved()
    }
}
