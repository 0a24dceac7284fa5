//! The layered number value type.
//!
//! A [`LayeredNumber`] tracks a game-economy quantity that can grow far past
//! the `f64` ceiling. Small values live in **Layer0** as an exact
//! `sign × mantissa × 10^exponent` with the mantissa normalized to `[1, 10)`;
//! once the exponent itself crosses the promotion threshold the value moves
//! to **Layer1**, which stores only `log10(magnitude)`. Normalization runs
//! after every construction and every operation, so no consumer can ever
//! observe a half-normalized instance.
//!
//! State machine: `{Zero, Layer0-nonzero, Layer1}`. Zero is reachable from
//! either nonzero state whenever a magnitude collapses below epsilon;
//! Layer0 ↔ Layer1 transitions happen only inside normalization.

pub mod display;

mod arith;
mod cmp;

use strum::FromRepr;

use crate::config::LayerConfig;

/// Sign of a nonzero number. Zero is a distinguished state of
/// [`LayeredNumber`], not a third sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    /// The opposite sign.
    pub const fn flip(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }

    /// Sign of a product of two signed magnitudes.
    pub const fn combine(self, other: Self) -> Self {
        if matches!(self, Sign::Positive) == matches!(other, Sign::Positive) {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }

    /// `-1` or `+1`, matching the persisted representation.
    pub const fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Positive => 1,
        }
    }

    /// `-1.0` or `+1.0`, for scaling a magnitude.
    pub const fn unit(self) -> f64 {
        match self {
            Sign::Negative => -1.0,
            Sign::Positive => 1.0,
        }
    }

    /// Sign of a finite native number; `None` for zero and NaN.
    pub fn of_f64(x: f64) -> Option<Self> {
        if x > 0.0 {
            Some(Sign::Positive)
        } else if x < 0.0 {
            Some(Sign::Negative)
        } else {
            None
        }
    }
}

/// Representation layer discriminator.
///
/// Exactly two layers exist. Magnitudes whose Layer1 log-value itself
/// approaches the `f64` ceiling (beyond `10^(10^308)`) have no further
/// promotion path and saturate toward infinity; a third layer is
/// intentionally not provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr)]
#[repr(u8)]
pub enum Layer {
    Layer0 = 0,
    Layer1 = 1,
}

/// Internal tagged representation. Kept private so the only way to obtain
/// an instance is through a normalizing constructor.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Repr {
    Zero,
    Layer0 { sign: Sign, mantissa: f64, exponent: f64 },
    Layer1 { sign: Sign, value: f64 },
}

/// A signed, possibly-zero real number in one of two magnitude layers.
///
/// Every operation returns a new, independently normalized instance; an
/// existing instance is never mutated. Construction never fails: invalid
/// input (NaN, infinities, out-of-range save fields) degrades to zero.
///
/// ```
/// use layered_num::LayeredNumber;
///
/// let a = LayeredNumber::from_f64(2.0);
/// let b = LayeredNumber::from_f64(3.0);
/// assert_eq!(a + b, LayeredNumber::from_f64(5.0));
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::saved::SavedNumber", into = "crate::saved::SavedNumber")
)]
pub struct LayeredNumber {
    pub(crate) repr: Repr,
}

impl LayeredNumber {
    /// The canonical zero.
    pub const ZERO: Self = Self { repr: Repr::Zero };

    /// One, in Layer0.
    pub const ONE: Self = Self {
        repr: Repr::Layer0 {
            sign: Sign::Positive,
            mantissa: 1.0,
            exponent: 0.0,
        },
    };

    /// Builds a number from a native float. Zero, NaN and infinities all
    /// degrade to [`Self::ZERO`], as do magnitudes below epsilon.
    pub fn from_f64(x: f64) -> Self {
        Self::from_f64_with(x, &LayerConfig::DEFAULT)
    }

    /// [`Self::from_f64`] with explicit thresholds.
    pub fn from_f64_with(x: f64, cfg: &LayerConfig) -> Self {
        if !x.is_finite() {
            return Self::ZERO;
        }
        match Sign::of_f64(x) {
            Some(sign) => Self::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa: x.abs(),
                    exponent: 0.0,
                },
                cfg,
            ),
            None => Self::ZERO,
        }
    }

    /// Builds a Layer0 number directly from a (possibly signed) mantissa
    /// and an integer-valued exponent, then normalizes. Non-finite parts
    /// degrade to zero.
    pub fn from_layer0(mantissa: f64, exponent: f64) -> Self {
        Self::from_layer0_with(mantissa, exponent, &LayerConfig::DEFAULT)
    }

    /// [`Self::from_layer0`] with explicit thresholds.
    pub fn from_layer0_with(mantissa: f64, exponent: f64, cfg: &LayerConfig) -> Self {
        if !mantissa.is_finite() || !exponent.is_finite() {
            return Self::ZERO;
        }
        match Sign::of_f64(mantissa) {
            Some(sign) => Self::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa: mantissa.abs(),
                    exponent: exponent.floor(),
                },
                cfg,
            ),
            None => Self::ZERO,
        }
    }

    /// Builds a Layer1 number directly from `log10(magnitude)` and a sign,
    /// then normalizes (small log-values demote to Layer0; non-finite ones
    /// clamp to positive infinity).
    pub fn from_layer1(value: f64, sign: Sign) -> Self {
        Self::from_layer1_with(value, sign, &LayerConfig::DEFAULT)
    }

    /// [`Self::from_layer1`] with explicit thresholds.
    pub fn from_layer1_with(value: f64, sign: Sign, cfg: &LayerConfig) -> Self {
        Self::normalized(Repr::Layer1 { sign, value }, cfg)
    }

    /// True for the canonical zero state.
    pub const fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Zero)
    }

    /// `-1`, `0` or `+1`.
    pub const fn signum(&self) -> i8 {
        match self.repr {
            Repr::Zero => 0,
            Repr::Layer0 { sign, .. } | Repr::Layer1 { sign, .. } => sign.as_i8(),
        }
    }

    /// The layer this value is currently held in. Zero reports
    /// [`Layer::Layer0`], matching its persisted form.
    pub const fn layer(&self) -> Layer {
        match self.repr {
            Repr::Zero | Repr::Layer0 { .. } => Layer::Layer0,
            Repr::Layer1 { .. } => Layer::Layer1,
        }
    }

    /// Sign of a nonzero value; `None` for zero.
    pub(crate) const fn sign(&self) -> Option<Sign> {
        match self.repr {
            Repr::Zero => None,
            Repr::Layer0 { sign, .. } | Repr::Layer1 { sign, .. } => Some(sign),
        }
    }

    /// `log10` of the magnitude. Negative infinity for zero.
    pub(crate) fn magnitude_log10(&self) -> f64 {
        match self.repr {
            Repr::Zero => f64::NEG_INFINITY,
            Repr::Layer0 {
                mantissa, exponent, ..
            } => mantissa.log10() + exponent,
            Repr::Layer1 { value, .. } => value,
        }
    }

    /// Converts this value to an equivalent representation in the requested
    /// layer.
    ///
    /// Promotion recomputes the log-value from mantissa/exponent and always
    /// succeeds. Demotion reconstructs mantissa/exponent from the log-value;
    /// when the value is too large for an integer exponent the
    /// reconstruction would immediately promote again, in which case the
    /// original value is returned unchanged rather than a corrupted
    /// intermediate.
    pub fn to_layer(&self, target: Layer) -> Self {
        self.to_layer_with(target, &LayerConfig::DEFAULT)
    }

    /// [`Self::to_layer`] with explicit thresholds.
    pub fn to_layer_with(&self, target: Layer, cfg: &LayerConfig) -> Self {
        match (self.repr, target) {
            (Repr::Zero, _) => *self,
            (Repr::Layer0 { .. }, Layer::Layer0) | (Repr::Layer1 { .. }, Layer::Layer1) => *self,
            (
                Repr::Layer0 {
                    sign,
                    mantissa,
                    exponent,
                },
                Layer::Layer1,
            ) => Self {
                repr: Repr::Layer1 {
                    sign,
                    value: mantissa.log10() + exponent,
                },
            },
            (Repr::Layer1 { sign, value }, Layer::Layer0) => {
                let exponent = value.floor();
                let mantissa = 10f64.powf(value - exponent);
                let demoted = Self::normalized(
                    Repr::Layer0 {
                        sign,
                        mantissa,
                        exponent,
                    },
                    cfg,
                );
                if demoted.layer() == Layer::Layer0 {
                    demoted
                } else {
                    *self
                }
            }
        }
    }

    /// Approximate native value. Layer1 magnitudes beyond the `f64`
    /// exponent ceiling saturate to signed infinity.
    pub fn to_f64(&self) -> f64 {
        match self.repr {
            Repr::Zero => 0.0,
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => sign.unit() * mantissa * 10f64.powf(exponent),
            Repr::Layer1 { sign, value } => {
                if value > f64::MAX.log10() {
                    sign.unit() * f64::INFINITY
                } else {
                    sign.unit() * 10f64.powf(value)
                }
            }
        }
    }

    pub(crate) fn normalized(repr: Repr, cfg: &LayerConfig) -> Self {
        Self {
            repr: normalize(repr, cfg),
        }
    }
}

impl Default for LayeredNumber {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for LayeredNumber {
    fn from(x: f64) -> Self {
        Self::from_f64(x)
    }
}

/// Normalization. Idempotent; every constructor and operation funnels its
/// raw result through here.
///
/// Layer0: stray negative mantissas fold into the sign, digits shift
/// between mantissa and exponent until `1 <= mantissa < 10`, a non-finite
/// mantissa (product overflow) promotes straight to Layer1, sub-epsilon
/// magnitudes collapse to zero, and an exponent at or past the promotion
/// threshold promotes to Layer1.
///
/// Layer1: a non-finite value clamps to positive infinity, and a value
/// below the demotion threshold reconstructs mantissa/exponent and
/// re-normalizes as Layer0.
fn normalize(repr: Repr, cfg: &LayerConfig) -> Repr {
    match repr {
        Repr::Zero => Repr::Zero,
        Repr::Layer0 {
            sign,
            mut mantissa,
            exponent,
        } => {
            if mantissa == 0.0 {
                return Repr::Zero;
            }
            if mantissa < 0.0 {
                return normalize(
                    Repr::Layer0 {
                        sign: sign.flip(),
                        mantissa: -mantissa,
                        exponent,
                    },
                    cfg,
                );
            }
            if !mantissa.is_finite() {
                return normalize(
                    Repr::Layer1 {
                        sign,
                        value: mantissa.log10() + exponent,
                    },
                    cfg,
                );
            }
            let mut exponent = exponent;
            while mantissa >= 10.0 {
                mantissa /= 10.0;
                exponent += 1.0;
            }
            while mantissa < 1.0 {
                mantissa *= 10.0;
                exponent -= 1.0;
            }
            if exponent + mantissa.log10() < cfg.epsilon.log10() {
                return Repr::Zero;
            }
            if exponent >= cfg.promote_exponent {
                return normalize(
                    Repr::Layer1 {
                        sign,
                        value: mantissa.log10() + exponent,
                    },
                    cfg,
                );
            }
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            }
        }
        Repr::Layer1 { sign, value } => {
            if !value.is_finite() {
                return Repr::Layer1 {
                    sign,
                    value: f64::INFINITY,
                };
            }
            if value < cfg.demote_value {
                let exponent = value.floor();
                let mantissa = 10f64.powf(value - exponent);
                return normalize(
                    Repr::Layer0 {
                        sign,
                        mantissa,
                        exponent,
                    },
                    cfg,
                );
            }
            Repr::Layer1 { sign, value }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(n: &LayeredNumber) -> (Sign, f64, f64) {
        match n.repr {
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => (sign, mantissa, exponent),
            _ => panic!("expected Layer0, got {:?}", n.repr),
        }
    }

    fn log_value(n: &LayeredNumber) -> f64 {
        match n.repr {
            Repr::Layer1 { value, .. } => value,
            _ => panic!("expected Layer1, got {:?}", n.repr),
        }
    }

    #[test]
    fn from_f64_normalizes_digits() {
        let n = LayeredNumber::from_f64(1234.5);
        let (sign, mantissa, exponent) = parts(&n);
        assert_eq!(sign, Sign::Positive);
        assert!((mantissa - 1.2345).abs() < 1e-12);
        assert_eq!(exponent, 3.0);
    }

    #[test]
    fn from_f64_captures_sign() {
        let n = LayeredNumber::from_f64(-0.025);
        let (sign, mantissa, exponent) = parts(&n);
        assert_eq!(sign, Sign::Negative);
        assert!((mantissa - 2.5).abs() < 1e-12);
        assert_eq!(exponent, -2.0);
    }

    #[test]
    fn invalid_input_degrades_to_zero() {
        assert!(LayeredNumber::from_f64(0.0).is_zero());
        assert!(LayeredNumber::from_f64(f64::NAN).is_zero());
        assert!(LayeredNumber::from_f64(f64::INFINITY).is_zero());
        assert!(LayeredNumber::from_layer0(f64::NAN, 3.0).is_zero());
        assert!(LayeredNumber::from_layer0(2.0, f64::INFINITY).is_zero());
    }

    #[test]
    fn sub_epsilon_magnitude_collapses_to_zero() {
        assert!(LayeredNumber::from_f64(1e-13).is_zero());
        assert!(LayeredNumber::from_layer0(1.0, -20.0).is_zero());
        // exactly epsilon survives
        assert!(!LayeredNumber::from_f64(1e-12).is_zero());
    }

    #[test]
    fn promotion_at_threshold() {
        let n = LayeredNumber::from_layer0(1.0, 1_000_000.0);
        assert_eq!(n.layer(), Layer::Layer1);
        assert_eq!(log_value(&n), 1_000_000.0);
    }

    #[test]
    fn below_threshold_stays_layer0() {
        let n = LayeredNumber::from_layer0(9.99, 999_999.0);
        assert_eq!(n.layer(), Layer::Layer0);
    }

    #[test]
    fn demotion_below_threshold() {
        let n = LayeredNumber::from_layer1(4.999, Sign::Positive);
        assert_eq!(n.layer(), Layer::Layer0);
        let (_, mantissa, exponent) = parts(&n);
        assert_eq!(exponent, 4.0);
        assert!((mantissa - 10f64.powf(0.999)).abs() < 1e-9);
        assert!((n.to_f64() - 10f64.powf(4.999)).abs() < 1e-6);
    }

    #[test]
    fn layer1_at_threshold_stays_layer1() {
        let n = LayeredNumber::from_layer1(5.0, Sign::Positive);
        assert_eq!(n.layer(), Layer::Layer1);
        assert_eq!(log_value(&n), 5.0);
    }

    #[test]
    fn non_finite_layer1_clamps_to_infinity() {
        let n = LayeredNumber::from_layer1(f64::NAN, Sign::Positive);
        assert_eq!(n.layer(), Layer::Layer1);
        assert!(log_value(&n).is_infinite());
        assert_eq!(n.to_f64(), f64::INFINITY);
    }

    #[test]
    fn negative_mantissa_folds_into_sign() {
        let n = LayeredNumber::from_layer0(-250.0, 0.0);
        let (sign, mantissa, exponent) = parts(&n);
        assert_eq!(sign, Sign::Negative);
        assert!((mantissa - 2.5).abs() < 1e-12);
        assert_eq!(exponent, 2.0);
        assert_eq!(n.signum(), -1);
    }

    #[test]
    fn to_layer_round_trip_small_value() {
        let n = LayeredNumber::from_f64(1234.5);
        let lifted = n.to_layer(Layer::Layer1);
        assert_eq!(lifted.layer(), Layer::Layer1);
        assert!((lifted.magnitude_log10() - 1234.5f64.log10()).abs() < 1e-12);
        let back = lifted.to_layer(Layer::Layer0);
        assert_eq!(back.layer(), Layer::Layer0);
        assert!((back.to_f64() - 1234.5).abs() < 1e-9);
    }

    #[test]
    fn to_layer_demotion_guard_keeps_large_values() {
        // floor(1e7) is far past the promotion threshold, so the demotion
        // would bounce straight back; the original must come back unchanged.
        let n = LayeredNumber::from_layer1(1e7, Sign::Positive);
        let demoted = n.to_layer(Layer::Layer0);
        assert_eq!(demoted.layer(), Layer::Layer1);
        assert_eq!(log_value(&demoted), 1e7);
    }

    #[test]
    fn to_f64_saturates_past_native_ceiling() {
        let n = LayeredNumber::from_layer1(400.0, Sign::Negative);
        assert_eq!(n.to_f64(), f64::NEG_INFINITY);
        let m = LayeredNumber::from_layer1(300.0, Sign::Positive);
        assert!((m.to_f64().log10() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let cfg = LayerConfig {
            promote_exponent: 10.0,
            demote_value: 3.0,
            ..LayerConfig::DEFAULT
        };
        let n = LayeredNumber::from_layer0_with(1.0, 10.0, &cfg);
        assert_eq!(n.layer(), Layer::Layer1);
        let m = LayeredNumber::from_layer1_with(2.5, Sign::Positive, &cfg);
        assert_eq!(m.layer(), Layer::Layer0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let n = LayeredNumber::from_f64(987654.321);
        let renorm = LayeredNumber::normalized(n.repr, &LayerConfig::DEFAULT);
        let (s1, m1, e1) = parts(&n);
        let (s2, m2, e2) = parts(&renorm);
        assert_eq!(s1, s2);
        assert_eq!(m1, m2);
        assert_eq!(e1, e2);
    }
}
