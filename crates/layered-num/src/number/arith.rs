//! Arithmetic over layered numbers.
//!
//! Addition and subtraction only ever combine same-signed magnitudes: a
//! mixed-sign addition is rewritten as a subtraction of the negation and
//! vice versa. Same-layer magnitudes combine directly (exact mantissa math
//! in Layer0, log-sum-exp in Layer1); mixed-layer operands are lifted into
//! log space first. Whenever the operands sit more than the log-difference
//! limit apart, the smaller one is dropped as negligible — it could not
//! move the larger mantissa within representable precision.

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::config::LayerConfig;

use super::{Layer, LayeredNumber, Repr, Sign};

impl LayeredNumber {
    /// Sum of `self` and `rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        self.add_with(rhs, &LayerConfig::DEFAULT)
    }

    /// [`Self::add`] with explicit thresholds.
    pub fn add_with(&self, rhs: &Self, cfg: &LayerConfig) -> Self {
        let (s1, s2) = match (self.sign(), rhs.sign()) {
            (None, _) => return *rhs,
            (_, None) => return *self,
            (Some(a), Some(b)) => (a, b),
        };
        if s1 != s2 {
            return self.sub_with(&rhs.negate(), cfg);
        }
        magnitude_add(self, rhs, s1, cfg)
    }

    /// Difference of `self` and `rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.sub_with(rhs, &LayerConfig::DEFAULT)
    }

    /// [`Self::sub`] with explicit thresholds.
    pub fn sub_with(&self, rhs: &Self, cfg: &LayerConfig) -> Self {
        let (s1, s2) = match (self.sign(), rhs.sign()) {
            (_, None) => return *self,
            (None, _) => return rhs.negate(),
            (Some(a), Some(b)) => (a, b),
        };
        if s1 != s2 {
            return self.add_with(&rhs.negate(), cfg);
        }
        // Same sign: combine magnitudes, larger minus smaller. The result
        // carries the minuend's sign when the minuend dominates and the
        // flipped sign when the subtrahend does.
        match self.cmp_magnitude(rhs) {
            Ordering::Greater => magnitude_sub(self, rhs, s1, cfg),
            Ordering::Less => magnitude_sub(rhs, self, s1.flip(), cfg),
            Ordering::Equal => Self::ZERO,
        }
    }

    /// Product of `self` and `rhs`. A zero operand on either side yields
    /// zero immediately.
    pub fn mul(&self, rhs: &Self) -> Self {
        self.mul_with(rhs, &LayerConfig::DEFAULT)
    }

    /// [`Self::mul`] with explicit thresholds.
    pub fn mul_with(&self, rhs: &Self, cfg: &LayerConfig) -> Self {
        let (s1, s2) = match (self.sign(), rhs.sign()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Self::ZERO,
        };
        let sign = s1.combine(s2);
        match (self.repr, rhs.repr) {
            (
                Repr::Layer0 {
                    mantissa: ma,
                    exponent: ea,
                    ..
                },
                Repr::Layer0 {
                    mantissa: mb,
                    exponent: eb,
                    ..
                },
            ) => Self::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa: ma * mb,
                    exponent: ea + eb,
                },
                cfg,
            ),
            // At least one operand in log form: log(a*b) = log a + log b.
            _ => Self::normalized(
                Repr::Layer1 {
                    sign,
                    value: self.magnitude_log10() + rhs.magnitude_log10(),
                },
                cfg,
            ),
        }
    }

    /// Fast-path product with a plain native number, skipping the
    /// intermediate layered operand. A zero or non-finite factor yields
    /// zero.
    pub fn mul_f64(&self, factor: f64) -> Self {
        self.mul_f64_with(factor, &LayerConfig::DEFAULT)
    }

    /// [`Self::mul_f64`] with explicit thresholds.
    pub fn mul_f64_with(&self, factor: f64, cfg: &LayerConfig) -> Self {
        if !factor.is_finite() {
            return Self::ZERO;
        }
        let fsign = match Sign::of_f64(factor) {
            Some(s) => s,
            None => return Self::ZERO,
        };
        match self.repr {
            Repr::Zero => Self::ZERO,
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => Self::normalized(
                Repr::Layer0 {
                    sign: sign.combine(fsign),
                    mantissa: mantissa * factor.abs(),
                    exponent,
                },
                cfg,
            ),
            Repr::Layer1 { sign, value } => Self::normalized(
                Repr::Layer1 {
                    sign: sign.combine(fsign),
                    value: value + factor.abs().log10(),
                },
                cfg,
            ),
        }
    }

    /// Quotient of `self` and `rhs`. Division where either operand is zero
    /// yields zero, never NaN.
    pub fn div(&self, rhs: &Self) -> Self {
        self.div_with(rhs, &LayerConfig::DEFAULT)
    }

    /// [`Self::div`] with explicit thresholds.
    pub fn div_with(&self, rhs: &Self, cfg: &LayerConfig) -> Self {
        let (s1, s2) = match (self.sign(), rhs.sign()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Self::ZERO,
        };
        let sign = s1.combine(s2);
        match (self.repr, rhs.repr) {
            (
                Repr::Layer0 {
                    mantissa: ma,
                    exponent: ea,
                    ..
                },
                Repr::Layer0 {
                    mantissa: mb,
                    exponent: eb,
                    ..
                },
            ) => Self::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa: ma / mb,
                    exponent: ea - eb,
                },
                cfg,
            ),
            _ => Self::normalized(
                Repr::Layer1 {
                    sign,
                    value: self.magnitude_log10() - rhs.magnitude_log10(),
                },
                cfg,
            ),
        }
    }

    /// `self` raised to a plain real power.
    ///
    /// A zero power yields one, a zero base yields zero, and the result
    /// keeps the base's sign: fractional and negative powers of negative
    /// bases are an approximation, not a mathematically correct signed
    /// power.
    pub fn pow(&self, power: f64) -> Self {
        self.pow_with(power, &LayerConfig::DEFAULT)
    }

    /// [`Self::pow`] with explicit thresholds.
    pub fn pow_with(&self, power: f64, cfg: &LayerConfig) -> Self {
        if power == 0.0 {
            return Self::ONE;
        }
        if !power.is_finite() {
            return Self::ZERO;
        }
        match self.repr {
            Repr::Zero => Self::ZERO,
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => Self::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa: mantissa.powf(power),
                    exponent: exponent * power,
                },
                cfg,
            ),
            Repr::Layer1 { sign, value } => Self::normalized(
                Repr::Layer1 {
                    sign,
                    value: value * power,
                },
                cfg,
            ),
        }
    }

    /// The value with its sign flipped. Zero stays zero.
    pub fn negate(&self) -> Self {
        let repr = match self.repr {
            Repr::Zero => Repr::Zero,
            Repr::Layer0 {
                sign,
                mantissa,
                exponent,
            } => Repr::Layer0 {
                sign: sign.flip(),
                mantissa,
                exponent,
            },
            Repr::Layer1 { sign, value } => Repr::Layer1 {
                sign: sign.flip(),
                value,
            },
        };
        Self { repr }
    }
}

/// `|a| + |b|` with the given result sign. Both operands are nonzero.
fn magnitude_add(a: &LayeredNumber, b: &LayeredNumber, sign: Sign, cfg: &LayerConfig) -> LayeredNumber {
    match (a.repr, b.repr) {
        (
            Repr::Layer0 {
                mantissa: ma,
                exponent: ea,
                ..
            },
            Repr::Layer0 {
                mantissa: mb,
                exponent: eb,
                ..
            },
        ) => {
            if ea == eb {
                return LayeredNumber::normalized(
                    Repr::Layer0 {
                        sign,
                        mantissa: ma + mb,
                        exponent: ea,
                    },
                    cfg,
                );
            }
            let (mhi, ehi, mlo, elo) = if ea > eb {
                (ma, ea, mb, eb)
            } else {
                (mb, eb, ma, ea)
            };
            if ehi - elo > cfg.log_diff_limit {
                // The smaller term cannot move the mantissa within
                // representable precision.
                return LayeredNumber::normalized(
                    Repr::Layer0 {
                        sign,
                        mantissa: mhi,
                        exponent: ehi,
                    },
                    cfg,
                );
            }
            LayeredNumber::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa: mhi + mlo * 10f64.powf(elo - ehi),
                    exponent: ehi,
                },
                cfg,
            )
        }
        (Repr::Layer1 { value: va, .. }, Repr::Layer1 { value: vb, .. }) => {
            let (hi, lo) = (va.max(vb), va.min(vb));
            if hi.is_infinite() || hi - lo > cfg.log_diff_limit {
                return LayeredNumber::normalized(Repr::Layer1 { sign, value: hi }, cfg);
            }
            // log-sum-exp: log(x + y) = log x + log(1 + y/x) for x >= y.
            LayeredNumber::normalized(
                Repr::Layer1 {
                    sign,
                    value: hi + (1.0 + 10f64.powf(lo - hi)).log10(),
                },
                cfg,
            )
        }
        _ => {
            let a1 = a.to_layer_with(Layer::Layer1, cfg);
            let b1 = b.to_layer_with(Layer::Layer1, cfg);
            magnitude_add(&a1, &b1, sign, cfg)
        }
    }
}

/// `|a| - |b|` with the given result sign. Both operands are nonzero and
/// `|a| > |b|`.
fn magnitude_sub(a: &LayeredNumber, b: &LayeredNumber, sign: Sign, cfg: &LayerConfig) -> LayeredNumber {
    match (a.repr, b.repr) {
        (
            Repr::Layer0 {
                mantissa: ma,
                exponent: ea,
                ..
            },
            Repr::Layer0 {
                mantissa: mb,
                exponent: eb,
                ..
            },
        ) => {
            if ea == eb {
                let mantissa = ma - mb;
                if mantissa <= cfg.epsilon {
                    return LayeredNumber::ZERO;
                }
                return LayeredNumber::normalized(
                    Repr::Layer0 {
                        sign,
                        mantissa,
                        exponent: ea,
                    },
                    cfg,
                );
            }
            if ea - eb > cfg.log_diff_limit {
                return LayeredNumber::normalized(
                    Repr::Layer0 {
                        sign,
                        mantissa: ma,
                        exponent: ea,
                    },
                    cfg,
                );
            }
            let mantissa = ma - mb * 10f64.powf(eb - ea);
            if mantissa <= cfg.epsilon {
                return LayeredNumber::ZERO;
            }
            LayeredNumber::normalized(
                Repr::Layer0 {
                    sign,
                    mantissa,
                    exponent: ea,
                },
                cfg,
            )
        }
        (Repr::Layer1 { value: va, .. }, Repr::Layer1 { value: vb, .. }) => {
            if va.is_infinite() || va - vb > cfg.log_diff_limit {
                return LayeredNumber::normalized(Repr::Layer1 { sign, value: va }, cfg);
            }
            // Subtractive log-sum-exp; the inner term collapsing to (or
            // past) epsilon means the difference is zero within precision.
            let inner = 1.0 - 10f64.powf(vb - va);
            if inner <= cfg.epsilon {
                return LayeredNumber::ZERO;
            }
            LayeredNumber::normalized(
                Repr::Layer1 {
                    sign,
                    value: va + inner.log10(),
                },
                cfg,
            )
        }
        _ => {
            let a1 = a.to_layer_with(Layer::Layer1, cfg);
            let b1 = b.to_layer_with(Layer::Layer1, cfg);
            magnitude_sub(&a1, &b1, sign, cfg)
        }
    }
}

impl Add for LayeredNumber {
    type Output = LayeredNumber;

    fn add(self, rhs: LayeredNumber) -> LayeredNumber {
        LayeredNumber::add(&self, &rhs)
    }
}

impl Sub for LayeredNumber {
    type Output = LayeredNumber;

    fn sub(self, rhs: LayeredNumber) -> LayeredNumber {
        LayeredNumber::sub(&self, &rhs)
    }
}

impl Mul for LayeredNumber {
    type Output = LayeredNumber;

    fn mul(self, rhs: LayeredNumber) -> LayeredNumber {
        LayeredNumber::mul(&self, &rhs)
    }
}

impl Mul<f64> for LayeredNumber {
    type Output = LayeredNumber;

    fn mul(self, rhs: f64) -> LayeredNumber {
        self.mul_f64(rhs)
    }
}

impl Div for LayeredNumber {
    type Output = LayeredNumber;

    fn div(self, rhs: LayeredNumber) -> LayeredNumber {
        LayeredNumber::div(&self, &rhs)
    }
}

impl Neg for LayeredNumber {
    type Output = LayeredNumber;

    fn neg(self) -> LayeredNumber {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use super::*;

    fn num(x: f64) -> LayeredNumber {
        LayeredNumber::from_f64(x)
    }

    #[test]
    fn add_same_exponent() {
        assert_eq!(num(2.0) + num(3.0), num(5.0));
    }

    #[test]
    fn add_carries_into_exponent() {
        let sum = num(9.5) + num(0.6);
        assert!((sum.to_f64() - 10.1).abs() < 1e-9);
        assert_eq!(sum.layer(), Layer::Layer0);
    }

    #[test]
    fn add_zero_is_identity() {
        let v = num(42.5);
        assert_eq!(v + LayeredNumber::ZERO, v);
        assert_eq!(LayeredNumber::ZERO + v, v);
    }

    #[test]
    fn negligible_term_is_dropped_exactly() {
        let small = LayeredNumber::from_layer0(1.0, 0.0);
        let big = LayeredNumber::from_layer0(1.0, 20.0);
        let sum = small.add(big);
        assert_eq!(sum.compare(&big), Ordering::Equal);
        assert_eq!(sum.to_saved(), big.to_saved());
    }

    #[test]
    fn near_terms_still_blend() {
        // 15 orders apart is the limit, not past it.
        let a = LayeredNumber::from_layer0(1.0, 15.0);
        let b = LayeredNumber::from_layer0(1.0, 0.0);
        let sum = a.add(b);
        assert!(sum.compare(&a) == Ordering::Greater);
    }

    #[test]
    fn mixed_sign_add_reduces_to_sub() {
        assert_eq!(num(5.0) + num(-3.0), num(2.0));
        assert_eq!(num(3.0) + num(-5.0), num(-2.0));
    }

    #[test]
    fn sub_self_is_zero() {
        let v = num(123.456);
        assert!(v.sub(v).is_zero());
    }

    #[test]
    fn sub_from_zero_negates() {
        assert_eq!(LayeredNumber::ZERO - num(4.0), num(-4.0));
    }

    #[test]
    fn layer1_log_sum_exp() {
        let a = LayeredNumber::from_layer1(6.0, Sign::Positive);
        let sum = a.add(a);
        // log10(2 * 10^6) = 6 + log10(2)
        assert!((sum.magnitude_log10() - (6.0 + 2f64.log10())).abs() < 1e-12);
    }

    #[test]
    fn layer1_subtraction_collapses_to_zero() {
        let a = LayeredNumber::from_layer1(8.0, Sign::Positive);
        assert!(a.sub(a).is_zero());
    }

    #[test]
    fn mixed_layer_addition_lifts_the_smaller() {
        let big = LayeredNumber::from_layer1(2_000_000.0, Sign::Positive);
        let small = num(12345.0);
        // far beyond the log-diff limit: the Layer0 term vanishes
        assert_eq!(big.add(small).compare(&big), Ordering::Equal);
        // and close mixed-layer operands actually blend
        let near = LayeredNumber::from_layer0(5.0, 999_999.0);
        let lifted = LayeredNumber::from_layer1(1_000_000.0, Sign::Positive);
        let sum = lifted.add(near);
        assert_eq!(sum.compare(&lifted), Ordering::Greater);
    }

    #[test]
    fn mul_layer0_is_exact() {
        assert_eq!(num(2.0) * num(3.0), num(6.0));
        assert_eq!(num(-2.0) * num(3.0), num(-6.0));
        assert_eq!(num(-2.0) * num(-3.0), num(6.0));
    }

    #[test]
    fn mul_promotes_across_threshold() {
        let a = LayeredNumber::from_layer0(5.0, 999_999.0);
        let product = a.mul(num(100.0));
        assert_eq!(product.layer(), Layer::Layer1);
        assert!((product.magnitude_log10() - (1_000_001.0 + 5f64.log10())).abs() < 1e-6);
    }

    #[test]
    fn mul_by_zero_is_zero() {
        assert!(num(7.0).mul(LayeredNumber::ZERO).is_zero());
        assert!(LayeredNumber::ZERO.mul(num(7.0)).is_zero());
    }

    #[test]
    fn mul_f64_fast_path() {
        assert!((num(12.0).mul_f64(3.0).to_f64() - 36.0).abs() < 1e-9);
        let halved = num(12.0).mul_f64(-0.5);
        assert_eq!(halved.signum(), -1);
        assert!((halved.to_f64() + 6.0).abs() < 1e-9);
        assert!(num(12.0).mul_f64(0.0).is_zero());
        assert!(num(12.0).mul_f64(f64::NAN).is_zero());

        let big = LayeredNumber::from_layer1(1e6, Sign::Positive);
        let scaled = big.mul_f64(100.0);
        assert!((scaled.magnitude_log10() - (1e6 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn div_inverse_of_mul() {
        let v = num(84.0);
        assert_eq!(v.div(num(2.0)), num(42.0));
        assert_eq!(v.div(v), LayeredNumber::ONE);
    }

    #[test]
    fn div_with_zero_operand_is_zero() {
        assert!(num(5.0).div(LayeredNumber::ZERO).is_zero());
        assert!(LayeredNumber::ZERO.div(num(5.0)).is_zero());
    }

    #[test]
    fn div_layer1_can_demote() {
        let a = LayeredNumber::from_layer1(1_000_003.0, Sign::Positive);
        let b = LayeredNumber::from_layer1(1_000_000.0, Sign::Positive);
        let q = a.div(b);
        assert_eq!(q.layer(), Layer::Layer0);
        assert!((q.to_f64() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn pow_basics() {
        assert!((num(2.0).pow(10.0).to_f64() - 1024.0).abs() < 1e-9);
        assert_eq!(num(5.0).pow(0.0), LayeredNumber::ONE);
        assert!(LayeredNumber::ZERO.pow(3.0).is_zero());
    }

    #[test]
    fn pow_layer1_scales_log_value() {
        let a = LayeredNumber::from_layer1(1e6, Sign::Positive);
        let squared = a.pow(2.0);
        assert_eq!(squared.magnitude_log10(), 2e6);
    }

    #[test]
    fn pow_keeps_base_sign() {
        let n = num(-2.0).pow(2.0);
        assert_eq!(n.signum(), -1);
        assert!((n.to_f64() + 4.0).abs() < 1e-12);
    }

    #[test]
    fn negate_round_trips() {
        let v = num(17.0);
        assert_eq!(v.negate().negate(), v);
        assert!(LayeredNumber::ZERO.negate().is_zero());
        assert!(v.add(v.negate()).is_zero());
    }
}
