//! Total-order comparison.
//!
//! Normalization keeps NaN out of every representation, so the order is
//! genuinely total and `Eq`/`Ord` are sound.

use core::cmp::Ordering;

use super::{LayeredNumber, Repr, Sign};

impl LayeredNumber {
    /// Tri-state comparison inducing a total order across both layers and
    /// both signs.
    pub fn compare(&self, rhs: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&rhs.signum());
        if by_sign != Ordering::Equal {
            return by_sign;
        }
        match self.sign() {
            None => Ordering::Equal,
            Some(Sign::Positive) => self.cmp_magnitude(rhs),
            Some(Sign::Negative) => self.cmp_magnitude(rhs).reverse(),
        }
    }

    /// Magnitude-only comparison, ignoring signs. A Layer1 magnitude sorts
    /// above a Layer0 one; inside the hysteresis band, where both layers
    /// can hold the same magnitude, the layer keeps precedence so the
    /// order stays total.
    pub(crate) fn cmp_magnitude(&self, rhs: &Self) -> Ordering {
        match (self.repr, rhs.repr) {
            (Repr::Zero, Repr::Zero) => Ordering::Equal,
            (Repr::Zero, _) => Ordering::Less,
            (_, Repr::Zero) => Ordering::Greater,
            (Repr::Layer0 { .. }, Repr::Layer1 { .. }) => Ordering::Less,
            (Repr::Layer1 { .. }, Repr::Layer0 { .. }) => Ordering::Greater,
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
            ) => ea.total_cmp(&eb).then(ma.total_cmp(&mb)),
            (Repr::Layer1 { value: va, .. }, Repr::Layer1 { value: vb, .. }) => va.total_cmp(&vb),
        }
    }
}

impl PartialEq for LayeredNumber {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for LayeredNumber {}

impl PartialOrd for LayeredNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for LayeredNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::Sign;

    #[test]
    fn zero_equals_zero() {
        assert_eq!(LayeredNumber::ZERO, LayeredNumber::ZERO);
    }

    #[test]
    fn sign_orders_first() {
        let neg = LayeredNumber::from_f64(-1.0);
        let pos = LayeredNumber::from_f64(1.0);
        assert!(neg < LayeredNumber::ZERO);
        assert!(LayeredNumber::ZERO < pos);
        // a huge negative magnitude still sorts below a tiny positive one
        let huge_neg = LayeredNumber::from_layer1(1e6, Sign::Negative);
        assert!(huge_neg < LayeredNumber::from_f64(1e-6));
    }

    #[test]
    fn layer0_orders_by_exponent_then_mantissa() {
        let a = LayeredNumber::from_layer0(9.0, 3.0);
        let b = LayeredNumber::from_layer0(1.0, 4.0);
        let c = LayeredNumber::from_layer0(2.0, 4.0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn higher_layer_is_larger_in_magnitude() {
        let l0 = LayeredNumber::from_layer0(9.99, 999_999.0);
        let l1 = LayeredNumber::from_layer1(1_000_000.0, Sign::Positive);
        assert!(l0 < l1);
        // sign-adjusted: for negatives the higher layer is smaller
        assert!(l1.negate() < l0.negate());
    }

    #[test]
    fn sample_set_sorts_like_the_real_line() {
        let sorted = [
            LayeredNumber::from_layer1(2e6, Sign::Negative),
            LayeredNumber::from_f64(-1e5),
            LayeredNumber::from_f64(-1.0),
            LayeredNumber::from_f64(-1e-6),
            LayeredNumber::ZERO,
            LayeredNumber::from_f64(2.5),
            LayeredNumber::from_f64(99000.0),
            LayeredNumber::from_layer1(1e6, Sign::Positive),
            LayeredNumber::from_layer1(f64::INFINITY, Sign::Positive),
        ];
        for window in sorted.windows(2) {
            assert!(window[0] < window[1], "{:?} !< {:?}", window[0], window[1]);
        }
        let mut shuffled = [
            sorted[4], sorted[8], sorted[0], sorted[6], sorted[2], sorted[1], sorted[7], sorted[3],
            sorted[5],
        ];
        shuffled.sort();
        assert_eq!(shuffled.to_vec(), sorted.to_vec());
    }
}
