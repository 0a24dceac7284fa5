/// Tunable thresholds for layered-number normalization and arithmetic.
///
/// The defaults reproduce the cutoffs used by the game economy: values keep
/// an exact mantissa/exponent form until the exponent itself reaches a
/// million, and only drop back out of log form well below that point so a
/// quantity hovering near one boundary never oscillates between layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerConfig {
    /// Exponent at which a Layer0 value is promoted into log form.
    pub promote_exponent: f64,
    /// Log-value below which a Layer1 value is demoted back to Layer0.
    /// Must stay strictly below `promote_exponent` (hysteresis).
    pub demote_value: f64,
    /// Minimum magnitude; anything smaller collapses to canonical zero.
    pub epsilon: f64,
    /// Base-10 exponent gap beyond which the smaller operand of an
    /// addition or subtraction is dropped as negligible.
    pub log_diff_limit: f64,
}

impl LayerConfig {
    // ===== default cutoffs =====
    pub const DEFAULT_PROMOTE_EXPONENT: f64 = 1_000_000.0;
    pub const DEFAULT_DEMOTE_VALUE: f64 = 5.0;
    pub const DEFAULT_EPSILON: f64 = 1e-12;
    pub const DEFAULT_LOG_DIFF_LIMIT: f64 = 15.0;

    /// Default configuration used by every operation that does not take an
    /// explicit config.
    pub const DEFAULT: Self = Self {
        promote_exponent: Self::DEFAULT_PROMOTE_EXPONENT,
        demote_value: Self::DEFAULT_DEMOTE_VALUE,
        epsilon: Self::DEFAULT_EPSILON,
        log_diff_limit: Self::DEFAULT_LOG_DIFF_LIMIT,
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self::new()
    }
}
