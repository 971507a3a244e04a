//! Value Function - exponential MIVES satisfaction curve (Boix-Cots et al., 2022).

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::domain::hierarchy::ValueFunctionParams;

/// Lower bound applied to the scale constant `C`.
pub const MIN_SCALE: f64 = 1e-4;

/// Below this distance from 1, the normalization factor falls back to 1.
pub const NORMALIZATION_EPSILON: f64 = 1e-12;

/// Default number of memoized evaluations.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Pure evaluation of the MIVES exponential value function.
pub struct ValueFunction;

impl ValueFunction {
    /// Maps a raw measurement `x` to a satisfaction score in `[0, 1]`.
    ///
    /// # Algorithm
    /// ```text
    /// B     = 1 / (1 - exp(-K * (|x_sat_1 - x_sat_0| / C)^P))
    /// value = B * (1 - exp(-K * (|x - x_sat_0| / C)^P))
    /// ```
    ///
    /// # Edge Cases
    /// - Outside the saturation range: short-circuits to exactly 0.0 or 1.0
    /// - `x_sat_1 < x_sat_0`: decreasing function, handled symmetrically
    /// - `x_sat_0 == x_sat_1`: resolved by the short-circuit, always 0.0 or 1.0
    /// - `C` below [`MIN_SCALE`]: clamped
    /// - Non-finite normalization term: `B = 1.0`
    /// - Non-finite point term or NaN result: 0.0
    ///
    /// Never panics and never returns NaN or infinity.
    pub fn evaluate(x: f64, x_sat_0: f64, x_sat_1: f64, c: f64, k: f64, p: f64) -> f64 {
        let dist_x = (x - x_sat_0).abs();
        let dist_max = (x_sat_1 - x_sat_0).abs();

        if x_sat_1 > x_sat_0 {
            if x <= x_sat_0 {
                return 0.0;
            }
            if x >= x_sat_1 {
                return 1.0;
            }
        } else {
            if x >= x_sat_0 {
                return 0.0;
            }
            if x <= x_sat_1 {
                return 1.0;
            }
        }

        // NaN-safe clamp: f64::max returns the non-NaN operand.
        let c = c.max(MIN_SCALE);

        let b = match decay(k, dist_max, c, p) {
            Some(phi_max) if (1.0 - phi_max).abs() >= NORMALIZATION_EPSILON => {
                1.0 / (1.0 - phi_max)
            }
            Some(_) => 1.0,
            None => {
                tracing::debug!(k, p, c, dist_max, "normalization term not finite, using B = 1");
                1.0
            }
        };

        let value = match decay(k, dist_x, c, p) {
            Some(phi_x) => b * (1.0 - phi_x),
            None => {
                tracing::debug!(k, p, c, dist_x, "point term not finite, using 0");
                0.0
            }
        };

        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Evaluates `x` against an indicator's stored parameters.
    pub fn evaluate_params(params: &ValueFunctionParams, x: f64) -> f64 {
        Self::evaluate(x, params.x_sat_0, params.x_sat_1, params.c, params.k, params.p)
    }
}

/// `exp(-K * (distance / C)^P)`, or `None` when the result is not finite.
fn decay(k: f64, distance: f64, c: f64, p: f64) -> Option<f64> {
    let phi = (-k * (distance / c).powf(p)).exp();
    phi.is_finite().then_some(phi)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey([u64; 6]);

impl CacheKey {
    fn new(x: f64, x_sat_0: f64, x_sat_1: f64, c: f64, k: f64, p: f64) -> Self {
        Self([
            x.to_bits(),
            x_sat_0.to_bits(),
            x_sat_1.to_bits(),
            c.to_bits(),
            k.to_bits(),
            p.to_bits(),
        ])
    }
}

/// Bounded LRU memoization of [`ValueFunction::evaluate`].
///
/// Keyed by the exact bit patterns of the six inputs. Entries never go stale
/// because the function is pure, so there is no invalidation API.
pub struct ValueFunctionCache {
    entries: Mutex<LruCache<CacheKey, f64>>,
}

impl ValueFunctionCache {
    /// Creates a cache holding at most `capacity` results (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Same contract as [`ValueFunction::evaluate`], memoized.
    pub fn evaluate(&self, x: f64, x_sat_0: f64, x_sat_1: f64, c: f64, k: f64, p: f64) -> f64 {
        let key = CacheKey::new(x, x_sat_0, x_sat_1, c, k, p);
        match self.entries.lock() {
            Ok(mut entries) => {
                if let Some(value) = entries.get(&key) {
                    return *value;
                }
                let value = ValueFunction::evaluate(x, x_sat_0, x_sat_1, c, k, p);
                entries.put(key, value);
                value
            }
            Err(_) => ValueFunction::evaluate(x, x_sat_0, x_sat_1, c, k, p),
        }
    }

    /// Evaluates `x` against an indicator's stored parameters, memoized.
    pub fn evaluate_params(&self, params: &ValueFunctionParams, x: f64) -> f64 {
        self.evaluate(x, params.x_sat_0, params.x_sat_1, params.c, params.k, params.p)
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached results.
    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.cap().get())
            .unwrap_or(0)
    }
}

impl Default for ValueFunctionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_valid(value: f64) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    #[test]
    fn evaluate_saturates_outside_increasing_range() {
        assert_eq!(ValueFunction::evaluate(0.0, 1.0, 2.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(ValueFunction::evaluate(1.0, 1.0, 2.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(ValueFunction::evaluate(3.0, 1.0, 2.0, 1.0, 1.0, 1.0), 1.0);
        assert_eq!(ValueFunction::evaluate(2.0, 1.0, 2.0, 1.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn linear_preset_is_flat_zero_inside_range() {
        let mut params = ValueFunctionParams::default();
        params.apply_preset(crate::domain::hierarchy::ValueFunctionPreset::Linear);

        for x in [1.0, 25.0, 50.0, 99.0] {
            assert_eq!(ValueFunction::evaluate_params(&params, x), 0.0);
        }
        assert_eq!(ValueFunction::evaluate_params(&params, 100.0), 1.0);
    }

    #[test]
    fn evaluate_saturates_outside_decreasing_range() {
        assert_eq!(ValueFunction::evaluate(3.0, 2.0, 1.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(ValueFunction::evaluate(0.5, 2.0, 1.0, 1.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn evaluate_is_monotonic_inside_range() {
        let v1 = ValueFunction::evaluate(1.25, 1.0, 2.0, 10.0, 0.5, 1.0);
        let v2 = ValueFunction::evaluate(1.75, 1.0, 2.0, 10.0, 0.5, 1.0);
        assert!(0.0 < v1 && v1 < v2 && v2 < 1.0, "v1={v1}, v2={v2}");
    }

    #[test]
    fn evaluate_decreasing_range_mirrors_increasing() {
        let inc = ValueFunction::evaluate(1.25, 1.0, 2.0, 10.0, 0.5, 1.0);
        let dec = ValueFunction::evaluate(1.75, 2.0, 1.0, 10.0, 0.5, 1.0);
        assert!((inc - dec).abs() < 1e-12);
    }

    #[test]
    fn evaluate_handles_reversed_saturation() {
        let value = ValueFunction::evaluate(1.5, 2.0, 1.0, 1.0, 1.0, 1.0);
        assert!(is_valid(value));
    }

    #[test]
    fn evaluate_handles_zero_range() {
        let value = ValueFunction::evaluate(1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
        assert!(is_valid(value));
        assert!(is_valid(ValueFunction::evaluate(0.0, 1.0, 1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn evaluate_survives_extreme_parameters() {
        let value = ValueFunction::evaluate(1.5, 1.0, 2.0, 1e-8, 1e6, 10.0);
        assert!(is_valid(value));
    }

    #[test]
    fn evaluate_zero_rate_uses_normalization_fallback() {
        // K = 0 makes phi_max exactly 1, so B falls back to 1 and the value is 0.
        let value = ValueFunction::evaluate(50.0, 0.0, 100.0, 50.0, 0.0, 1.0);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn evaluate_degrades_to_zero_on_nan_input() {
        assert_eq!(ValueFunction::evaluate(f64::NAN, 0.0, 1.0, 1.0, 1.0, 1.0), 0.0);
        assert_eq!(ValueFunction::evaluate(0.5, 0.0, 1.0, 1.0, f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn evaluate_params_uses_stored_parameters() {
        let params = ValueFunctionParams::new(1.0, 2.0, 1.0, 0.5, 10.0);
        assert_eq!(
            ValueFunction::evaluate_params(&params, 1.5),
            ValueFunction::evaluate(1.5, 1.0, 2.0, 10.0, 0.5, 1.0)
        );
    }

    #[test]
    fn cache_returns_identical_results() {
        let cache = ValueFunctionCache::new(8);
        let first = cache.evaluate(1.25, 1.0, 2.0, 10.0, 0.5, 1.0);
        let second = cache.evaluate(1.25, 1.0, 2.0, 10.0, 0.5, 1.0);
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(first, ValueFunction::evaluate(1.25, 1.0, 2.0, 10.0, 0.5, 1.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_is_bounded() {
        let cache = ValueFunctionCache::new(4);
        for i in 0..10 {
            cache.evaluate(1.0 + f64::from(i) / 20.0, 1.0, 2.0, 1.0, 1.0, 1.0);
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.capacity(), 4);
    }

    #[test]
    fn cache_zero_capacity_is_raised_to_one() {
        let cache = ValueFunctionCache::new(0);
        assert_eq!(cache.capacity(), 1);
        assert!(cache.is_empty());
    }

    proptest! {
        #[test]
        fn evaluate_always_in_unit_interval(
            x in -1e6f64..1e6,
            x0 in -1e3f64..1e3,
            x1 in -1e3f64..1e3,
            c in -10.0f64..1e3,
            k in 0.0f64..1e6,
            p in 0.01f64..20.0,
        ) {
            let value = ValueFunction::evaluate(x, x0, x1, c, k, p);
            prop_assert!(is_valid(value));
        }

        #[test]
        fn evaluate_monotonic_for_increasing_functions(
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
            k in 0.01f64..5.0,
            p in 0.2f64..5.0,
            c in 0.1f64..10.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let v_lo = ValueFunction::evaluate(lo, 0.0, 1.0, c, k, p);
            let v_hi = ValueFunction::evaluate(hi, 0.0, 1.0, c, k, p);
            prop_assert!(v_lo <= v_hi + 1e-12);
        }
    }
}
