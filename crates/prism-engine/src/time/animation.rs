/// Length of one shader animation cycle, in seconds.
pub const ANIMATION_PERIOD_SECS: f64 = 1000.0;

/// Period in wall-clock milliseconds (`ANIMATION_PERIOD_SECS / 0.001`).
const ANIMATION_PERIOD_MS: u64 = 1_000_000;

/// Converts wall-clock milliseconds to the shader animation time.
///
/// Equivalent to `(ms * 0.001) mod 1000.0`. The modulo is taken on the integer
/// millisecond value first so the result is exactly periodic and stays in
/// `[0, 1000)` even for epoch-sized inputs.
#[inline]
pub fn animation_time(wall_ms: u64) -> f32 {
    let wrapped = wall_ms % ANIMATION_PERIOD_MS;
    let secs = (wrapped as f64 * 0.001) % ANIMATION_PERIOD_SECS;
    secs as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_maps_to_zero() {
        assert_eq!(animation_time(0), 0.0);
    }

    #[test]
    fn scales_milliseconds_to_seconds() {
        approx::assert_relative_eq!(animation_time(1_500), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn stays_below_period() {
        for ms in [999_999u64, 1_000_000, 1_700_000_123_456, u64::MAX] {
            let t = animation_time(ms);
            assert!((0.0..1000.0).contains(&t), "{ms} -> {t}");
        }
    }

    #[test]
    fn is_periodic_in_one_million_ms() {
        for ms in [0u64, 1, 42_424, 999_999, 1_731_000_000_777] {
            assert_eq!(animation_time(ms), animation_time(ms + 1_000_000));
        }
    }
}
