//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Wrap an angle into the range (-pi, pi].
pub fn wrap_pi<T>(angle: T) -> T
where
    T: Float,
{
    let pi_t: T = T::from(std::f64::consts::PI).unwrap();
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    let wrapped = pi_t - rem_euclid(pi_t - angle, tau_t);

    // rem_euclid can round up to tau for tiny negative inputs
    if wrapped <= -pi_t {
        wrapped + tau_t
    } else {
        wrapped
    }
}

/// Get the signed shortest angular distance from `a` to `b`, in the range (-pi, pi].
pub fn get_ang_dist<T>(a: T, b: T) -> T
where
    T: Float,
{
    wrap_pi(b - a)
}

/// Move `value` towards `target` by at most `max_step`, landing exactly on `target` once it is
/// within one step.
pub fn slew<T>(value: T, target: T, max_step: T) -> T
where
    T: Float,
{
    let max_step = max_step.abs();
    let diff = target - value;

    if diff.abs() <= max_step {
        target
    } else {
        value + max_step * diff.signum()
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_wrap_pi() {
        assert_abs_diff_eq!(wrap_pi(0f64), 0f64);
        assert_abs_diff_eq!(wrap_pi(PI), PI);
        assert_abs_diff_eq!(wrap_pi(-PI), PI);
        assert_abs_diff_eq!(wrap_pi(TAU + 1f64), 1f64, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pi(-TAU - 1f64), -1f64, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pi(3f64 * PI / 2f64), -PI / 2f64, epsilon = 1e-12);
    }

    #[test]
    fn test_get_ang_dist() {
        assert_abs_diff_eq!(get_ang_dist(1f64, 2f64), 1f64, epsilon = 1e-12);
        assert_abs_diff_eq!(get_ang_dist(2f64, 1f64), -1f64, epsilon = 1e-12);
        assert_abs_diff_eq!(get_ang_dist(0f64, TAU), 0f64, epsilon = 1e-12);
        assert_abs_diff_eq!(get_ang_dist(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_slew() {
        assert_eq!(slew(0f64, 1f64, 0.25), 0.25);
        assert_eq!(slew(0f64, -1f64, 0.25), -0.25);
        assert_eq!(slew(0.9f64, 1f64, 0.25), 1f64);
        assert_eq!(slew(1f64, 0f64, -0.25), 0.75);
    }
}
