//! Scalar interpolation helpers.

/// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Quadratic interpolation from `a` to `c`, bent towards the control value
/// `b`.
pub fn qerp(a: f32, b: f32, c: f32, t: f32) -> f32 {
    lerp(lerp(a, b, t), lerp(b, c, t), t)
}

/// `x` bounded to `[min, max]`. Unlike [`f32::clamp`] this never panics when
/// the bounds are inverted; `max` wins.
pub fn clamp(min: f32, max: f32, x: f32) -> f32 {
    if x > max {
        max
    } else if x < min {
        min
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert!(approx_eq(lerp(2.0, 6.0, 0.25), 3.0));
    }

    #[test]
    fn test_qerp_passes_endpoints() {
        assert_eq!(qerp(0.0, 10.0, 4.0, 0.0), 0.0);
        assert_eq!(qerp(0.0, 10.0, 4.0, 1.0), 4.0);
        // (0,10 -> 5) and (10,4 -> 7) blend to 6 at the midpoint.
        assert!(approx_eq(qerp(0.0, 10.0, 4.0, 0.5), 6.0));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0.0, 1.0, 1.5), 1.0);
        assert_eq!(clamp(0.0, 1.0, -0.5), 0.0);
        assert_eq!(clamp(0.0, 1.0, 0.3), 0.3);
        assert_eq!(clamp(5.0, 1.0, 3.0), 1.0);
    }
}
