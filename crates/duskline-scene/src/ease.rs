//! Interpolation and easing curves.

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic Hermite ease between two edges.
///
/// The normalized input is clamped to `[0, 1]` before easing, so inputs
/// outside the edges never overshoot. Equal edges act as a step at `edge0`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Quadratic ease-out: fast start, gentle landing.
pub fn ease_out(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(2)
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
///
/// The curve runs from `(0, 0)` to `(1, 1)`; `x` is clamped to `[0, 1]`
/// and the curve parameter is found by bisection, which is monotone for
/// any control points with `x1, x2` in `[0, 1]`.
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    if x == 0.0 || x == 1.0 {
        return x;
    }

    let bezier = |p1: f64, p2: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };

    let (mut lo, mut hi) = (0.0, 1.0);
    let mut s = x;
    for _ in 0..48 {
        s = (lo + hi) / 2.0;
        let bx = bezier(x1, x2, s);
        if (bx - x).abs() < 1e-9 {
            break;
        }
        if bx < x {
            lo = s;
        } else {
            hi = s;
        }
    }
    bezier(y1, y2, s)
}
