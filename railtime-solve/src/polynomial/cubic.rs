use super::{NOISE_TOL, RealRoots, quadratic_roots};

/// Upper bound on bisection steps; enough to exhaust `f64` resolution from
/// the widest finite bracket.
const MAX_BISECTIONS: usize = 2200;

/// Finds the real roots of `a⋅x³ + b⋅x² + c⋅x + d = 0`.
///
/// The critical points of the cubic split the real line into intervals on
/// which it is monotone. Each interval whose endpoints differ in sign holds
/// exactly one root, located by bisection to full `f64` resolution. The outer
/// intervals are closed by the Cauchy bound `1 + max(|b|, |c|, |d|) / |a|`.
///
/// A critical point where the cubic is zero to within rounding of its terms is
/// reported as a (double) root; this is the real part of a complex pair whose
/// imaginary part is numerical noise.
///
/// Closed-form (Cardano or trigonometric) solutions are avoided because they
/// lose the small roots entirely when `a` is tiny relative to `b`.
///
/// Falls back to [`quadratic_roots`] when `a` is zero or so small that the
/// Cauchy bound overflows.
#[must_use]
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> RealRoots {
    if a == 0.0 {
        return quadratic_roots(b, c, d);
    }

    let bound = 1.0 + b.abs().max(c.abs()).max(d.abs()) / a.abs();
    if !bound.is_finite() {
        return quadratic_roots(b, c, d);
    }

    let cubic = Cubic { a, b, c, d };

    let mut knots = [-bound, 0.0, 0.0, bound];
    let mut knot_count = 1;
    for x in quadratic_roots(3.0 * a, 2.0 * b, c).iter() {
        if x > -bound && x < bound {
            knots[knot_count] = x;
            knot_count += 1;
        }
    }
    knots[knot_count] = bound;
    let knots = &knots[..=knot_count];

    let mut values = [0.0; 4];
    for (value, &x) in values.iter_mut().zip(knots) {
        *value = cubic.denoised(x);
    }
    let values = &values[..knots.len()];

    let mut roots = RealRoots::default();
    for (&x, &value) in knots.iter().zip(values) {
        if value == 0.0 {
            roots.insert(x);
        }
    }
    for (x, value) in knots.windows(2).zip(values.windows(2)) {
        if value[0] * value[1] < 0.0 {
            roots.insert(cubic.bisect(x[0], x[1], value[0]));
        }
    }
    roots
}

#[derive(Debug, Clone, Copy)]
struct Cubic {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Cubic {
    fn eval(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    /// Evaluates the cubic, returning exactly zero when the value is within
    /// rounding of the magnitude of its terms.
    fn denoised(&self, x: f64) -> f64 {
        let value = self.eval(x);
        let ax = x.abs();
        let scale = ((self.a.abs() * ax + self.b.abs()) * ax + self.c.abs()) * ax + self.d.abs();
        if value.abs() <= NOISE_TOL * scale {
            0.0
        } else {
            value
        }
    }

    /// Bisects a sign-changing bracket down to adjacent floats.
    fn bisect(&self, mut left: f64, mut right: f64, mut left_value: f64) -> f64 {
        for _ in 0..MAX_BISECTIONS {
            let mid = 0.5 * (left + right);
            if mid <= left || mid >= right {
                break;
            }

            let mid_value = self.eval(mid);
            if mid_value == 0.0 {
                return mid;
            }

            if left_value.signum() == mid_value.signum() {
                left = mid;
                left_value = mid_value;
            } else {
                right = mid;
            }
        }
        0.5 * (left + right)
    }
}
