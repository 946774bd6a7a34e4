use super::{NOISE_TOL, RealRoots};

/// Finds the real roots of `a⋅x² + b⋅x + c = 0`.
///
/// Falls back to the linear equation when `a` is zero. A slightly negative
/// discriminant (relative to the size of its terms) is treated as zero and
/// yields the double root.
///
/// Uses the cancellation-free form `q = -(b + sign(b)⋅√Δ)/2`, with roots
/// `q/a` and `c/q`.
#[must_use]
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> RealRoots {
    let mut roots = RealRoots::default();

    if a == 0.0 {
        if b != 0.0 {
            roots.insert(-c / b);
        }
        return roots;
    }

    let mut discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        if -discriminant <= NOISE_TOL * (b * b + (4.0 * a * c).abs()) {
            discriminant = 0.0;
        } else {
            return roots;
        }
    }

    if discriminant == 0.0 {
        roots.insert(-b / (2.0 * a));
        return roots;
    }

    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    roots.insert(q / a);
    if q != 0.0 {
        roots.insert(c / q);
    }
    roots
}
