//! Real roots of low-order polynomials.
//!
//! Coefficients are given highest power first, so `cubic_roots(a, b, c, d)`
//! solves `a⋅x³ + b⋅x² + c⋅x + d = 0`.
//!
//! Only real roots are reported. A pair of complex roots whose imaginary part
//! is within numerical noise of zero (a double root perturbed by rounding) is
//! reported as a single real root.

mod cubic;
mod quadratic;

pub use cubic::cubic_roots;
pub use quadratic::quadratic_roots;

/// Relative size below which a residual or discriminant is treated as zero.
const NOISE_TOL: f64 = 1e-12;

/// Roots closer than this relative distance are reported once.
const MERGE_TOL: f64 = 4.0 * f64::EPSILON;

/// The distinct real roots of a polynomial of degree three or less, in
/// ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RealRoots {
    values: [f64; 3],
    len: usize,
}

impl RealRoots {
    /// Returns the roots as a sorted slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values[..self.len]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the roots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    /// Inserts a root, keeping order and skipping non-finite values and
    /// duplicates.
    fn insert(&mut self, root: f64) {
        if !root.is_finite() || self.len == self.values.len() {
            return;
        }

        let duplicate = self.iter().any(|existing| {
            (existing - root).abs() <= MERGE_TOL * existing.abs().max(root.abs())
        });
        if duplicate {
            return;
        }

        let at = self.iter().take_while(|&existing| existing < root).count();
        self.values.copy_within(at..self.len, at + 1);
        self.values[at] = root;
        self.len += 1;
    }
}
