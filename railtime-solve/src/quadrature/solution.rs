/// Indicates whether the requested tolerance was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The error estimate is within the configured tolerances.
    Converged,
    /// Subdivision stopped before the tolerance was met, either because the
    /// segment limit was reached or because a segment could not be split
    /// further in floating point.
    SubdivisionLimit,
}

/// The result of an adaptive quadrature.
///
/// The integral is always paired with its error estimate; callers decide
/// whether the estimate is acceptable for their purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final status.
    pub status: Status,
    /// Estimated value of the integral.
    pub value: f64,
    /// Estimated absolute error of `value`.
    pub error_estimate: f64,
    /// Number of segments in the final partition.
    pub segments: usize,
    /// Number of integrand evaluations.
    pub evals: usize,
}

impl Solution {
    /// Returns `true` if the error estimate is within `fraction` of the
    /// integral's magnitude.
    ///
    /// A zero integral with a zero error estimate satisfies any fraction.
    #[must_use]
    pub fn is_within(&self, fraction: f64) -> bool {
        self.error_estimate <= fraction * self.value.abs()
    }
}
