/// Configuration for adaptive quadrature.
///
/// Subdivision stops once the summed error estimate is within
/// `max(abs_tol, rel_tol * |integral|)`, or when `max_subdivisions`
/// segments have been produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_subdivisions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            abs_tol: 1e-9,
            rel_tol: 1e-10,
            max_subdivisions: 200,
        }
    }
}

impl Config {
    /// Validates that tolerances are finite and non-negative and that at
    /// least one segment is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.abs_tol.is_finite() || self.abs_tol < 0.0 {
            return Err("abs_tol must be finite and non-negative");
        }
        if !self.rel_tol.is_finite() || self.rel_tol < 0.0 {
            return Err("rel_tol must be finite and non-negative");
        }
        if self.max_subdivisions == 0 {
            return Err("max_subdivisions must be at least 1");
        }
        Ok(())
    }
}
