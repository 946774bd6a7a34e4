/// Configuration for the stop-to-stop speed-reduction search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Most speed reductions tried before the segment is declared infeasible.
    pub max_reductions: usize,
    /// Fraction of the trial speed removed by each reduction.
    pub reduction: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_reductions: 100,
            reduction: 0.005,
        }
    }
}

impl Config {
    /// Validates that the reduction fraction lies strictly between 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `reduction` is outside `(0, 1)` or not finite.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.reduction > 0.0 && self.reduction < 1.0) {
            return Err("reduction must lie strictly between 0 and 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_reduction() {
        for reduction in [0.0, 1.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = Config {
                reduction,
                ..Config::default()
            };
            assert!(config.validate().is_err(), "accepted {reduction}");
        }
    }
}
