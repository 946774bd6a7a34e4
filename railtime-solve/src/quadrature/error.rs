use std::error::Error as StdError;

use thiserror::Error;

/// Why an integral could not be evaluated.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot integrate to a non-finite limit ({value})")]
    NonFiniteBound { value: f64 },

    #[error("quadrature config rejected: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("integrand failed at {x}")]
    Integrand {
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("integrand returned {value} at {x}")]
    NonFiniteIntegrand { x: f64, value: f64 },
}
