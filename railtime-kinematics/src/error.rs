use std::fmt::Display;

use num_traits::Zero;
use railtime_core::constraint::NonNegative;
use railtime_solve::quadrature;
use thiserror::Error;
use uom::si::f64::{Length, Time, Velocity};

/// Errors produced by the kinematics models.
///
/// Each failure cause has its own variant so callers can branch on it; in
/// particular an unreachable speed and a segment too short for the run are
/// distinct outcomes with different remedies.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KinematicsError {
    /// An input violated its physical bounds (non-positive mass, negative
    /// braking rate, negative time, and so on).
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// The requested speed is at or beyond the speed where drag consumes all
    /// available power.
    #[error("speed {speed:?} is unreachable (terminal speed {terminal_speed:?})")]
    UnreachableSpeed {
        speed: Velocity,
        /// Asymptotic top speed, or `None` for a drag-free train.
        terminal_speed: Option<Velocity>,
    },

    /// The segment cannot hold an acceleration and braking envelope even
    /// after the bounded speed-reduction search.
    #[error(
        "segment of {distance:?} is too short: after {attempts} speed reductions \
         the run at {speed:?} still needs {envelope:?}"
    )]
    InfeasibleDistance {
        distance: Length,
        attempts: usize,
        /// Last trial cruise speed.
        speed: Velocity,
        /// Acceleration plus braking distance at the last trial speed.
        envelope: Length,
    },

    /// The distance integral's error estimate exceeds the accuracy tolerance.
    #[error(
        "distance over {duration:?} is {distance:?} with error estimate \
         {error_estimate:?}, beyond the accuracy tolerance"
    )]
    NumericalAccuracyFault {
        duration: Time,
        distance: Length,
        error_estimate: Length,
    },

    /// The velocity equation produced no admissible root.
    #[error("velocity equation has no physical root at t = {time:?}")]
    NoPhysicalRoot { time: Time },

    /// The distance quadrature failed before producing an estimate.
    #[error("distance integration failed")]
    Integration(#[from] quadrature::Error),
}

impl KinematicsError {
    /// Builds an [`KinematicsError::InvalidParameter`] for the named input.
    pub(crate) fn invalid(parameter: &'static str, reason: impl Display) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.to_string(),
        }
    }

    /// Passes `value` through if it is zero or greater.
    pub(crate) fn non_negative<T: PartialOrd + Zero>(
        parameter: &'static str,
        value: T,
    ) -> Result<T, Self> {
        NonNegative::new(value)
            .map(|v| v.into_inner())
            .map_err(|e| Self::invalid(parameter, e))
    }
}
