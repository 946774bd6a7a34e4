//! Numeric bounds checked once, at construction.
//!
//! Train parameters only describe motion inside physical bounds: a train
//! with zero mass or a negative braking rate has no defined trajectory. The
//! kinematics types therefore hold their inputs as [`Constrained`] values,
//! which can only be built from a value that passed its check, and never
//! re-validate them afterwards.
//!
//! Two bounds are provided:
//!
//! - [`NonNegative`]: zero or greater (drag, braking boundary speed, dwell).
//! - [`StrictlyPositive`]: greater than zero (mass, power, force, rates).
//!
//! Both work for plain `f64` and for any `uom` quantity. NaN fails every
//! check.

mod non_negative;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A bound that values of type `T` can be checked against.
///
/// Implemented by zero-sized marker types used as the `C` parameter of
/// [`Constrained<T, C>`].
pub trait Constraint<T> {
    /// Accepts `value` or reports which bound it violates.
    ///
    /// # Errors
    ///
    /// Returns the [`ConstraintError`] describing the violation.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("must not be negative")]
    Negative,
    #[error("must be greater than zero")]
    Zero,
    #[error("is not a number")]
    NotANumber,
}

/// A value of type `T` known to satisfy the bound `C`.
///
/// ```
/// use railtime_core::constraint::{Constrained, StrictlyPositive};
///
/// let rate = Constrained::<f64, StrictlyPositive>::new(0.9).unwrap();
/// assert_eq!(rate.get(), 0.9);
/// assert!(Constrained::<f64, StrictlyPositive>::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    bound: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Checks `value` against `C` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns the violation reported by `C`.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value).map(|()| Self {
            value,
            bound: PhantomData,
        })
    }

    /// Unwraps the checked value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
