use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Bound for quantities where zero is meaningful: a dwell of zero seconds,
/// a braking boundary at standstill, or a train with no drag.
///
/// ```
/// use railtime_core::constraint::NonNegative;
/// use uom::si::{f64::Time, time::second};
///
/// let dwell = NonNegative::new(Time::new::<second>(0.0)).unwrap();
/// assert_eq!(dwell.into_inner().get::<second>(), 0.0);
///
/// assert!(NonNegative::new(Time::new::<second>(-30.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Wraps `value` if it is zero or above.
    ///
    /// # Errors
    ///
    /// [`ConstraintError::Negative`] below zero, [`ConstraintError::NotANumber`]
    /// for NaN.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Zero, which always passes.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained::<T, NonNegative> {
            value: T::zero(),
            bound: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
