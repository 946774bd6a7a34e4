use std::cmp::Ordering;

use num_traits::Zero;

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Bound for quantities a train cannot have zero of: mass, tractive power,
/// tractive force and braking rates.
///
/// ```
/// use railtime_core::constraint::StrictlyPositive;
/// use uom::si::{f64::Mass, mass::kilogram};
///
/// let consist = StrictlyPositive::new(Mass::new::<kilogram>(4.672e5)).unwrap();
/// assert_eq!(consist.get().get::<kilogram>(), 4.672e5);
///
/// assert!(StrictlyPositive::new(Mass::new::<kilogram>(0.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Wraps `value` if it is above zero.
    ///
    /// # Errors
    ///
    /// Zero, negative and NaN values are rejected with the matching
    /// [`ConstraintError`] variant.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
