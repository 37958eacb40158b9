use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies the endpoints of the closed unit interval for a type.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker for values in the closed unit interval `0 ≤ x ≤ 1`.
///
/// Vapor qualities and void fractions of equilibrium mixtures live here.
///
/// ```
/// use coolpropx::support::constraint::UnitInterval;
///
/// assert_eq!(UnitInterval::new(0.25).unwrap().into_inner(), 0.25);
/// assert!(UnitInterval::new(1.0).is_ok());
/// assert!(UnitInterval::new(-0.01).is_err());
/// assert!(UnitInterval::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Wraps `value` if `0 ≤ value ≤ 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if the comparison is undefined.
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        let (Some(lower), Some(upper)) = (
            value.partial_cmp(&T::zero()),
            value.partial_cmp(&T::one()),
        ) else {
            return Err(ConstraintError::NotANumber);
        };

        if lower.is_lt() {
            Err(ConstraintError::BelowMinimum)
        } else if upper.is_gt() {
            Err(ConstraintError::AboveMaximum)
        } else {
            Ok(())
        }
    }
}
