//! Combined aerodynamic drag coefficient.

use railtime_core::{DragCoefficient, constraint::StrictlyPositive};
use uom::si::{
    f64::{Length, MassDensity},
    mass_density::kilogram_per_cubic_meter,
};

use crate::KinematicsError;

/// Density of dry air at sea level and 20 °C, in kg/m³.
pub const STANDARD_AIR_DENSITY: f64 = 1.2041;

/// Frontal geometry and drag factor of a train.
///
/// Reduces to a single [`DragCoefficient`] `D = ½⋅h⋅w⋅ρ⋅C_d`, the multiplier on
/// `v³` in the aerodynamic power loss. Height and width are the maxima over
/// all units of the consist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub height: Length,
    pub width: Length,
    /// Dimensionless empirical drag factor of the leading unit.
    pub coefficient: f64,
    pub air_density: MassDensity,
}

impl Aerodynamics {
    /// Creates a description at [`STANDARD_AIR_DENSITY`].
    #[must_use]
    pub fn new(height: Length, width: Length, coefficient: f64) -> Self {
        Self {
            height,
            width,
            coefficient,
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(STANDARD_AIR_DENSITY),
        }
    }

    /// Replaces the air density.
    #[must_use]
    pub fn with_air_density(self, air_density: MassDensity) -> Self {
        Self {
            air_density,
            ..self
        }
    }

    /// Computes the combined drag coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] unless every input is
    /// strictly positive.
    pub fn drag_coefficient(&self) -> Result<DragCoefficient, KinematicsError> {
        let height = StrictlyPositive::new(self.height)
            .map_err(|e| KinematicsError::invalid("height", e))?;
        let width =
            StrictlyPositive::new(self.width).map_err(|e| KinematicsError::invalid("width", e))?;
        let air_density = StrictlyPositive::new(self.air_density)
            .map_err(|e| KinematicsError::invalid("air_density", e))?;
        let coefficient = StrictlyPositive::new(self.coefficient)
            .map_err(|e| KinematicsError::invalid("drag coefficient", e))?;

        Ok(height.get() * width.get() * air_density.get() * (0.5 * coefficient.get()))
    }
}
