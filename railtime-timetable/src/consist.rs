//! Train consist descriptions.
//!
//! A consist is a JSON document listing its power units and trailer cars in
//! customary units (lb, in, hp, lbf), plus the leading unit's drag factor and
//! optional braking parameters in mph/s and mph:
//!
//! ```json
//! {
//!   "LeadingCoefDrag": 0.8,
//!   "BrakePerfA1": 2.0,
//!   "BrakePerfA2": 1.35,
//!   "BrakePerfV1": 70.0,
//!   "PowerUnits": [
//!     { "Mass": 290000, "Height": 187.5, "Width": 123,
//!       "TractionPower": 3900, "TractionForce": 50000 }
//!   ],
//!   "TrailerCars": [ { "Mass": 150000, "Height": 170, "Width": 120 } ]
//! }
//! ```

use std::{fs::File, io, io::BufReader, path::Path};

use railtime_core::units::mile_per_hour_per_second;
use railtime_kinematics::{Aerodynamics, BrakingRates, TrainPerformanceSpec};
use serde::Deserialize;
use tracing::{debug, warn};
use uom::si::{
    f64::{Force, Length, Mass, Power, Velocity},
    force::pound_force,
    length::inch,
    mass::pound,
    power::horsepower,
    velocity::mile_per_hour,
};

use crate::TimetableError;

/// A powered unit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerUnit {
    /// Pounds.
    pub mass: f64,
    /// Inches.
    pub height: f64,
    /// Inches.
    pub width: f64,
    /// Horsepower.
    pub traction_power: f64,
    /// Pounds-force.
    pub traction_force: f64,
}

/// An unpowered car.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrailerCar {
    pub mass: f64,
    pub height: f64,
    pub width: f64,
}

/// A train consist as described on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Consist {
    pub leading_coef_drag: f64,
    #[serde(default)]
    pub brake_perf_a1: Option<f64>,
    #[serde(default)]
    pub brake_perf_a2: Option<f64>,
    #[serde(default)]
    pub brake_perf_v1: Option<f64>,
    pub power_units: Vec<PowerUnit>,
    #[serde(default)]
    pub trailer_cars: Vec<TrailerCar>,
}

impl Consist {
    /// Reads a consist from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid
    /// consist document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TimetableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads a consist from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Json`] if a required field is missing or has
    /// the wrong type.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, TimetableError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Mass of every unit combined.
    #[must_use]
    pub fn total_mass(&self) -> Mass {
        let pounds: f64 = self.power_units.iter().map(|u| u.mass).sum::<f64>()
            + self.trailer_cars.iter().map(|c| c.mass).sum::<f64>();
        Mass::new::<pound>(pounds)
    }

    /// Traction power of the power units combined.
    #[must_use]
    pub fn total_power(&self) -> Power {
        Power::new::<horsepower>(self.power_units.iter().map(|u| u.traction_power).sum())
    }

    /// Tractive force of the power units combined.
    #[must_use]
    pub fn total_tractive_force(&self) -> Force {
        Force::new::<pound_force>(self.power_units.iter().map(|u| u.traction_force).sum())
    }

    /// Tallest and widest cross-section over all units.
    #[must_use]
    pub fn max_cross_section(&self) -> (Length, Length) {
        let dimensions = self
            .power_units
            .iter()
            .map(|u| (u.height, u.width))
            .chain(self.trailer_cars.iter().map(|c| (c.height, c.width)));

        let (height, width) = dimensions.fold((0.0_f64, 0.0_f64), |(h, w), (uh, uw)| {
            (h.max(uh), w.max(uw))
        });
        (Length::new::<inch>(height), Length::new::<inch>(width))
    }

    /// Braking law for the consist.
    ///
    /// The explicit parameters are used only when all three are given.
    /// Otherwise the defaults apply, with a warning if some were given.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Train`] if the explicit parameters are out
    /// of range.
    pub fn braking_rates(&self) -> Result<BrakingRates, TimetableError> {
        match (self.brake_perf_a1, self.brake_perf_a2, self.brake_perf_v1) {
            (Some(a1), Some(a2), Some(v1)) => Ok(BrakingRates::new(
                mile_per_hour_per_second(a1),
                mile_per_hour_per_second(a2),
                Velocity::new::<mile_per_hour>(v1),
            )?),
            (None, None, None) => Ok(BrakingRates::default()),
            (a1, a2, v1) => {
                warn!(
                    brake_perf_a1 = ?a1,
                    brake_perf_a2 = ?a2,
                    brake_perf_v1 = ?v1,
                    "incomplete braking parameters, using default braking rates",
                );
                Ok(BrakingRates::default())
            }
        }
    }

    /// Aggregates the consist into train performance parameters.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::NoPowerUnits`] if the consist has no power units.
    /// - [`TimetableError::Train`] if the aggregate parameters are invalid.
    pub fn performance(&self) -> Result<TrainPerformanceSpec, TimetableError> {
        if self.power_units.is_empty() {
            return Err(TimetableError::NoPowerUnits);
        }

        let (height, width) = self.max_cross_section();
        let drag = Aerodynamics::new(height, width, self.leading_coef_drag).drag_coefficient()?;

        let spec = TrainPerformanceSpec::new(
            self.total_mass(),
            self.total_power(),
            self.total_tractive_force(),
            drag,
            self.braking_rates()?,
        )?;

        debug!(
            units = self.power_units.len() + self.trailer_cars.len(),
            mass_lb = self.total_mass().get::<pound>(),
            power_hp = self.total_power().get::<horsepower>(),
            force_lbf = self.total_tractive_force().get::<pound_force>(),
            crossover_mph = spec.power_limit().crossover_speed().get::<mile_per_hour>(),
            "aggregated consist",
        );
        Ok(spec)
    }
}
