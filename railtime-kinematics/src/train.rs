//! Train performance parameters.

use railtime_core::{
    DragCoefficient,
    constraint::{Constrained, NonNegative, StrictlyPositive},
    units::mile_per_hour_per_second,
};
use uom::si::{
    f64::{Acceleration, Force, Mass, Power, Velocity},
    velocity::mile_per_hour,
};

use crate::{AccelerationProfile, BrakingProfile, KinematicsError, PowerLimit};

/// Default low-speed braking rate, in mph/s.
pub const DEFAULT_LOW_SPEED_BRAKE_RATE_MPHPS: f64 = 2.0;

/// Default high-speed braking rate, in mph/s.
pub const DEFAULT_HIGH_SPEED_BRAKE_RATE_MPHPS: f64 = 1.35;

/// Default speed separating the two braking zones, in mph.
pub const DEFAULT_BRAKE_ZONE_BOUNDARY_MPH: f64 = 70.0;

/// Two-zone braking law.
///
/// Above `boundary_speed` the train decelerates at `high_speed_rate`; at or
/// below it, at `low_speed_rate`. Both rates are strictly positive and the
/// boundary is non-negative; [`BrakingRates::new`] is the only fallible way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakingRates {
    low_speed_rate: Acceleration,
    high_speed_rate: Acceleration,
    boundary_speed: Velocity,
}

impl BrakingRates {
    /// Creates a braking law from its two deceleration rates and zone boundary.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if either rate is not
    /// strictly positive or the boundary speed is negative.
    pub fn new(
        low_speed_rate: Acceleration,
        high_speed_rate: Acceleration,
        boundary_speed: Velocity,
    ) -> Result<Self, KinematicsError> {
        Ok(Self {
            low_speed_rate: StrictlyPositive::new(low_speed_rate)
                .map_err(|e| KinematicsError::invalid("low_speed_rate", e))?
                .into_inner(),
            high_speed_rate: StrictlyPositive::new(high_speed_rate)
                .map_err(|e| KinematicsError::invalid("high_speed_rate", e))?
                .into_inner(),
            boundary_speed: NonNegative::new(boundary_speed)
                .map_err(|e| KinematicsError::invalid("boundary_speed", e))?
                .into_inner(),
        })
    }

    /// Deceleration at or below the boundary speed.
    #[must_use]
    pub fn low_speed_rate(&self) -> Acceleration {
        self.low_speed_rate
    }

    /// Deceleration above the boundary speed.
    #[must_use]
    pub fn high_speed_rate(&self) -> Acceleration {
        self.high_speed_rate
    }

    #[must_use]
    pub fn boundary_speed(&self) -> Velocity {
        self.boundary_speed
    }
}

impl Default for BrakingRates {
    /// 2 mph/s below 70 mph and 1.35 mph/s above it.
    fn default() -> Self {
        Self {
            low_speed_rate: mile_per_hour_per_second(DEFAULT_LOW_SPEED_BRAKE_RATE_MPHPS),
            high_speed_rate: mile_per_hour_per_second(DEFAULT_HIGH_SPEED_BRAKE_RATE_MPHPS),
            boundary_speed: Velocity::new::<mile_per_hour>(DEFAULT_BRAKE_ZONE_BOUNDARY_MPH),
        }
    }
}

/// Aggregate performance of a train, validated once at construction.
///
/// The [`PowerLimit`] is derived here and cached. Values are immutable and
/// can be shared across threads; every profile borrows one read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainPerformanceSpec {
    mass: Constrained<Mass, StrictlyPositive>,
    max_power: Constrained<Power, StrictlyPositive>,
    max_tractive_force: Constrained<Force, StrictlyPositive>,
    drag: Constrained<DragCoefficient, NonNegative>,
    braking: BrakingRates,
    power_limit: PowerLimit,
}

impl TrainPerformanceSpec {
    /// Validates the parameters and derives the traction crossover.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if mass, power, or force
    /// is not strictly positive, or the drag coefficient is negative.
    pub fn new(
        mass: Mass,
        max_power: Power,
        max_tractive_force: Force,
        drag: DragCoefficient,
        braking: BrakingRates,
    ) -> Result<Self, KinematicsError> {
        let mass = StrictlyPositive::new(mass).map_err(|e| KinematicsError::invalid("mass", e))?;
        let max_power = StrictlyPositive::new(max_power)
            .map_err(|e| KinematicsError::invalid("max_power", e))?;
        let max_tractive_force = StrictlyPositive::new(max_tractive_force)
            .map_err(|e| KinematicsError::invalid("max_tractive_force", e))?;
        let drag = NonNegative::new(drag).map_err(|e| KinematicsError::invalid("drag", e))?;

        let power_limit = PowerLimit::new(mass.get(), max_power.get(), max_tractive_force.get());

        Ok(Self {
            mass,
            max_power,
            max_tractive_force,
            drag,
            braking,
            power_limit,
        })
    }

    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass.get()
    }

    #[must_use]
    pub fn max_power(&self) -> Power {
        self.max_power.get()
    }

    #[must_use]
    pub fn max_tractive_force(&self) -> Force {
        self.max_tractive_force.get()
    }

    #[must_use]
    pub fn drag(&self) -> DragCoefficient {
        self.drag.get()
    }

    #[must_use]
    pub fn braking_rates(&self) -> BrakingRates {
        self.braking
    }

    /// The cached force/power crossover.
    #[must_use]
    pub fn power_limit(&self) -> PowerLimit {
        self.power_limit
    }

    /// Acceleration relations for this train.
    #[must_use]
    pub fn acceleration(&self) -> AccelerationProfile<'_> {
        AccelerationProfile::new(self)
    }

    /// Braking relations for this train.
    #[must_use]
    pub fn braking(&self) -> BrakingProfile {
        BrakingProfile::new(self.braking)
    }
}
