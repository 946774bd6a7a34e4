//! Two-zone service braking to a stop.

use uom::si::{
    f64::{Length, Time, Velocity},
    velocity::meter_per_second,
};

use crate::{BrakingRates, KinematicsError};

/// Which deceleration rate applies at a given speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrakingZone {
    /// Above the boundary speed; decelerates at the high-speed rate.
    HighSpeed,
    /// At or below the boundary speed; decelerates at the low-speed rate.
    LowSpeed,
}

/// Time, velocity, and distance relations while braking to a stop.
///
/// Deceleration is uniform within each zone, so every relation is closed
/// form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakingProfile {
    rates: BrakingRates,
}

impl BrakingProfile {
    #[must_use]
    pub fn new(rates: BrakingRates) -> Self {
        Self { rates }
    }

    #[must_use]
    pub fn rates(&self) -> BrakingRates {
        self.rates
    }

    /// Returns the braking zone `speed` falls in.
    #[must_use]
    pub fn zone_at(&self, speed: Velocity) -> BrakingZone {
        if speed > self.rates.boundary_speed() {
            BrakingZone::HighSpeed
        } else {
            BrakingZone::LowSpeed
        }
    }

    /// Time to brake from `initial_speed` to rest.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if `initial_speed` is
    /// negative or NaN.
    pub fn time_to_stop(&self, initial_speed: Velocity) -> Result<Time, KinematicsError> {
        let v0 = KinematicsError::non_negative("initial_speed", initial_speed)?;
        let boundary = self.rates.boundary_speed();
        let low = self.rates.low_speed_rate();

        if v0 < boundary {
            Ok(v0 / low)
        } else {
            Ok((v0 - boundary) / self.rates.high_speed_rate() + boundary / low)
        }
    }

    /// Speed after braking for `time` from `initial_speed`.
    ///
    /// Decays linearly at the high-speed rate down to the boundary, then at
    /// the low-speed rate. Never negative; exactly zero from
    /// [`Self::time_to_stop`] on.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if either input is
    /// negative or NaN.
    pub fn velocity_at_time(
        &self,
        time: Time,
        initial_speed: Velocity,
    ) -> Result<Velocity, KinematicsError> {
        let time = KinematicsError::non_negative("time", time)?;
        let v0 = KinematicsError::non_negative("initial_speed", initial_speed)?;
        let stopped = Velocity::new::<meter_per_second>(0.0);

        if time >= self.time_to_stop(v0)? {
            return Ok(stopped);
        }

        let boundary = self.rates.boundary_speed();
        let low = self.rates.low_speed_rate();
        let high = self.rates.high_speed_rate();

        let speed = match self.zone_at(v0) {
            BrakingZone::LowSpeed => v0 - low * time,
            BrakingZone::HighSpeed => {
                let to_boundary = (v0 - boundary) / high;
                if time <= to_boundary {
                    v0 - high * time
                } else {
                    boundary - low * (time - to_boundary)
                }
            }
        };
        Ok(speed.max(stopped))
    }

    /// Distance covered braking from `initial_speed` to rest.
    ///
    /// Sums `v²/(2⋅a)` over the zones crossed.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if `initial_speed` is
    /// negative or NaN.
    pub fn distance_to_stop(&self, initial_speed: Velocity) -> Result<Length, KinematicsError> {
        let v0 = KinematicsError::non_negative("initial_speed", initial_speed)?;
        let boundary = self.rates.boundary_speed();
        let low = self.rates.low_speed_rate();

        match self.zone_at(v0) {
            BrakingZone::LowSpeed => Ok(v0 * v0 / low * 0.5),
            BrakingZone::HighSpeed => Ok((v0 * v0 - boundary * boundary)
                / self.rates.high_speed_rate()
                * 0.5
                + boundary * boundary / low * 0.5),
        }
    }
}
