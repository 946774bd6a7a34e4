//! Force-limited to power-limited traction crossover.

use uom::si::f64::{Force, Mass, Power, Time, Velocity};

/// The point where traction switches from force-limited to power-limited.
///
/// Below the crossover speed `v1 = P/F` the full tractive force is available
/// and acceleration is constant, so the crossover is reached after
/// `t1 = m⋅v1/F = m⋅P/F²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLimit {
    crossover_speed: Velocity,
    crossover_time: Time,
}

impl PowerLimit {
    /// Derives the crossover from validated train parameters.
    ///
    /// All inputs are strictly positive, so both results are too.
    pub(crate) fn new(mass: Mass, max_power: Power, max_tractive_force: Force) -> Self {
        Self {
            crossover_speed: max_power / max_tractive_force,
            crossover_time: mass * max_power / (max_tractive_force * max_tractive_force),
        }
    }

    /// Highest speed at which the full tractive force can be applied.
    #[must_use]
    pub fn crossover_speed(&self) -> Velocity {
        self.crossover_speed
    }

    /// Time to accelerate from rest to the crossover speed.
    #[must_use]
    pub fn crossover_time(&self) -> Time {
        self.crossover_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{force::newton, mass::kilogram, power::watt, time::second, velocity::meter_per_second};

    #[test]
    fn crossover_from_power_and_force() {
        let limit = PowerLimit::new(
            Mass::new::<kilogram>(1000.0),
            Power::new::<watt>(20_000.0),
            Force::new::<newton>(4000.0),
        );

        assert_relative_eq!(limit.crossover_speed().get::<meter_per_second>(), 5.0);
        assert_relative_eq!(limit.crossover_time().get::<second>(), 1.25);
    }
}
