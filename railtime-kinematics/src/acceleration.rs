//! Powered acceleration from rest.
//!
//! Acceleration spans two regimes split at the [`PowerLimit`] crossover.
//! Below the crossover speed the tractive force is capped and acceleration is
//! constant. Above it the delivered power is capped and aerodynamic drag
//! removes `D⋅v³` of it, so acceleration falls off towards the terminal speed.
//!
//! [`PowerLimit`]: crate::PowerLimit

use railtime_solve::{
    polynomial::cubic_roots,
    quadrature::{self, Status},
};
use tracing::debug;
use railtime_core::units::in_kilogram_per_meter;
use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    mass::kilogram,
    power::watt,
    time::second,
    velocity::meter_per_second,
};

use crate::{KinematicsError, TrainPerformanceSpec};

/// Relative accuracy the distance integral must achieve.
pub const DISTANCE_ACCURACY: f64 = 0.01;

/// Roots this far below the crossover speed, relative to it, still count as
/// continuous with the force-limited phase.
const CROSSOVER_ROOT_TOL: f64 = 1e-9;

/// Which limit governs acceleration at a given speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelerationRegime {
    /// At or below the crossover speed: full tractive force, constant
    /// acceleration.
    ForceLimited,
    /// Above the crossover speed: full power, acceleration falls with speed.
    PowerLimited,
}

/// Time, velocity, and distance relations while accelerating from rest.
///
/// Borrows the train read-only, so any number of profiles can run
/// concurrently against one [`TrainPerformanceSpec`].
#[derive(Debug, Clone, Copy)]
pub struct AccelerationProfile<'a> {
    spec: &'a TrainPerformanceSpec,
    quadrature: quadrature::Config,
}

impl<'a> AccelerationProfile<'a> {
    /// Creates a profile using the default quadrature settings.
    #[must_use]
    pub fn new(spec: &'a TrainPerformanceSpec) -> Self {
        Self {
            spec,
            quadrature: quadrature::Config::default(),
        }
    }

    /// Replaces the quadrature settings used by [`Self::distance_at_time`].
    #[must_use]
    pub fn with_quadrature(self, quadrature: quadrature::Config) -> Self {
        Self { quadrature, ..self }
    }

    #[must_use]
    pub fn spec(&self) -> &'a TrainPerformanceSpec {
        self.spec
    }

    /// Returns the regime that governs acceleration at `speed`.
    #[must_use]
    pub fn regime_at(&self, speed: Velocity) -> AccelerationRegime {
        if speed <= self.spec.power_limit().crossover_speed() {
            AccelerationRegime::ForceLimited
        } else {
            AccelerationRegime::PowerLimited
        }
    }

    /// Speed at which drag consumes all available power, `(P/D)^(1/3)`.
    ///
    /// A train without drag has no terminal speed.
    #[must_use]
    pub fn terminal_speed(&self) -> Option<Velocity> {
        let drag = in_kilogram_per_meter(self.spec.drag());
        if drag == 0.0 {
            return None;
        }
        let power = self.spec.max_power().get::<watt>();
        Some(Velocity::new::<meter_per_second>((power / drag).cbrt()))
    }

    /// Time needed to accelerate from rest to `speed`.
    ///
    /// Force-limited speeds take `m⋅v/F`. Above the crossover the time is
    /// `t1 + m⋅(v² − v1²) / (2⋅(P − D⋅v³))`.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::InvalidParameter`] if `speed` is negative or NaN.
    /// - [`KinematicsError::UnreachableSpeed`] if drag at `speed` consumes
    ///   all available power.
    pub fn time_to_reach(&self, speed: Velocity) -> Result<Time, KinematicsError> {
        let speed = KinematicsError::non_negative("speed", speed)?;
        let spec = self.spec;
        let limit = spec.power_limit();

        if self.regime_at(speed) == AccelerationRegime::ForceLimited {
            return Ok(spec.mass() * speed / spec.max_tractive_force());
        }

        let v = speed.get::<meter_per_second>();
        let v1 = limit.crossover_speed().get::<meter_per_second>();
        let drag = in_kilogram_per_meter(spec.drag());
        let surplus = spec.max_power().get::<watt>() - drag * v * v * v;
        if surplus <= 0.0 || !surplus.is_finite() {
            return Err(KinematicsError::UnreachableSpeed {
                speed,
                terminal_speed: self.terminal_speed(),
            });
        }

        let extra = spec.mass().get::<kilogram>() * (v * v - v1 * v1) / (2.0 * surplus);
        Ok(limit.crossover_time() + Time::new::<second>(extra))
    }

    /// Speed reached after accelerating from rest for `time`.
    ///
    /// Past the crossover time the speed is the root of
    /// `2⋅D⋅(t − t1)⋅v³ + m⋅v² + 2⋅P⋅(t1 − t) − m⋅v1² = 0` that continues the
    /// force-limited phase. Its coefficient signs allow exactly one positive
    /// root, and that root is at least `v1` for any train whose terminal speed
    /// exceeds its crossover speed.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::InvalidParameter`] if `time` is negative or NaN.
    /// - [`KinematicsError::NoPhysicalRoot`] if the velocity equation has no
    ///   root at or above the crossover speed.
    pub fn velocity_at_time(&self, time: Time) -> Result<Velocity, KinematicsError> {
        let time = KinematicsError::non_negative("time", time)?;
        let spec = self.spec;
        let limit = spec.power_limit();

        if time < limit.crossover_time() {
            return Ok(spec.max_tractive_force() * time / spec.mass());
        }

        let mass = spec.mass().get::<kilogram>();
        let v1 = limit.crossover_speed().get::<meter_per_second>();
        let elapsed = (time - limit.crossover_time()).get::<second>();

        let roots = cubic_roots(
            2.0 * in_kilogram_per_meter(spec.drag()) * elapsed,
            mass,
            0.0,
            -2.0 * spec.max_power().get::<watt>() * elapsed - mass * v1 * v1,
        );

        roots
            .iter()
            .filter(|&v| v >= v1 * (1.0 - CROSSOVER_ROOT_TOL))
            .reduce(f64::min)
            .map(Velocity::new::<meter_per_second>)
            .ok_or(KinematicsError::NoPhysicalRoot { time })
    }

    /// Distance covered after accelerating from rest for `time`.
    ///
    /// Integrates [`Self::velocity_at_time`] over `[0, time]` with adaptive
    /// quadrature. A zero duration covers zero distance.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::InvalidParameter`] if `time` is negative or NaN.
    /// - [`KinematicsError::NumericalAccuracyFault`] if the error estimate
    ///   exceeds [`DISTANCE_ACCURACY`] of the integral.
    /// - [`KinematicsError::Integration`] if the quadrature itself fails.
    pub fn distance_at_time(&self, time: Time) -> Result<Length, KinematicsError> {
        let time = KinematicsError::non_negative("time", time)?;
        let horizon = time.get::<second>();
        if horizon == 0.0 {
            return Ok(Length::new::<meter>(0.0));
        }

        let solution = quadrature::integrate(
            |t| {
                self.velocity_at_time(Time::new::<second>(t))
                    .map(|v| v.get::<meter_per_second>())
            },
            [0.0, horizon],
            &self.quadrature,
        )?;

        if solution.status == Status::SubdivisionLimit {
            debug!(
                horizon,
                error_estimate = solution.error_estimate,
                segments = solution.segments,
                "distance quadrature hit its subdivision limit",
            );
        }

        accepted_distance(&solution, time)
    }
}

/// Accepts a distance integral over `duration` only if its error estimate is
/// within [`DISTANCE_ACCURACY`] of its magnitude.
fn accepted_distance(
    solution: &quadrature::Solution,
    duration: Time,
) -> Result<Length, KinematicsError> {
    let distance = Length::new::<meter>(solution.value);
    if !solution.is_within(DISTANCE_ACCURACY) {
        return Err(KinematicsError::NumericalAccuracyFault {
            duration,
            distance,
            error_estimate: Length::new::<meter>(solution.error_estimate),
        });
    }
    Ok(distance)
}
