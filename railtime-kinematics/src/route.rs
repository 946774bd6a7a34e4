//! Stop-to-stop run times over a route segment.
//!
//! A run accelerates from rest towards the target cruise speed, cruises, and
//! brakes to the next stop. When the segment is too short for the full
//! acceleration and braking envelope at the target speed, the solver lowers
//! the speed in fixed fractional steps until the envelope fits, giving up
//! after a bounded number of reductions.

mod config;
mod solution;

pub use config::Config;
pub use solution::{Phases, Solution};

use railtime_core::constraint::{Constrained, NonNegative, StrictlyPositive};
use railtime_solve::quadrature;
use tracing::debug;
use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    velocity::meter_per_second,
};

use crate::{AccelerationProfile, BrakingProfile, KinematicsError, TrainPerformanceSpec};

/// One stop-to-stop query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSegment {
    distance: Constrained<Length, StrictlyPositive>,
    target_speed: Constrained<Velocity, StrictlyPositive>,
    dwell: Constrained<Time, NonNegative>,
}

impl RouteSegment {
    /// Creates a segment from its length, target cruise speed, and the dwell
    /// time spent at the stop.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if the distance or speed
    /// is not strictly positive, or the dwell time is negative.
    pub fn new(
        distance: Length,
        target_speed: Velocity,
        dwell: Time,
    ) -> Result<Self, KinematicsError> {
        Ok(Self {
            distance: StrictlyPositive::new(distance)
                .map_err(|e| KinematicsError::invalid("distance", e))?,
            target_speed: StrictlyPositive::new(target_speed)
                .map_err(|e| KinematicsError::invalid("target_speed", e))?,
            dwell: NonNegative::new(dwell).map_err(|e| KinematicsError::invalid("dwell", e))?,
        })
    }

    #[must_use]
    pub fn distance(&self) -> Length {
        self.distance.get()
    }

    #[must_use]
    pub fn target_speed(&self) -> Velocity {
        self.target_speed.get()
    }

    #[must_use]
    pub fn dwell(&self) -> Time {
        self.dwell.get()
    }
}

/// Times stop-to-stop runs for one train.
///
/// Holds no per-query state, so one solver can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct RouteTimingSolver<'a> {
    acceleration: AccelerationProfile<'a>,
    braking: BrakingProfile,
    config: Config,
}

impl<'a> RouteTimingSolver<'a> {
    /// Creates a solver with the default search configuration.
    #[must_use]
    pub fn new(spec: &'a TrainPerformanceSpec) -> Self {
        Self {
            acceleration: spec.acceleration(),
            braking: spec.braking(),
            config: Config::default(),
        }
    }

    /// Replaces the search configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] if the config is invalid.
    pub fn with_config(self, config: Config) -> Result<Self, KinematicsError> {
        config
            .validate()
            .map_err(|reason| KinematicsError::invalid("config", reason))?;
        Ok(Self { config, ..self })
    }

    /// Replaces the quadrature settings used for acceleration distances.
    #[must_use]
    pub fn with_quadrature(self, quadrature: quadrature::Config) -> Self {
        Self {
            acceleration: self.acceleration.with_quadrature(quadrature),
            ..self
        }
    }

    #[must_use]
    pub fn config(&self) -> Config {
        self.config
    }

    /// Total time to run the segment from stop to stop, dwell included.
    ///
    /// # Errors
    ///
    /// - [`KinematicsError::UnreachableSpeed`] if the target speed is beyond
    ///   the train's terminal speed. Checked before any reduction.
    /// - [`KinematicsError::InfeasibleDistance`] if the envelope still exceeds
    ///   the segment after `max_reductions` reductions.
    /// - Any error from the acceleration distance integral.
    pub fn stop_to_stop_time(&self, segment: &RouteSegment) -> Result<Solution, KinematicsError> {
        let distance = segment.distance();
        let mut speed = segment.target_speed();
        let mut reductions = 0;

        let run = loop {
            let run = Envelope::at(&self.acceleration, &self.braking, speed)?;
            if run.length() <= distance {
                break run;
            }

            if reductions >= self.config.max_reductions {
                return Err(KinematicsError::InfeasibleDistance {
                    distance,
                    attempts: reductions,
                    speed,
                    envelope: run.length(),
                });
            }

            speed = speed * (1.0 - self.config.reduction);
            reductions += 1;
            debug!(
                reductions,
                speed_mps = speed.get::<meter_per_second>(),
                envelope_m = run.length().get::<meter>(),
                distance_m = distance.get::<meter>(),
                "envelope exceeds segment, reducing cruise speed",
            );
        };

        let cruise_distance = distance - run.length();
        let cruise_time = cruise_distance / speed;
        let dwell = segment.dwell();

        Ok(Solution {
            total_time: dwell + run.accel_time + cruise_time + run.brake_time,
            cruise_speed: speed,
            reductions,
            distance,
            phases: Phases {
                dwell,
                accel_time: run.accel_time,
                accel_distance: run.accel_distance,
                cruise_time,
                cruise_distance,
                brake_time: run.brake_time,
                brake_distance: run.brake_distance,
            },
        })
    }
}

/// Acceleration to and braking from one trial cruise speed.
#[derive(Debug, Clone, Copy)]
struct Envelope {
    accel_time: Time,
    accel_distance: Length,
    brake_time: Time,
    brake_distance: Length,
}

impl Envelope {
    fn at(
        acceleration: &AccelerationProfile<'_>,
        braking: &BrakingProfile,
        speed: Velocity,
    ) -> Result<Self, KinematicsError> {
        let accel_time = acceleration.time_to_reach(speed)?;
        Ok(Self {
            accel_time,
            accel_distance: acceleration.distance_at_time(accel_time)?,
            brake_time: braking.time_to_stop(speed)?,
            brake_distance: braking.distance_to_stop(speed)?,
        })
    }

    fn length(&self) -> Length {
        self.accel_distance + self.brake_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use railtime_core::units::kilogram_per_meter;
    use uom::si::{
        f64::{Force, Mass, Power},
        force::newton,
        mass::kilogram,
        power::watt,
        time::second,
    };

    use crate::BrakingRates;

    fn mps(value: f64) -> Velocity {
        Velocity::new::<meter_per_second>(value)
    }

    fn meters(value: f64) -> Length {
        Length::new::<meter>(value)
    }

    fn secs(value: f64) -> Time {
        Time::new::<second>(value)
    }

    /// v1 = 5 m/s, t1 = 1.25 s; brakes at 1 m/s² up to 10 m/s.
    fn train(drag: f64) -> TrainPerformanceSpec {
        TrainPerformanceSpec::new(
            Mass::new::<kilogram>(1000.0),
            Power::new::<watt>(20_000.0),
            Force::new::<newton>(4000.0),
            kilogram_per_meter(drag),
            BrakingRates::new(mps(1.0) / secs(1.0), mps(0.5) / secs(1.0), mps(10.0)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_segments() {
        assert!(matches!(
            RouteSegment::new(meters(0.0), mps(5.0), secs(0.0)),
            Err(KinematicsError::InvalidParameter { parameter: "distance", .. })
        ));
        assert!(matches!(
            RouteSegment::new(meters(10.0), mps(-5.0), secs(0.0)),
            Err(KinematicsError::InvalidParameter { parameter: "target_speed", .. })
        ));
        assert!(matches!(
            RouteSegment::new(meters(10.0), mps(5.0), secs(-1.0)),
            Err(KinematicsError::InvalidParameter { parameter: "dwell", .. })
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let spec = train(0.0);
        let result = RouteTimingSolver::new(&spec).with_config(Config {
            reduction: 1.5,
            ..Config::default()
        });
        assert!(matches!(
            result,
            Err(KinematicsError::InvalidParameter { parameter: "config", .. })
        ));
    }

    #[test]
    fn long_segment_runs_at_target_speed() {
        let spec = train(0.0);
        let solver = RouteTimingSolver::new(&spec);
        let segment = RouteSegment::new(meters(100.0), mps(5.0), secs(10.0)).unwrap();

        let solution = solver.stop_to_stop_time(&segment).unwrap();
        let phases = solution.phases;

        assert_eq!(solution.reductions, 0);
        assert_relative_eq!(solution.cruise_speed.get::<meter_per_second>(), 5.0);
        assert_relative_eq!(phases.accel_time.get::<second>(), 1.25);
        assert_relative_eq!(phases.accel_distance.get::<meter>(), 3.125, max_relative = 1e-9);
        assert_relative_eq!(phases.brake_time.get::<second>(), 5.0);
        assert_relative_eq!(phases.brake_distance.get::<meter>(), 12.5);
        assert_relative_eq!(phases.cruise_distance.get::<meter>(), 84.375, max_relative = 1e-9);
        assert_relative_eq!(phases.cruise_time.get::<second>(), 16.875, max_relative = 1e-9);
        assert_relative_eq!(solution.total_time.get::<second>(), 33.125, max_relative = 1e-9);
        assert_relative_eq!(
            solution.average_speed().get::<meter_per_second>(),
            100.0 / 33.125,
            max_relative = 1e-9
        );
    }

    #[test]
    fn short_segment_reduces_speed_until_envelope_fits() {
        let spec = train(0.0);
        let solver = RouteTimingSolver::new(&spec);
        let segment = RouteSegment::new(meters(15.0), mps(5.0), secs(0.0)).unwrap();

        let solution = solver.stop_to_stop_time(&segment).unwrap();

        // The envelope scales with v², so five 0.5 % steps are needed.
        assert_eq!(solution.reductions, 5);
        assert_relative_eq!(
            solution.cruise_speed.get::<meter_per_second>(),
            5.0 * 0.995_f64.powi(5),
            max_relative = 1e-12
        );
        assert!(solution.envelope() <= segment.distance());
        assert!(solution.phases.cruise_time.get::<second>() >= 0.0);
    }

    #[test]
    fn exhausted_reductions_are_infeasible() {
        let spec = train(0.0);
        let solver = RouteTimingSolver::new(&spec);
        let segment = RouteSegment::new(meters(1.0), mps(5.0), secs(0.0)).unwrap();

        match solver.stop_to_stop_time(&segment) {
            Err(KinematicsError::InfeasibleDistance {
                attempts,
                speed,
                envelope,
                ..
            }) => {
                assert_eq!(attempts, 100);
                assert_relative_eq!(
                    speed.get::<meter_per_second>(),
                    5.0 * 0.995_f64.powi(100),
                    max_relative = 1e-12
                );
                assert!(envelope > meters(1.0));
            }
            other => panic!("expected infeasible distance, got {other:?}"),
        }
    }

    #[test]
    fn reduction_budget_is_configurable() {
        let spec = train(0.0);
        let segment = RouteSegment::new(meters(15.0), mps(5.0), secs(0.0)).unwrap();

        let strict = RouteTimingSolver::new(&spec)
            .with_config(Config {
                max_reductions: 3,
                ..Config::default()
            })
            .unwrap();
        assert!(matches!(
            strict.stop_to_stop_time(&segment),
            Err(KinematicsError::InfeasibleDistance { attempts: 3, .. })
        ));

        let coarse = RouteTimingSolver::new(&spec)
            .with_config(Config {
                reduction: 0.1,
                ..Config::default()
            })
            .unwrap();
        assert_eq!(coarse.stop_to_stop_time(&segment).unwrap().reductions, 1);
    }

    #[test]
    fn unreachable_speed_is_not_retried() {
        let spec = train(1.0);
        let solver = RouteTimingSolver::new(&spec);
        let segment = RouteSegment::new(meters(1e6), mps(30.0), secs(0.0)).unwrap();

        assert!(matches!(
            solver.stop_to_stop_time(&segment),
            Err(KinematicsError::UnreachableSpeed { .. })
        ));
    }
}
