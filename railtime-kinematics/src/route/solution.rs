use railtime_core::units::average_speed;
use uom::si::f64::{Length, Time, Velocity};

/// Time and distance spent in each phase of a stop-to-stop run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phases {
    pub dwell: Time,
    pub accel_time: Time,
    pub accel_distance: Length,
    pub cruise_time: Time,
    pub cruise_distance: Length,
    pub brake_time: Time,
    pub brake_distance: Length,
}

/// The result of a stop-to-stop timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Dwell plus acceleration, cruise, and braking time.
    pub total_time: Time,
    /// Cruise speed actually held, at most the target speed.
    pub cruise_speed: Velocity,
    /// Number of speed reductions needed to fit the segment.
    pub reductions: usize,
    /// Segment length.
    pub distance: Length,
    pub phases: Phases,
}

impl Solution {
    /// Segment length over total time, dwell included.
    #[must_use]
    pub fn average_speed(&self) -> Velocity {
        average_speed(self.distance, self.total_time)
    }

    /// Distance needed to accelerate to and brake from the cruise speed.
    #[must_use]
    pub fn envelope(&self) -> Length {
        self.phases.accel_distance + self.phases.brake_distance
    }
}
