//! Unit aliases and boundary conversions not provided directly by `uom`.

use uom::{
    si::{
        Quantity, ISQ, SI,
        f64::{Acceleration, Length, Mass, Time, Velocity},
        length::meter,
        mass::kilogram,
        time::second,
        velocity::{meter_per_second, mile_per_hour},
    },
    typenum::{N1, P1, Z0},
};

/// Combined aerodynamic drag coefficient, kg/m in SI.
///
/// Multiplies velocity cubed to give the aerodynamic power loss of a train,
/// `P_drag = D⋅v³`.
pub type DragCoefficient = Quantity<ISQ<N1, P1, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Builds a drag coefficient from a value in kg/m.
#[must_use]
pub fn kilogram_per_meter(value: f64) -> DragCoefficient {
    Mass::new::<kilogram>(value) / Length::new::<meter>(1.0)
}

/// Returns a drag coefficient expressed in kg/m.
#[must_use]
pub fn in_kilogram_per_meter(drag: DragCoefficient) -> f64 {
    (drag * Length::new::<meter>(1.0)).get::<kilogram>()
}

/// Builds an acceleration from a value in miles per hour per second.
///
/// Braking performance is conventionally quoted in mph/s, a unit `uom` does
/// not name directly.
#[must_use]
pub fn mile_per_hour_per_second(value: f64) -> Acceleration {
    Velocity::new::<mile_per_hour>(value) / Time::new::<second>(1.0)
}

/// Returns an acceleration expressed in miles per hour per second.
#[must_use]
pub fn in_mile_per_hour_per_second(acceleration: Acceleration) -> f64 {
    (acceleration * Time::new::<second>(1.0)).get::<mile_per_hour>()
}

/// Average speed over a distance covered in a given time.
///
/// Returns zero speed when `time` is zero, which is how an origin stop with
/// no travel is reported.
#[must_use]
pub fn average_speed(distance: Length, time: Time) -> Velocity {
    let seconds = time.get::<second>();
    if seconds == 0.0 {
        Velocity::new::<meter_per_second>(0.0)
    } else {
        Velocity::new::<meter_per_second>(distance.get::<meter>() / seconds)
    }
}
