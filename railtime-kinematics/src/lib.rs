//! Longitudinal kinematics of a single train on flat, straight track.
//!
//! A [`TrainPerformanceSpec`] is validated once and then shared read-only.
//! From it come the two motion profiles:
//!
//! - [`AccelerationProfile`]: from rest under a force limit, then a power
//!   limit eroded by cubic aerodynamic drag.
//! - [`BrakingProfile`]: to rest under a two-zone constant-deceleration law.
//!
//! [`RouteTimingSolver`] combines them into stop-to-stop run times for a
//! [`RouteSegment`], lowering the cruise speed when the segment is too short.
//!
//! All quantities at the API are `uom` SI quantities; failures are reported
//! as a [`KinematicsError`] naming the cause.

pub mod acceleration;
pub mod braking;
pub mod drag;
mod error;
pub mod route;
pub mod traction;
pub mod train;

pub use acceleration::{AccelerationProfile, AccelerationRegime};
pub use braking::{BrakingProfile, BrakingZone};
pub use drag::Aerodynamics;
pub use error::KinematicsError;
pub use route::{RouteSegment, RouteTimingSolver};
pub use traction::PowerLimit;
pub use train::{BrakingRates, TrainPerformanceSpec};
