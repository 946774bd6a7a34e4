//! Timetables from train consist and route files.
//!
//! A [`Consist`] aggregates into a [`TrainPerformanceSpec`]; a [`Route`] lists
//! the segments between stops. [`Timetable::generate`] times each segment
//! with a [`RouteTimingSolver`] and [`Timetable::write`] emits the route
//! table with run time and average speed columns appended.
//!
//! File formats use customary units (miles, mph, minutes, lb, hp, lbf);
//! everything is converted to SI at load time.
//!
//! [`TrainPerformanceSpec`]: railtime_kinematics::TrainPerformanceSpec
//! [`RouteTimingSolver`]: railtime_kinematics::RouteTimingSolver

pub mod consist;
mod error;
pub mod route;
pub mod timetable;

pub use consist::Consist;
pub use error::TimetableError;
pub use route::{Route, Stop};
pub use timetable::{Timetable, TimetableRow, output_path};
