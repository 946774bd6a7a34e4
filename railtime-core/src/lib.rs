//! Foundational types for railtime, a train run-time modeling toolkit.

pub mod constraint;
pub mod units;

pub use units::DragCoefficient;
