use std::{io, path::PathBuf};

use railtime_kinematics::KinematicsError;
use thiserror::Error;

/// Errors raised while loading inputs or generating a timetable.
///
/// Row numbers count data rows from 1, not including the header.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TimetableError {
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed consist description")]
    Json(#[from] serde_json::Error),

    #[error("malformed route table")]
    Csv(#[from] csv::Error),

    #[error("consist has no power units")]
    NoPowerUnits,

    #[error("route is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("route row {row} has no value for `{column}`")]
    MissingValue { row: usize, column: &'static str },

    #[error("route row {row} has non-numeric `{column}` value {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("route row {row} has zero `{column}`; only the first row may contain zeros")]
    UnexpectedZero { row: usize, column: &'static str },

    #[error("first route row must have both speed and distance zero, or neither")]
    PartialOrigin,

    /// The consist aggregates to physically invalid train parameters.
    #[error("consist does not describe a valid train")]
    Train(#[from] KinematicsError),

    /// Timing a route row failed.
    #[error("cannot time route row {row}")]
    Segment {
        row: usize,
        #[source]
        source: KinematicsError,
    },
}
