//! Route tables.
//!
//! A route is a CSV file with one row per stop. Each row gives the track
//! speed and distance of the segment arriving at that stop. Any further
//! columns (station names, codes) are carried through to the timetable
//! unchanged.
//!
//! Zeros are only allowed in the first row, and only as a pair: a first row
//! with zero speed and zero distance marks the origin stop.

use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord};
use railtime_kinematics::{KinematicsError, RouteSegment};
use uom::si::{
    f64::{Length, Time, Velocity},
    length::mile,
    velocity::mile_per_hour,
};

use crate::TimetableError;

/// Column holding the segment's track speed, in mph.
pub const SPEED_COLUMN: &str = "track speed (mph)";

/// Column holding the segment's length, in miles.
pub const DISTANCE_COLUMN: &str = "dist (mi)";

/// One row of a route table.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// The row as read, every column included.
    pub record: StringRecord,
    pub track_speed: Velocity,
    pub distance: Length,
}

impl Stop {
    /// Whether this is the zero-speed, zero-distance origin row.
    #[must_use]
    pub fn is_origin(&self) -> bool {
        self.track_speed.get::<mile_per_hour>() == 0.0 && self.distance.get::<mile>() == 0.0
    }

    /// The stop-to-stop query for the segment ending at this stop.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::InvalidParameter`] for a non-positive speed
    /// or distance, or a negative dwell.
    pub fn segment(&self, dwell: Time) -> Result<RouteSegment, KinematicsError> {
        RouteSegment::new(self.distance, self.track_speed, dwell)
    }
}

/// A validated route table.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    headers: StringRecord,
    stops: Vec<Stop>,
}

impl Route {
    /// Reads and validates a route from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TimetableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Reads and validates a route from CSV data with a header row.
    ///
    /// # Errors
    ///
    /// - [`TimetableError::Csv`] if the data is not well-formed CSV.
    /// - [`TimetableError::MissingColumn`] if a required column is absent.
    /// - [`TimetableError::MissingValue`] or [`TimetableError::InvalidValue`]
    ///   if a speed or distance cell is empty or not a number.
    /// - [`TimetableError::UnexpectedZero`] for a zero after the first row.
    /// - [`TimetableError::PartialOrigin`] if exactly one of the first row's
    ///   speed and distance is zero.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, TimetableError> {
        let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();

        let speed_index = column_index(&headers, SPEED_COLUMN)?;
        let distance_index = column_index(&headers, DISTANCE_COLUMN)?;

        let mut stops = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let row = index + 1;

            let speed = parse_cell(&record, speed_index, row, SPEED_COLUMN)?;
            let distance = parse_cell(&record, distance_index, row, DISTANCE_COLUMN)?;

            if row == 1 {
                if (speed == 0.0) != (distance == 0.0) {
                    return Err(TimetableError::PartialOrigin);
                }
            } else if speed == 0.0 {
                return Err(TimetableError::UnexpectedZero {
                    row,
                    column: SPEED_COLUMN,
                });
            } else if distance == 0.0 {
                return Err(TimetableError::UnexpectedZero {
                    row,
                    column: DISTANCE_COLUMN,
                });
            }

            stops.push(Stop {
                record,
                track_speed: Velocity::new::<mile_per_hour>(speed),
                distance: Length::new::<mile>(distance),
            });
        }

        Ok(Self { headers, stops })
    }

    /// Column names in file order.
    #[must_use]
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Total route length.
    #[must_use]
    pub fn length(&self) -> Length {
        self.stops
            .iter()
            .fold(Length::new::<mile>(0.0), |total, stop| total + stop.distance)
    }
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, TimetableError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(TimetableError::MissingColumn { column })
}

fn parse_cell(
    record: &StringRecord,
    index: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, TimetableError> {
    let value = record.get(index).unwrap_or_default();
    if value.is_empty() {
        return Err(TimetableError::MissingValue { row, column });
    }
    value.parse().map_err(|_| TimetableError::InvalidValue {
        row,
        column,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn parse(csv: &str) -> Result<Route, TimetableError> {
        Route::from_reader(csv.as_bytes())
    }

    #[test]
    fn reads_stops_and_keeps_extra_columns() {
        let route = parse(
            "station,track speed (mph),dist (mi),code\n\
             Origin,0,0,ORG\n\
             Midway,79,12.5,MID\n\
             Terminus,110,30,TRM\n",
        )
        .unwrap();

        assert_eq!(route.stops().len(), 3);
        assert!(route.stops()[0].is_origin());
        assert!(!route.stops()[1].is_origin());
        assert_eq!(&route.stops()[2].record[3], "TRM");
        assert_relative_eq!(route.stops()[1].track_speed.get::<mile_per_hour>(), 79.0, max_relative = 1e-12);
        assert_relative_eq!(route.length().get::<mile>(), 42.5, max_relative = 1e-12);
    }

    #[test]
    fn first_row_may_be_a_regular_segment() {
        let route = parse("track speed (mph),dist (mi)\n79,5\n90,8\n").unwrap();
        assert!(!route.stops()[0].is_origin());
    }

    #[test]
    fn requires_speed_and_distance_columns() {
        assert!(matches!(
            parse("speed,dist (mi)\n1,1\n"),
            Err(TimetableError::MissingColumn { column: SPEED_COLUMN })
        ));
        assert!(matches!(
            parse("track speed (mph),distance\n1,1\n"),
            Err(TimetableError::MissingColumn { column: DISTANCE_COLUMN })
        ));
    }

    #[test]
    fn rejects_missing_and_malformed_values() {
        assert!(matches!(
            parse("track speed (mph),dist (mi)\n79,5\n,8\n"),
            Err(TimetableError::MissingValue { row: 2, column: SPEED_COLUMN })
        ));
        assert!(matches!(
            parse("track speed (mph),dist (mi)\n79,five\n"),
            Err(TimetableError::InvalidValue { row: 1, column: DISTANCE_COLUMN, .. })
        ));
    }

    #[test]
    fn zeros_only_as_origin() {
        assert!(matches!(
            parse("track speed (mph),dist (mi)\n0,5\n"),
            Err(TimetableError::PartialOrigin)
        ));
        assert!(matches!(
            parse("track speed (mph),dist (mi)\n0,0\n0,0\n"),
            Err(TimetableError::UnexpectedZero { row: 2, column: SPEED_COLUMN })
        ));
        assert!(matches!(
            parse("track speed (mph),dist (mi)\n0,0\n79,0.0\n"),
            Err(TimetableError::UnexpectedZero { row: 2, column: DISTANCE_COLUMN })
        ));
    }
}
