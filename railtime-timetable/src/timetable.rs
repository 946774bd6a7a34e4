//! Timetable generation.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use csv::{StringRecord, Writer};
use railtime_core::units::average_speed;
use railtime_kinematics::RouteTimingSolver;
use rayon::prelude::*;
use tracing::{debug, info};
use uom::si::{
    f64::{Time, Velocity},
    length::mile,
    time::{minute, second},
    velocity::mile_per_hour,
};

use crate::{Route, TimetableError};

/// Column added with the run time of each segment, dwell included, in minutes.
pub const TIME_COLUMN: &str = "time (min)";

/// Column added with the average speed of each segment, in mph.
pub const AVERAGE_SPEED_COLUMN: &str = "avg spd (mph)";

/// Timing of one route row.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableRow {
    pub record: StringRecord,
    pub time: Time,
    pub average_speed: Velocity,
    /// Cruise speed held over the segment; `None` for the origin row.
    pub cruise_speed: Option<Velocity>,
}

/// A route with run times attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    headers: StringRecord,
    rows: Vec<TimetableRow>,
}

impl Timetable {
    /// Times every segment of `route`.
    ///
    /// Segments are timed in parallel; rows keep their route order. An origin
    /// row is passed through with zero time and zero average speed.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Segment`] for the first row that cannot be
    /// timed.
    pub fn generate(
        solver: &RouteTimingSolver<'_>,
        route: &Route,
        dwell: Time,
    ) -> Result<Self, TimetableError> {
        let results: Vec<Result<TimetableRow, TimetableError>> = route
            .stops()
            .par_iter()
            .enumerate()
            .map(|(index, stop)| {
                let row = index + 1;
                if stop.is_origin() {
                    return Ok(TimetableRow {
                        record: stop.record.clone(),
                        time: Time::new::<second>(0.0),
                        average_speed: Velocity::new::<mile_per_hour>(0.0),
                        cruise_speed: None,
                    });
                }

                let solution = stop
                    .segment(dwell)
                    .and_then(|segment| solver.stop_to_stop_time(&segment))
                    .map_err(|source| TimetableError::Segment { row, source })?;

                debug!(
                    row,
                    minutes = solution.total_time.get::<minute>(),
                    cruise_mph = solution.cruise_speed.get::<mile_per_hour>(),
                    reductions = solution.reductions,
                    "timed segment",
                );

                Ok(TimetableRow {
                    record: stop.record.clone(),
                    time: solution.total_time,
                    average_speed: solution.average_speed(),
                    cruise_speed: Some(solution.cruise_speed),
                })
            })
            .collect();

        let rows = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        let timetable = Self {
            headers: route.headers().clone(),
            rows,
        };

        info!(
            stops = timetable.rows.len(),
            miles = route.length().get::<mile>(),
            minutes = timetable.total_time().get::<minute>(),
            "generated timetable",
        );
        Ok(timetable)
    }

    #[must_use]
    pub fn rows(&self) -> &[TimetableRow] {
        &self.rows
    }

    /// Sum of all segment times.
    #[must_use]
    pub fn total_time(&self) -> Time {
        self.rows
            .iter()
            .fold(Time::new::<second>(0.0), |total, row| total + row.time)
    }

    /// Average speed over the whole route, dwells included.
    #[must_use]
    pub fn average_speed(&self, route: &Route) -> Velocity {
        average_speed(route.length(), self.total_time())
    }

    /// Writes the timetable as CSV: the route columns, then time and average
    /// speed.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Csv`] if writing fails.
    pub fn write(&self, writer: impl io::Write) -> Result<(), TimetableError> {
        let mut writer = Writer::from_writer(writer);

        let mut headers = self.headers.clone();
        headers.push_field(TIME_COLUMN);
        headers.push_field(AVERAGE_SPEED_COLUMN);
        writer.write_record(&headers)?;

        for row in &self.rows {
            let mut record = row.record.clone();
            record.push_field(&row.time.get::<minute>().to_string());
            record.push_field(&row.average_speed.get::<mile_per_hour>().to_string());
            writer.write_record(&record)?;
        }

        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Writes the timetable to a CSV file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<(), TimetableError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| TimetableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(io::BufWriter::new(file))
    }
}

/// Default timetable path for a route file: `<stem>_timetable.csv` beside it.
#[must_use]
pub fn output_path(route_path: &Path) -> PathBuf {
    let stem = route_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    route_path.with_file_name(format!("{stem}_timetable.csv"))
}
